//! 积分子系统实体定义
//!
//! 包含兑换规则、积分流水和余额投影。流水只增不改，
//! 余额是流水的派生投影，两者的一致性由追加协议保证。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::EntryKind;

/// 积分兑换规则
///
/// 描述"多少积分可抵扣多少金额"的命名规则，
/// 供兑换流程使用，并在流水上留作审计引用
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionPolicy {
    /// 规则编码（主键，不超过 5 个字符）
    pub code: String,
    /// 兑换所需积分数
    pub point_value: i64,
    /// 对应抵扣金额（两位小数）
    pub monetary_value: Decimal,
}

impl ConversionPolicy {
    /// 按此规则折算一笔积分对应的金额
    ///
    /// 结果四舍五入到两位小数
    pub fn redemption_amount(&self, points: i64) -> Decimal {
        (self.monetary_value * Decimal::from(points) / Decimal::from(self.point_value)).round_dp(2)
    }
}

/// 积分流水
///
/// 记录每一次积分变动。创建后不可修改或删除，
/// 更正只能通过追加冲销流水完成
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntry {
    /// 流水 ID（服务端生成）
    pub id: String,
    /// 客户 ID
    pub customer_id: String,
    /// 流水类型
    pub kind: EntryKind,
    /// 交易描述（不超过 300 字符）
    pub description: String,
    /// 积分变动值（累计为正，兑换为负）
    pub point_delta: i64,
    /// 应用的兑换规则（规则删除后置空）
    #[sqlx(default)]
    pub policy_code: Option<String>,
    /// 交易时间（服务端赋值）
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// 创建一条积分累计流水
    pub fn accrual(customer_id: String, description: String, point_delta: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            kind: EntryKind::Accrual,
            description,
            point_delta,
            policy_code: None,
            created_at: Utc::now(),
        }
    }

    /// 创建一条积分兑换流水
    pub fn redemption(
        customer_id: String,
        description: String,
        point_delta: i64,
        policy_code: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            customer_id,
            kind: EntryKind::Redemption,
            description,
            point_delta,
            policy_code,
            created_at: Utc::now(),
        }
    }
}

/// 积分余额投影
///
/// 每个客户一行，主键即客户 ID。随客户创建时零初始化，
/// 只能通过流水追加协议更新，任何时刻都等于该客户全部流水之和
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PointBalance {
    /// 客户 ID
    pub customer_id: String,
    /// 当前积分
    pub current_points: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_redemption_amount() {
        let policy = ConversionPolicy {
            code: "QD001".to_string(),
            point_value: 100,
            monetary_value: dec("50.00"),
        };

        assert_eq!(policy.redemption_amount(100), dec("50.00"));
        assert_eq!(policy.redemption_amount(200), dec("100.00"));
        assert_eq!(policy.redemption_amount(50), dec("25.00"));
    }

    #[test]
    fn test_redemption_amount_rounds_to_two_digits() {
        let policy = ConversionPolicy {
            code: "QD002".to_string(),
            point_value: 3,
            monetary_value: dec("1.00"),
        };

        // 1/3 元折算后保留两位小数
        assert_eq!(policy.redemption_amount(1), dec("0.33"));
    }

    #[test]
    fn test_ledger_entry_builders() {
        let entry = LedgerEntry::accrual("KH001".to_string(), "消费赠送".to_string(), 100);
        assert_eq!(entry.kind, EntryKind::Accrual);
        assert_eq!(entry.point_delta, 100);
        assert!(entry.policy_code.is_none());
        assert!(!entry.id.is_empty());

        let entry = LedgerEntry::redemption(
            "KH001".to_string(),
            "积分抵扣".to_string(),
            -100,
            Some("QD001".to_string()),
        );
        assert_eq!(entry.kind, EntryKind::Redemption);
        assert_eq!(entry.point_delta, -100);
        assert_eq!(entry.policy_code, Some("QD001".to_string()));
    }

    #[test]
    fn test_ledger_entry_ids_are_unique() {
        let a = LedgerEntry::accrual("KH001".to_string(), "a".to_string(), 1);
        let b = LedgerEntry::accrual("KH001".to_string(), "b".to_string(), 1);
        assert_ne!(a.id, b.id);
    }
}
