//! 枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化，
//! 在 SQLite 中以 TEXT 形式存储。

use serde::{Deserialize, Serialize};

/// 积分流水类型
///
/// 区分积分的获取与消耗，决定流水金额的符号约定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryKind {
    /// 积分累计（+）- 消费、活动等获得积分
    Accrual,
    /// 积分兑换（-）- 用积分抵扣消费金额
    Redemption,
}

impl EntryKind {
    /// 返回该流水类型约定的金额符号
    ///
    /// 正数表示增加，负数表示减少
    pub fn sign(&self) -> i64 {
        match self {
            Self::Accrual => 1,
            Self::Redemption => -1,
        }
    }

    /// 检查流水金额的符号是否与类型约定一致
    pub fn matches_delta(&self, point_delta: i64) -> bool {
        point_delta != 0 && point_delta.signum() == self.sign()
    }
}

/// 预约状态
///
/// 仅作为记录字段，状态之间的流转由上层业务控制
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    /// 等待中 - 已预约，尚未开始
    #[default]
    Pending,
    /// 进行中 - 服务正在执行
    InProgress,
    /// 已完成
    Completed,
    /// 已取消
    Cancelled,
}

impl AppointmentStatus {
    /// 是否为终态（完成或取消）
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// 员工角色
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffRole {
    /// 管理员
    Admin,
    /// 客服专员
    #[default]
    CustomerCare,
    /// 美容师
    Therapist,
}
