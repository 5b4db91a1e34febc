//! 兑换规则仓储
//!
//! 金额以"分"为单位整数存储，读取时还原为两位小数，
//! 避免浮点精度问题。

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use super::traits::ConversionPolicyRepositoryTrait;
use crate::error::{Result, SpaError};
use crate::models::ConversionPolicy;

/// 兑换规则仓储
pub struct ConversionPolicyRepository {
    pool: SqlitePool,
}

impl ConversionPolicyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 按编码查询规则
    pub async fn get(&self, code: &str) -> Result<Option<ConversionPolicy>> {
        let row = sqlx::query(
            r#"
            SELECT code, point_value, monetary_value_cents
            FROM conversion_policies
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        row.map(policy_from_row).transpose()
    }

    /// 列出全部规则
    pub async fn list(&self) -> Result<Vec<ConversionPolicy>> {
        let rows = sqlx::query(
            r#"
            SELECT code, point_value, monetary_value_cents
            FROM conversion_policies
            ORDER BY code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(policy_from_row).collect()
    }

    /// 插入新规则
    pub async fn insert(&self, policy: &ConversionPolicy) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO conversion_policies (code, point_value, monetary_value_cents)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&policy.code)
        .bind(policy.point_value)
        .bind(to_cents(policy.monetary_value)?)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 更新既有规则的兑换比例
    pub async fn update(&self, policy: &ConversionPolicy) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE conversion_policies
            SET point_value = ?, monetary_value_cents = ?
            WHERE code = ?
            "#,
        )
        .bind(policy.point_value)
        .bind(to_cents(policy.monetary_value)?)
        .bind(&policy.code)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除规则并清空历史流水上的引用
    ///
    /// 引用该规则的流水保留，仅把 policy_code 置空；
    /// 两步在同一事务内完成
    pub async fn delete_clearing_references(&self, code: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE ledger_entries SET policy_code = NULL WHERE policy_code = ?")
            .bind(code)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM conversion_policies WHERE code = ?")
            .bind(code)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ConversionPolicyRepositoryTrait for ConversionPolicyRepository {
    async fn get(&self, code: &str) -> Result<Option<ConversionPolicy>> {
        self.get(code).await
    }

    async fn list(&self) -> Result<Vec<ConversionPolicy>> {
        self.list().await
    }

    async fn insert(&self, policy: &ConversionPolicy) -> Result<()> {
        self.insert(policy).await
    }

    async fn update(&self, policy: &ConversionPolicy) -> Result<bool> {
        self.update(policy).await
    }

    async fn delete_clearing_references(&self, code: &str) -> Result<bool> {
        self.delete_clearing_references(code).await
    }
}

fn policy_from_row(row: SqliteRow) -> Result<ConversionPolicy> {
    let cents: i64 = row.get("monetary_value_cents");
    Ok(ConversionPolicy {
        code: row.get("code"),
        point_value: row.get("point_value"),
        monetary_value: Decimal::new(cents, 2),
    })
}

/// 金额转为分
///
/// 调用方保证金额非负且不超过两位小数
fn to_cents(value: Decimal) -> Result<i64> {
    (value * Decimal::from(100))
        .to_i64()
        .ok_or_else(|| SpaError::Internal(format!("金额超出可存储范围: {}", value)))
}
