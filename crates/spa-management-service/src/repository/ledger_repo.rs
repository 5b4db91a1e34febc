//! 积分流水仓储
//!
//! 流水只有插入和查询：没有更新或删除路径，
//! 更正通过追加冲销流水完成。

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::LedgerEntry;

/// 积分流水仓储
pub struct LedgerRepository {
    pool: SqlitePool,
}

impl LedgerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 在事务中插入流水记录
    ///
    /// 追加协议要求流水与余额更新同事务提交，因此只提供事务版本
    pub async fn create_in_tx(tx: &mut SqliteConnection, entry: &LedgerEntry) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ledger_entries
                (id, customer_id, kind, description, point_delta, policy_code, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.customer_id)
        .bind(entry.kind)
        .bind(&entry.description)
        .bind(entry.point_delta)
        .bind(&entry.policy_code)
        .bind(entry.created_at)
        .execute(tx)
        .await?;

        Ok(())
    }

    /// 按 ID 查询流水
    pub async fn get(&self, id: &str) -> Result<Option<LedgerEntry>> {
        let entry = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, customer_id, kind, description, point_delta, policy_code, created_at
            FROM ledger_entries
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// 列出客户的流水记录
    ///
    /// 按时间倒序排列，返回最近的 limit 条记录
    pub async fn list_by_customer(&self, customer_id: &str, limit: i64) -> Result<Vec<LedgerEntry>> {
        let entries = sqlx::query_as::<_, LedgerEntry>(
            r#"
            SELECT id, customer_id, kind, description, point_delta, policy_code, created_at
            FROM ledger_entries
            WHERE customer_id = ?
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// 汇总客户全部流水的积分变动
    ///
    /// 用于审计核对余额投影，无流水时返回 0
    pub async fn sum_for_customer(&self, customer_id: &str) -> Result<i64> {
        let sum: i64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(point_delta), 0)
            FROM ledger_entries
            WHERE customer_id = ?
            "#,
        )
        .bind(customer_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(sum)
    }

    /// 统计客户的流水条数
    pub async fn count_for_customer(&self, customer_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM ledger_entries WHERE customer_id = ?")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
