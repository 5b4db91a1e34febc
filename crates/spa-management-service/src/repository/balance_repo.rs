//! 积分余额仓储
//!
//! 余额是流水的派生投影。写路径只有三条：
//! 随客户创建的零初始化、追加协议里的守卫式原子增量、
//! 以及管理用的按流水重算。绝不提供直接赋值接口。

use sqlx::{SqliteConnection, SqlitePool};

use crate::error::Result;
use crate::models::PointBalance;

/// 积分余额仓储
pub struct BalanceRepository {
    pool: SqlitePool,
}

impl BalanceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 查询客户余额
    pub async fn get(&self, customer_id: &str) -> Result<Option<PointBalance>> {
        let balance = sqlx::query_as::<_, PointBalance>(
            "SELECT customer_id, current_points FROM point_balances WHERE customer_id = ?",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(balance)
    }

    /// 在事务中查询客户余额
    pub async fn get_in_tx(
        tx: &mut SqliteConnection,
        customer_id: &str,
    ) -> Result<Option<PointBalance>> {
        let balance = sqlx::query_as::<_, PointBalance>(
            "SELECT customer_id, current_points FROM point_balances WHERE customer_id = ?",
        )
        .bind(customer_id)
        .fetch_optional(tx)
        .await?;

        Ok(balance)
    }

    /// 在事务中创建零初始化余额行
    ///
    /// 仅由客户创建流程调用，与客户插入同事务提交
    pub async fn create_zero_in_tx(tx: &mut SqliteConnection, customer_id: &str) -> Result<()> {
        sqlx::query("INSERT INTO point_balances (customer_id, current_points) VALUES (?, 0)")
            .bind(customer_id)
            .execute(tx)
            .await?;

        Ok(())
    }

    /// 在事务中对余额做守卫式原子增量
    ///
    /// 校验与更新是同一条 SQL：只有结果不为负时才会命中行，
    /// 由存储层求值 `current_points + delta`，不经过应用层读改写，
    /// 并发追加不会基于过期余额双双通过校验。
    /// 返回 false 表示余额不足或余额行不存在。
    pub async fn try_apply_delta_in_tx(
        tx: &mut SqliteConnection,
        customer_id: &str,
        delta: i64,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE point_balances
            SET current_points = current_points + ?1
            WHERE customer_id = ?2 AND current_points + ?1 >= 0
            "#,
        )
        .bind(delta)
        .bind(customer_id)
        .execute(tx)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 按流水重算客户余额（管理操作）
    ///
    /// 投影出现漂移时的恢复手段，把余额重置为流水之和。
    /// 返回重算后的余额，客户无余额行时返回 None。
    pub async fn recompute_from_ledger(&self, customer_id: &str) -> Result<Option<i64>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE point_balances
            SET current_points = (
                SELECT COALESCE(SUM(point_delta), 0)
                FROM ledger_entries
                WHERE customer_id = ?1
            )
            WHERE customer_id = ?1
            "#,
        )
        .bind(customer_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.commit().await?;
            return Ok(None);
        }

        let current: i64 =
            sqlx::query_scalar("SELECT current_points FROM point_balances WHERE customer_id = ?")
                .bind(customer_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;

        Ok(Some(current))
    }

    /// 统计客户的余额行数
    ///
    /// 正常情况下恒为 0 或 1，测试用于验证创建钩子不会重复建行
    pub async fn count_for_customer(&self, customer_id: &str) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM point_balances WHERE customer_id = ?")
                .bind(customer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
