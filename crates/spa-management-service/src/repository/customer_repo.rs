//! 客户仓储
//!
//! 客户创建与积分余额的零初始化在同一事务内完成（显式两步构造，
//! 而非隐式的创建后信号），保证每个客户恰好有一行余额投影。

use sqlx::SqlitePool;

use super::balance_repo::BalanceRepository;
use crate::error::{Result, SpaError};
use crate::models::Customer;

/// 客户仓储
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建客户并零初始化积分余额
    ///
    /// 两次插入同事务提交。仅在首次创建时建余额行，
    /// 后续资料更新（见 update_profile）不会触碰余额。
    pub async fn create(&self, customer: &Customer) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let id_taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?)")
            .bind(&customer.id)
            .fetch_one(&mut *tx)
            .await?;
        if id_taken {
            return Err(SpaError::AlreadyExists {
                entity: "Customer",
                id: customer.id.clone(),
            });
        }

        let email_taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE email = ?)")
                .bind(&customer.email)
                .fetch_one(&mut *tx)
                .await?;
        if email_taken {
            return Err(SpaError::AlreadyExists {
                entity: "Customer",
                id: customer.email.clone(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO customers (id, full_name, email, phone, password_hash, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&customer.id)
        .bind(&customer.full_name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(&customer.password_hash)
        .bind(customer.created_at)
        .execute(&mut *tx)
        .await?;

        BalanceRepository::create_zero_in_tx(&mut tx, &customer.id).await?;

        tx.commit().await?;

        Ok(())
    }

    /// 按编码查询客户
    pub async fn get(&self, id: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, email, phone, password_hash, created_at
            FROM customers
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 按邮箱查询客户
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT id, full_name, email, phone, password_hash, created_at
            FROM customers
            WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// 更新客户资料
    ///
    /// 只更新姓名与手机号，不触碰余额行。返回是否存在该客户。
    pub async fn update_profile(&self, id: &str, full_name: &str, phone: &str) -> Result<bool> {
        let result = sqlx::query("UPDATE customers SET full_name = ?, phone = ? WHERE id = ?")
            .bind(full_name)
            .bind(phone)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 删除客户
    ///
    /// 级联删除：流水、余额行、预约随客户一并删除，
    /// 显式按依赖顺序在同一事务内执行。返回是否存在该客户。
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM ledger_entries WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM appointments WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM point_balances WHERE customer_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM customers WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(result.rows_affected() > 0)
    }
}
