//! 员工仓储

use sqlx::SqlitePool;

use crate::error::{Result, SpaError};
use crate::models::Staff;

/// 员工仓储
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建员工
    pub async fn create(&self, staff: &Staff) -> Result<()> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM staff WHERE id = ? OR email = ? OR phone = ?)",
        )
        .bind(&staff.id)
        .bind(&staff.email)
        .bind(&staff.phone)
        .fetch_one(&self.pool)
        .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "Staff",
                id: staff.id.clone(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO staff (id, full_name, email, phone, password_hash, role, active)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&staff.id)
        .bind(&staff.full_name)
        .bind(&staff.email)
        .bind(&staff.phone)
        .bind(&staff.password_hash)
        .bind(staff.role)
        .bind(staff.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按编码查询员工
    pub async fn get(&self, id: &str) -> Result<Option<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, full_name, email, phone, password_hash, role, active
            FROM staff
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(staff)
    }

    /// 列出在职员工
    pub async fn list_active(&self) -> Result<Vec<Staff>> {
        let staff = sqlx::query_as::<_, Staff>(
            r#"
            SELECT id, full_name, email, phone, password_hash, role, active
            FROM staff
            WHERE active = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// 设置在职状态，返回是否存在该员工
    pub async fn set_active(&self, id: &str, active: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE staff SET active = ? WHERE id = ?")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
