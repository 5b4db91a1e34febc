//! 预约仓储
//!
//! 预约是静态记录：创建、查询、改状态。
//! 没有时段冲突检测，也没有并发预约处理。

use sqlx::SqlitePool;

use crate::error::{Result, SpaError};
use crate::models::{Appointment, AppointmentStatus};

/// 预约仓储
pub struct AppointmentRepository {
    pool: SqlitePool,
}

impl AppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 创建预约
    ///
    /// 客户、员工、服务项目三个引用都必须已存在
    pub async fn create(&self, appointment: &Appointment) -> Result<()> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM appointments WHERE id = ?)")
                .bind(&appointment.id)
                .fetch_one(&self.pool)
                .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "Appointment",
                id: appointment.id.clone(),
            });
        }

        let customer_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM customers WHERE id = ?)")
                .bind(&appointment.customer_id)
                .fetch_one(&self.pool)
                .await?;
        if !customer_exists {
            return Err(SpaError::CustomerNotFound(appointment.customer_id.clone()));
        }

        let staff_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE id = ?)")
                .bind(&appointment.staff_id)
                .fetch_one(&self.pool)
                .await?;
        if !staff_exists {
            return Err(SpaError::StaffNotFound(appointment.staff_id.clone()));
        }

        let service_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE id = ?)")
                .bind(&appointment.service_id)
                .fetch_one(&self.pool)
                .await?;
        if !service_exists {
            return Err(SpaError::ServiceNotFound(appointment.service_id.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO appointments
                (id, customer_id, staff_id, service_id, booked_at, scheduled_at, status)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.id)
        .bind(&appointment.customer_id)
        .bind(&appointment.staff_id)
        .bind(&appointment.service_id)
        .bind(appointment.booked_at)
        .bind(appointment.scheduled_at)
        .bind(appointment.status)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按编码查询预约
    pub async fn get(&self, id: &str) -> Result<Option<Appointment>> {
        let appointment = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, customer_id, staff_id, service_id, booked_at, scheduled_at, status
            FROM appointments
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    /// 更新预约状态，返回是否存在该预约
    pub async fn update_status(&self, id: &str, status: AppointmentStatus) -> Result<bool> {
        let result = sqlx::query("UPDATE appointments SET status = ? WHERE id = ?")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 列出客户的预约
    ///
    /// 按服务时间倒序排列
    pub async fn list_by_customer(&self, customer_id: &str) -> Result<Vec<Appointment>> {
        let appointments = sqlx::query_as::<_, Appointment>(
            r#"
            SELECT id, customer_id, staff_id, service_id, booked_at, scheduled_at, status
            FROM appointments
            WHERE customer_id = ?
            ORDER BY scheduled_at DESC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(appointments)
    }
}
