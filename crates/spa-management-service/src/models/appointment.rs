//! 预约实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;

/// 预约记录
///
/// 静态记录：只保存预约信息和状态字段，
/// 不做时段冲突检测，也不做并发预约处理
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// 预约编码（主键，5 位，如 LH001）
    pub id: String,
    /// 预约客户
    pub customer_id: String,
    /// 服务员工
    pub staff_id: String,
    /// 预约的服务项目
    pub service_id: String,
    /// 下单时间（服务端赋值）
    pub booked_at: DateTime<Utc>,
    /// 实际服务时间
    pub scheduled_at: DateTime<Utc>,
    /// 预约状态
    pub status: AppointmentStatus,
}
