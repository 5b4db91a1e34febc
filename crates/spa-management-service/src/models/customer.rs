//! 客户实体定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 客户账号
///
/// 积分余额投影与客户一一对应，随客户创建、随客户删除
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// 客户编码（主键，5 位，如 KH001）
    pub id: String,
    /// 姓名
    pub full_name: String,
    /// 注册邮箱（唯一）
    pub email: String,
    /// 手机号（10 位）
    pub phone: String,
    /// 密码哈希（bcrypt）
    pub password_hash: String,
    /// 注册时间
    pub created_at: DateTime<Utc>,
}
