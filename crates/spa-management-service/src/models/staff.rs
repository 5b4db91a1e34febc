//! 员工实体定义

use serde::{Deserialize, Serialize};

use super::enums::StaffRole;

/// 员工账号
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    /// 员工编码（主键，5 位，如 NV001）
    pub id: String,
    /// 姓名
    pub full_name: String,
    /// 邮箱（唯一）
    pub email: String,
    /// 手机号（唯一）
    pub phone: String,
    /// 密码哈希（bcrypt）
    pub password_hash: String,
    /// 角色
    pub role: StaffRole,
    /// 在职状态
    pub active: bool,
}
