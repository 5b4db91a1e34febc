//! 密码处理
//!
//! 提供密码哈希和验证功能。客户和员工两类账号共用此模块，
//! 避免在各实体内重复实现哈希逻辑。

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::error::{Result, SharedError};

/// 对密码进行哈希处理
///
/// 使用 bcrypt 算法生成密码哈希
pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST).map_err(|e| SharedError::PasswordHash(e.to_string()))
}

/// 验证密码
///
/// 比较明文密码与存储的哈希值
pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
    verify(password, hashed).map_err(|e| SharedError::PasswordHash(e.to_string()))
}
