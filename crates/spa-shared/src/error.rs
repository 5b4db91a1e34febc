//! 基础设施错误类型
//!
//! 定义共享基础设施（配置、数据库连接、密码哈希）的错误类型，
//! 使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 基础设施错误
#[derive(Debug, Error)]
pub enum SharedError {
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("数据库迁移失败: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("配置加载失败: {0}")]
    Config(#[from] config::ConfigError),

    #[error("密码哈希失败: {0}")]
    PasswordHash(String),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, SharedError>;

impl SharedError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Database(_) => "DATABASE_ERROR",
            Self::Migration(_) => "MIGRATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::PasswordHash(_) => "PASSWORD_HASH_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
