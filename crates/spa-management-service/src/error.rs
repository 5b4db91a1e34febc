//! 数据层错误类型
//!
//! 定义业务错误和系统错误。业务错误均为可恢复错误，由调用方处理；
//! 存储层不可用视为致命错误，原样向上传播。

use thiserror::Error;

/// 数据层错误类型
#[derive(Debug, Error)]
pub enum SpaError {
    // === 积分相关错误 ===
    #[error("积分余额不足: 需要 {required}, 可用 {available}")]
    InsufficientBalance { required: i64, available: i64 },

    #[error("积分余额不存在: customer_id={0}")]
    BalanceNotFound(String),

    // === 兑换规则相关错误 ===
    #[error("兑换规则不存在: {0}")]
    PolicyNotFound(String),

    #[error("兑换规则编码已存在: {0}")]
    DuplicateCode(String),

    // === 账号与记录相关错误 ===
    #[error("客户不存在: {0}")]
    CustomerNotFound(String),

    #[error("员工不存在: {0}")]
    StaffNotFound(String),

    #[error("服务不存在: {0}")]
    ServiceNotFound(String),

    #[error("服务分类不存在: {0}")]
    CategoryNotFound(String),

    #[error("预约不存在: {0}")]
    AppointmentNotFound(String),

    #[error("记录已存在: {entity} id={id}")]
    AlreadyExists { entity: &'static str, id: String },

    // === 验证错误 ===
    #[error("参数校验失败: {0}")]
    Validation(String),

    // === 系统错误 ===
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 数据层 Result 类型别名
pub type Result<T> = std::result::Result<T, SpaError>;

impl SpaError {
    /// 检查是否为业务错误（非系统错误）
    pub fn is_business_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Internal(_))
    }

    /// 获取错误码（用于上层接口响应）
    pub fn code(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "INSUFFICIENT_BALANCE",
            Self::BalanceNotFound(_) => "BALANCE_NOT_FOUND",
            Self::PolicyNotFound(_) => "POLICY_NOT_FOUND",
            Self::DuplicateCode(_) => "DUPLICATE_CODE",
            Self::CustomerNotFound(_) => "CUSTOMER_NOT_FOUND",
            Self::StaffNotFound(_) => "STAFF_NOT_FOUND",
            Self::ServiceNotFound(_) => "SERVICE_NOT_FOUND",
            Self::CategoryNotFound(_) => "CATEGORY_NOT_FOUND",
            Self::AppointmentNotFound(_) => "APPOINTMENT_NOT_FOUND",
            Self::AlreadyExists { .. } => "ALREADY_EXISTS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for SpaError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<spa_shared::error::SharedError> for SpaError {
    fn from(err: spa_shared::error::SharedError) -> Self {
        use spa_shared::error::SharedError;
        match err {
            SharedError::Database(e) => Self::Database(e),
            other => Self::Internal(other.to_string()),
        }
    }
}
