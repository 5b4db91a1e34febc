//! 水疗馆经营数据层
//!
//! 覆盖门店经营的核心记录与积分子系统：
//! - **积分子系统**：兑换规则、只增不改的积分流水、余额投影。
//!   余额任何时刻等于流水之和且永不为负，由追加协议保证。
//! - **账号**：客户与员工，bcrypt 密码哈希，客户注册即零初始化余额。
//! - **经营记录**：服务目录、预约、FAQ 与博客，均为静态记录存储。
//!
//! ## 模块划分
//!
//! - [`models`] - 领域模型与枚举
//! - [`repository`] - 数据库仓储层
//! - [`service`] - 业务服务层（校验与事务编排）
//! - [`error`] - 错误类型

pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use error::{Result, SpaError};
pub use models::{
    Appointment, AppointmentStatus, BlogPost, ConversionPolicy, Customer, EntryKind, Faq,
    LedgerEntry, PointBalance, ServiceCategory, SpaService, Staff, StaffRole,
};
pub use service::{AccountService, LoyaltyService, PolicyService, RecordsService};

/// 数据库迁移集，嵌入 `migrations/` 目录
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();
