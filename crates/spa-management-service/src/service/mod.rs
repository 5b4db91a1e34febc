//! 业务服务层
//!
//! 请求校验、密码哈希、服务端时间戳赋值、
//! 跨仓储事务编排都在这一层完成。

mod account_service;
pub mod dto;
mod loyalty_service;
mod policy_service;
mod records_service;

pub use account_service::AccountService;
pub use loyalty_service::LoyaltyService;
pub use policy_service::PolicyService;
pub use records_service::RecordsService;
