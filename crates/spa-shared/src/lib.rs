//! 共享库
//!
//! 包含数据层各服务共用的配置、错误处理、数据库连接、密码哈希等基础设施代码。

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod password;
pub mod test_utils;
