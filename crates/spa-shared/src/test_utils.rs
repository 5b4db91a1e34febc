//! 测试工具模块
//!
//! 提供集成测试所需的辅助函数和测试数据生成器，
//! 用于简化测试代码编写，提高测试的可重复性。

use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use crate::config::DatabaseConfig;

/// 创建测试用数据库配置
///
/// 使用进程内 SQLite。连接数固定为 1：sqlx 的 `sqlite::memory:`
/// 会为池中每个连接创建独立的内存库，单连接保证所有语句
/// 落在同一个库上。
pub fn test_database_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_timeout_seconds: 10,
        busy_timeout_seconds: 5,
    }
}

/// 生成唯一的 5 位测试编码
///
/// 使用原子计数器确保并行测试时的唯一性，如 unique_code('K') -> "K0001"
pub fn unique_code(prefix: char) -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(1);
    let n = COUNTER.fetch_add(1, Ordering::SeqCst) % 10_000;
    format!("{}{:04}", prefix, n)
}

/// 固定的测试时间戳
///
/// 需要确定性时间的断言使用此值而非 Utc::now()
pub fn test_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
}
