//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ConversionPolicy;

/// 兑换规则仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversionPolicyRepositoryTrait: Send + Sync {
    async fn get(&self, code: &str) -> Result<Option<ConversionPolicy>>;
    async fn list(&self) -> Result<Vec<ConversionPolicy>>;
    async fn insert(&self, policy: &ConversionPolicy) -> Result<()>;
    /// 返回是否存在该编码的规则被更新
    async fn update(&self, policy: &ConversionPolicy) -> Result<bool>;
    /// 删除规则并清空历史流水上的引用，返回是否存在该规则
    async fn delete_clearing_references(&self, code: &str) -> Result<bool>;
}
