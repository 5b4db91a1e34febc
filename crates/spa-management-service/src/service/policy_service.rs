//! 兑换规则服务
//!
//! 规则的增删改查。规则是"多少积分可抵扣多少金额"的命名配置，
//! 修改立即对后续兑换生效，历史流水不受影响（流水不快照兑换比例）。

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{Result, SpaError};
use crate::models::ConversionPolicy;
use crate::repository::ConversionPolicyRepositoryTrait;
use crate::service::dto::CreatePolicyRequest;

/// 兑换规则服务
pub struct PolicyService<R>
where
    R: ConversionPolicyRepositoryTrait,
{
    repo: Arc<R>,
}

impl<R> PolicyService<R>
where
    R: ConversionPolicyRepositoryTrait,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// 创建兑换规则
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn create_policy(&self, request: CreatePolicyRequest) -> Result<ConversionPolicy> {
        request.validate()?;
        validate_monetary_value(request.monetary_value)?;

        if self.repo.get(&request.code).await?.is_some() {
            return Err(SpaError::DuplicateCode(request.code));
        }

        let policy = ConversionPolicy {
            code: request.code,
            point_value: request.point_value,
            monetary_value: request.monetary_value,
        };
        self.repo.insert(&policy).await?;

        info!(code = %policy.code, "兑换规则已创建");

        Ok(policy)
    }

    /// 更新既有规则的兑换比例
    ///
    /// 只影响之后的兑换折算，已写入的流水保持原值
    #[instrument(skip(self, request), fields(code = %request.code))]
    pub async fn update_policy(&self, request: CreatePolicyRequest) -> Result<ConversionPolicy> {
        request.validate()?;
        validate_monetary_value(request.monetary_value)?;

        let policy = ConversionPolicy {
            code: request.code,
            point_value: request.point_value,
            monetary_value: request.monetary_value,
        };
        if !self.repo.update(&policy).await? {
            return Err(SpaError::PolicyNotFound(policy.code));
        }

        info!(code = %policy.code, "兑换规则已更新");

        Ok(policy)
    }

    /// 删除规则
    ///
    /// 引用该规则的历史流水保留，仅把规则引用置空
    #[instrument(skip(self))]
    pub async fn delete_policy(&self, code: &str) -> Result<()> {
        if !self.repo.delete_clearing_references(code).await? {
            return Err(SpaError::PolicyNotFound(code.to_string()));
        }

        info!(code, "兑换规则已删除，历史流水引用已置空");

        Ok(())
    }

    /// 按编码查询规则
    #[instrument(skip(self))]
    pub async fn get_policy(&self, code: &str) -> Result<ConversionPolicy> {
        self.repo
            .get(code)
            .await?
            .ok_or_else(|| SpaError::PolicyNotFound(code.to_string()))
    }

    /// 列出全部规则
    #[instrument(skip(self))]
    pub async fn list_policies(&self) -> Result<Vec<ConversionPolicy>> {
        self.repo.list().await
    }

    /// 按规则折算一笔积分对应的抵扣金额
    #[instrument(skip(self))]
    pub async fn redemption_amount(&self, code: &str, points: i64) -> Result<Decimal> {
        let policy = self.get_policy(code).await?;
        Ok(policy.redemption_amount(points))
    }
}

/// 金额必须非负且不超过两位小数
fn validate_monetary_value(value: Decimal) -> Result<()> {
    if value.is_sign_negative() {
        return Err(SpaError::Validation(format!("抵扣金额不能为负: {}", value)));
    }
    if value.normalize().scale() > 2 {
        return Err(SpaError::Validation(format!(
            "抵扣金额最多两位小数: {}",
            value
        )));
    }
    Ok(())
}
