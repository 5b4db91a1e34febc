//! 积分服务
//!
//! 处理积分流水追加的核心业务逻辑，包括：
//! - 请求校验（编码格式、描述长度、符号约定）
//! - 兑换规则存在性检查
//! - 守卫式余额增量（校验与更新同一条 SQL）
//! - 事务性写入（流水、余额投影）
//!
//! ## 追加协议
//!
//! 1. 字段校验 -> 2. 符号约定检查 -> 3. 开启事务 -> 4. 规则存在性检查
//!    -> 5. 守卫式余额增量 -> 6. 插入流水 -> 7. 提交
//!
//! 任何一步失败整体回滚：不会出现有流水无余额变更、
//! 或有余额变更无流水的中间状态。

use sqlx::SqlitePool;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{Result, SpaError};
use crate::models::{LedgerEntry, PointBalance};
use crate::repository::{BalanceRepository, LedgerRepository};
use crate::service::dto::AppendEntryRequest;

/// 积分服务
///
/// 积分流水与余额投影的唯一写入口。余额的一致性
/// （任何时刻等于流水之和、永不为负）由本服务的追加协议保证。
#[derive(Clone)]
pub struct LoyaltyService {
    pool: SqlitePool,
}

impl LoyaltyService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 追加一条积分流水并同步更新余额投影
    ///
    /// 余额校验由存储层的守卫式更新完成：只有结果不为负时才命中行，
    /// 并发追加不会基于过期余额双双通过校验。
    /// 返回写入的流水记录。
    #[instrument(skip(self, request), fields(customer_id = %request.customer_id, point_delta = request.point_delta))]
    pub async fn append_entry(&self, request: AppendEntryRequest) -> Result<LedgerEntry> {
        request.validate()?;

        if !request.kind.matches_delta(request.point_delta) {
            return Err(SpaError::Validation(format!(
                "流水类型 {:?} 与积分变动值 {} 的符号不一致",
                request.kind, request.point_delta
            )));
        }

        let mut tx = self.pool.begin().await?;

        // 规则引用必须指向现存规则；规则删除后历史流水引用置空，新流水不允许悬空引用
        if let Some(code) = &request.policy_code {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM conversion_policies WHERE code = ?)")
                    .bind(code)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                return Err(SpaError::PolicyNotFound(code.clone()));
            }
        }

        let applied =
            BalanceRepository::try_apply_delta_in_tx(&mut tx, &request.customer_id, request.point_delta)
                .await?;
        if !applied {
            // 没有命中行：区分余额不足与余额行不存在
            return match BalanceRepository::get_in_tx(&mut tx, &request.customer_id).await? {
                Some(balance) => Err(SpaError::InsufficientBalance {
                    required: request.point_delta.abs(),
                    available: balance.current_points,
                }),
                None => Err(SpaError::BalanceNotFound(request.customer_id)),
            };
        }

        let entry = LedgerEntry {
            id: uuid::Uuid::new_v4().to_string(),
            customer_id: request.customer_id,
            kind: request.kind,
            description: request.description,
            point_delta: request.point_delta,
            policy_code: request.policy_code,
            created_at: chrono::Utc::now(),
        };
        LedgerRepository::create_in_tx(&mut tx, &entry).await?;

        tx.commit().await?;

        info!(
            entry_id = %entry.id,
            customer_id = %entry.customer_id,
            point_delta = entry.point_delta,
            "积分流水已追加"
        );

        Ok(entry)
    }

    /// 查询客户当前余额
    #[instrument(skip(self))]
    pub async fn get_balance(&self, customer_id: &str) -> Result<PointBalance> {
        BalanceRepository::new(self.pool.clone())
            .get(customer_id)
            .await?
            .ok_or_else(|| SpaError::BalanceNotFound(customer_id.to_string()))
    }

    /// 按流水重算客户余额（管理操作）
    ///
    /// 投影出现漂移时的恢复手段。返回重算后的余额。
    #[instrument(skip(self))]
    pub async fn recompute_balance(&self, customer_id: &str) -> Result<i64> {
        let recomputed = BalanceRepository::new(self.pool.clone())
            .recompute_from_ledger(customer_id)
            .await?
            .ok_or_else(|| SpaError::BalanceNotFound(customer_id.to_string()))?;

        info!(customer_id, current_points = recomputed, "余额已按流水重算");

        Ok(recomputed)
    }

    /// 列出客户最近的流水记录，按时间倒序
    #[instrument(skip(self))]
    pub async fn list_entries(&self, customer_id: &str, limit: i64) -> Result<Vec<LedgerEntry>> {
        LedgerRepository::new(self.pool.clone())
            .list_by_customer(customer_id, limit)
            .await
    }
}
