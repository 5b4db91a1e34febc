//! 服务目录实体定义
//!
//! 包含服务分类与具体服务项目，均为普通记录存储

use serde::{Deserialize, Serialize};

/// 服务分类
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    /// 分类编码（主键，5 位，如 DM001）
    pub id: String,
    /// 分类名称
    pub name: String,
    /// 分类描述
    #[sqlx(default)]
    pub description: Option<String>,
}

/// 服务项目
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SpaService {
    /// 服务编码（主键，5 位，如 DV001）
    pub id: String,
    /// 所属分类
    pub category_id: String,
    /// 服务名称
    pub name: String,
    /// 服务描述（内容、流程、价格等）
    pub description: String,
    /// 展示状态（true = 在营业中展示）
    pub visible: bool,
}
