//! 内容实体定义
//!
//! FAQ 与博客文章，由员工维护，带展示开关

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 常见问题
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    /// 问题编码（主键，5 位）
    pub id: String,
    /// 维护人
    pub staff_id: String,
    /// 问题（不超过 300 字符）
    pub question: String,
    /// 答案
    pub answer: String,
    /// 最近更新时间（服务端赋值）
    pub updated_at: DateTime<Utc>,
    /// 展示状态
    pub visible: bool,
}

/// 博客文章
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// 文章编码（主键，5 位）
    pub id: String,
    /// 发布人
    pub staff_id: String,
    /// 标题
    pub title: String,
    /// 正文
    pub body: String,
    /// 发布时间（服务端赋值）
    pub published_at: DateTime<Utc>,
    /// 展示状态
    pub visible: bool,
}
