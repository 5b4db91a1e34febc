//! 内容仓储
//!
//! FAQ 与博客文章的记录存储，带展示开关。

use sqlx::SqlitePool;

use crate::error::{Result, SpaError};
use crate::models::{BlogPost, Faq};

/// 内容仓储
pub struct ContentRepository {
    pool: SqlitePool,
}

impl ContentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== FAQ ====================

    /// 创建 FAQ
    pub async fn create_faq(&self, faq: &Faq) -> Result<()> {
        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM faqs WHERE id = ?)")
            .bind(&faq.id)
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "Faq",
                id: faq.id.clone(),
            });
        }

        let staff_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE id = ?)")
                .bind(&faq.staff_id)
                .fetch_one(&self.pool)
                .await?;
        if !staff_exists {
            return Err(SpaError::StaffNotFound(faq.staff_id.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO faqs (id, staff_id, question, answer, updated_at, visible)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&faq.id)
        .bind(&faq.staff_id)
        .bind(&faq.question)
        .bind(&faq.answer)
        .bind(faq.updated_at)
        .bind(faq.visible)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按编码查询 FAQ
    pub async fn get_faq(&self, id: &str) -> Result<Option<Faq>> {
        let faq = sqlx::query_as::<_, Faq>(
            "SELECT id, staff_id, question, answer, updated_at, visible FROM faqs WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(faq)
    }

    /// 列出展示中的 FAQ
    pub async fn list_visible_faqs(&self) -> Result<Vec<Faq>> {
        let faqs = sqlx::query_as::<_, Faq>(
            r#"
            SELECT id, staff_id, question, answer, updated_at, visible
            FROM faqs
            WHERE visible = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(faqs)
    }

    /// 设置 FAQ 展示状态，返回是否存在
    pub async fn set_faq_visibility(&self, id: &str, visible: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE faqs SET visible = ? WHERE id = ?")
            .bind(visible)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ==================== 博客 ====================

    /// 发布博客文章
    pub async fn create_post(&self, post: &BlogPost) -> Result<()> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM blog_posts WHERE id = ?)")
                .bind(&post.id)
                .fetch_one(&self.pool)
                .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "BlogPost",
                id: post.id.clone(),
            });
        }

        let staff_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM staff WHERE id = ?)")
                .bind(&post.staff_id)
                .fetch_one(&self.pool)
                .await?;
        if !staff_exists {
            return Err(SpaError::StaffNotFound(post.staff_id.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO blog_posts (id, staff_id, title, body, published_at, visible)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&post.id)
        .bind(&post.staff_id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.published_at)
        .bind(post.visible)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按编码查询博客文章
    pub async fn get_post(&self, id: &str) -> Result<Option<BlogPost>> {
        let post = sqlx::query_as::<_, BlogPost>(
            "SELECT id, staff_id, title, body, published_at, visible FROM blog_posts WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// 列出展示中的博客文章
    ///
    /// 按发布时间倒序排列
    pub async fn list_visible_posts(&self) -> Result<Vec<BlogPost>> {
        let posts = sqlx::query_as::<_, BlogPost>(
            r#"
            SELECT id, staff_id, title, body, published_at, visible
            FROM blog_posts
            WHERE visible = 1
            ORDER BY published_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// 设置博客文章展示状态，返回是否存在
    pub async fn set_post_visibility(&self, id: &str, visible: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE blog_posts SET visible = ? WHERE id = ?")
            .bind(visible)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
