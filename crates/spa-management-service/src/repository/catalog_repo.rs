//! 服务目录仓储

use sqlx::SqlitePool;

use crate::error::{Result, SpaError};
use crate::models::{ServiceCategory, SpaService};

/// 服务目录仓储
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== 服务分类 ====================

    /// 创建服务分类
    pub async fn create_category(&self, category: &ServiceCategory) -> Result<()> {
        let taken: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM service_categories WHERE id = ?)")
                .bind(&category.id)
                .fetch_one(&self.pool)
                .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "ServiceCategory",
                id: category.id.clone(),
            });
        }

        sqlx::query("INSERT INTO service_categories (id, name, description) VALUES (?, ?, ?)")
            .bind(&category.id)
            .bind(&category.name)
            .bind(&category.description)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// 按编码查询分类
    pub async fn get_category(&self, id: &str) -> Result<Option<ServiceCategory>> {
        let category = sqlx::query_as::<_, ServiceCategory>(
            "SELECT id, name, description FROM service_categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// 列出全部分类
    pub async fn list_categories(&self) -> Result<Vec<ServiceCategory>> {
        let categories = sqlx::query_as::<_, ServiceCategory>(
            "SELECT id, name, description FROM service_categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    // ==================== 服务项目 ====================

    /// 创建服务项目
    ///
    /// 所属分类必须已存在
    pub async fn create_service(&self, service: &SpaService) -> Result<()> {
        if self.get_category(&service.category_id).await?.is_none() {
            return Err(SpaError::CategoryNotFound(service.category_id.clone()));
        }

        let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM services WHERE id = ?)")
            .bind(&service.id)
            .fetch_one(&self.pool)
            .await?;
        if taken {
            return Err(SpaError::AlreadyExists {
                entity: "SpaService",
                id: service.id.clone(),
            });
        }

        sqlx::query(
            r#"
            INSERT INTO services (id, category_id, name, description, visible)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.id)
        .bind(&service.category_id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.visible)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// 按编码查询服务项目
    pub async fn get_service(&self, id: &str) -> Result<Option<SpaService>> {
        let service = sqlx::query_as::<_, SpaService>(
            "SELECT id, category_id, name, description, visible FROM services WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(service)
    }

    /// 列出分类下的服务项目
    pub async fn list_services_by_category(&self, category_id: &str) -> Result<Vec<SpaService>> {
        let services = sqlx::query_as::<_, SpaService>(
            r#"
            SELECT id, category_id, name, description, visible
            FROM services
            WHERE category_id = ?
            ORDER BY id
            "#,
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// 列出对外展示中的服务项目
    pub async fn list_visible_services(&self) -> Result<Vec<SpaService>> {
        let services = sqlx::query_as::<_, SpaService>(
            r#"
            SELECT id, category_id, name, description, visible
            FROM services
            WHERE visible = 1
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(services)
    }

    /// 设置服务项目展示状态，返回是否存在该服务
    pub async fn set_service_visibility(&self, id: &str, visible: bool) -> Result<bool> {
        let result = sqlx::query("UPDATE services SET visible = ? WHERE id = ?")
            .bind(visible)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
