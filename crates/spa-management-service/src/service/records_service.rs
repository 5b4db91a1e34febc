//! 经营记录服务
//!
//! 服务目录、预约、FAQ 与博客的创建与状态变更入口。
//! 字段校验在这一层完成，服务端赋值的时间戳（下单时间、
//! FAQ 更新时间、文章发布时间）也在这里生成，调用方无法指定。

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument};
use validator::Validate;

use crate::error::{Result, SpaError};
use crate::models::{
    Appointment, AppointmentStatus, BlogPost, Faq, ServiceCategory, SpaService,
};
use crate::repository::{AppointmentRepository, CatalogRepository, ContentRepository};
use crate::service::dto::{
    BookAppointmentRequest, CreateCategoryRequest, CreateFaqRequest, CreatePostRequest,
    CreateServiceRequest,
};

/// 经营记录服务
#[derive(Clone)]
pub struct RecordsService {
    pool: SqlitePool,
}

impl RecordsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== 服务目录 ====================

    /// 创建服务分类
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn create_category(&self, request: CreateCategoryRequest) -> Result<ServiceCategory> {
        request.validate()?;

        let category = ServiceCategory {
            id: request.id,
            name: request.name,
            description: request.description,
        };
        CatalogRepository::new(self.pool.clone())
            .create_category(&category)
            .await?;

        info!(id = %category.id, "服务分类已创建");

        Ok(category)
    }

    /// 创建服务项目
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn create_service(&self, request: CreateServiceRequest) -> Result<SpaService> {
        request.validate()?;

        let service = SpaService {
            id: request.id,
            category_id: request.category_id,
            name: request.name,
            description: request.description,
            visible: request.visible,
        };
        CatalogRepository::new(self.pool.clone())
            .create_service(&service)
            .await?;

        info!(id = %service.id, category_id = %service.category_id, "服务项目已创建");

        Ok(service)
    }

    // ==================== 预约 ====================

    /// 创建预约
    ///
    /// 下单时间由服务端赋值
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn book_appointment(&self, request: BookAppointmentRequest) -> Result<Appointment> {
        request.validate()?;

        let appointment = Appointment {
            id: request.id,
            customer_id: request.customer_id,
            staff_id: request.staff_id,
            service_id: request.service_id,
            booked_at: Utc::now(),
            scheduled_at: request.scheduled_at,
            status: request.status,
        };
        AppointmentRepository::new(self.pool.clone())
            .create(&appointment)
            .await?;

        info!(id = %appointment.id, customer_id = %appointment.customer_id, "预约已创建");

        Ok(appointment)
    }

    /// 更新预约状态
    ///
    /// 已完成或已取消的预约为终态，不允许再变更
    #[instrument(skip(self))]
    pub async fn update_appointment_status(
        &self,
        id: &str,
        status: AppointmentStatus,
    ) -> Result<()> {
        let repo = AppointmentRepository::new(self.pool.clone());
        let current = repo
            .get(id)
            .await?
            .ok_or_else(|| SpaError::AppointmentNotFound(id.to_string()))?;
        if current.status.is_terminal() {
            return Err(SpaError::Validation(format!(
                "预约 {} 已处于终态 {:?}，不能再变更状态",
                id, current.status
            )));
        }

        repo.update_status(id, status).await?;

        info!(id, from = ?current.status, to = ?status, "预约状态已更新");

        Ok(())
    }

    // ==================== 内容 ====================

    /// 创建 FAQ
    ///
    /// 更新时间由服务端赋值
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn create_faq(&self, request: CreateFaqRequest) -> Result<Faq> {
        request.validate()?;

        let faq = Faq {
            id: request.id,
            staff_id: request.staff_id,
            question: request.question,
            answer: request.answer,
            updated_at: Utc::now(),
            visible: request.visible,
        };
        ContentRepository::new(self.pool.clone())
            .create_faq(&faq)
            .await?;

        info!(id = %faq.id, "FAQ 已创建");

        Ok(faq)
    }

    /// 发布博客文章
    ///
    /// 发布时间由服务端赋值
    #[instrument(skip(self, request), fields(id = %request.id))]
    pub async fn create_post(&self, request: CreatePostRequest) -> Result<BlogPost> {
        request.validate()?;

        let post = BlogPost {
            id: request.id,
            staff_id: request.staff_id,
            title: request.title,
            body: request.body,
            published_at: Utc::now(),
            visible: request.visible,
        };
        ContentRepository::new(self.pool.clone())
            .create_post(&post)
            .await?;

        info!(id = %post.id, "博客文章已发布");

        Ok(post)
    }
}
