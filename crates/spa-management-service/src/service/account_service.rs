//! 账号服务
//!
//! 客户与员工的注册、密码校验。密码用 bcrypt 哈希后存储，
//! 客户注册时在同一事务内零初始化积分余额。

use sqlx::SqlitePool;
use tracing::{info, instrument};
use validator::Validate;

use spa_shared::password::{hash_password, verify_password};

use crate::error::{Result, SpaError};
use crate::models::{Customer, Staff};
use crate::repository::{CustomerRepository, StaffRepository};
use crate::service::dto::{RegisterCustomerRequest, RegisterStaffRequest};

/// 账号服务
#[derive(Clone)]
pub struct AccountService {
    pool: SqlitePool,
}

impl AccountService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 注册客户
    ///
    /// 客户行与零余额行同事务写入，注册成功即有余额投影
    #[instrument(skip(self, request), fields(customer_id = %request.id))]
    pub async fn register_customer(&self, request: RegisterCustomerRequest) -> Result<Customer> {
        request.validate()?;

        let customer = Customer {
            id: request.id,
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            password_hash: hash_password(&request.password)?,
            created_at: chrono::Utc::now(),
        };
        CustomerRepository::new(self.pool.clone())
            .create(&customer)
            .await?;

        info!(customer_id = %customer.id, "客户已注册");

        Ok(customer)
    }

    /// 注册员工
    #[instrument(skip(self, request), fields(staff_id = %request.id))]
    pub async fn register_staff(&self, request: RegisterStaffRequest) -> Result<Staff> {
        request.validate()?;

        let staff = Staff {
            id: request.id,
            full_name: request.full_name,
            email: request.email,
            phone: request.phone,
            password_hash: hash_password(&request.password)?,
            role: request.role,
            active: true,
        };
        StaffRepository::new(self.pool.clone()).create(&staff).await?;

        info!(staff_id = %staff.id, role = ?staff.role, "员工已注册");

        Ok(staff)
    }

    /// 校验客户密码
    ///
    /// 客户不存在时返回 CustomerNotFound，密码不匹配时返回 false
    #[instrument(skip(self, password))]
    pub async fn verify_customer_password(&self, customer_id: &str, password: &str) -> Result<bool> {
        let customer = CustomerRepository::new(self.pool.clone())
            .get(customer_id)
            .await?
            .ok_or_else(|| SpaError::CustomerNotFound(customer_id.to_string()))?;

        Ok(verify_password(password, &customer.password_hash)?)
    }

    /// 校验员工密码
    #[instrument(skip(self, password))]
    pub async fn verify_staff_password(&self, staff_id: &str, password: &str) -> Result<bool> {
        let staff = StaffRepository::new(self.pool.clone())
            .get(staff_id)
            .await?
            .ok_or_else(|| SpaError::StaffNotFound(staff_id.to_string()))?;

        Ok(verify_password(password, &staff.password_hash)?)
    }
}
