//! 服务层数据传输对象
//!
//! 定义服务层与外部交互使用的请求对象，统一用 validator 做字段校验，
//! 校验失败转为 SpaError::Validation 返回

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{AppointmentStatus, EntryKind, StaffRole};

/// 追加积分流水请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AppendEntryRequest {
    /// 客户编码（5 位）
    #[validate(length(equal = 5, message = "客户编码必须为5个字符"))]
    pub customer_id: String,
    /// 流水类型
    pub kind: EntryKind,
    /// 交易描述
    #[validate(length(min = 1, max = 300, message = "交易描述不能为空且不超过300字符"))]
    pub description: String,
    /// 积分变动值（累计为正，兑换为负）
    pub point_delta: i64,
    /// 应用的兑换规则编码
    #[validate(length(min = 1, max = 5, message = "规则编码长度必须在1-5个字符之间"))]
    pub policy_code: Option<String>,
}

impl AppendEntryRequest {
    /// 积分累计请求
    pub fn accrual(customer_id: impl Into<String>, description: impl Into<String>, points: i64) -> Self {
        Self {
            customer_id: customer_id.into(),
            kind: EntryKind::Accrual,
            description: description.into(),
            point_delta: points,
            policy_code: None,
        }
    }

    /// 积分兑换请求
    pub fn redemption(
        customer_id: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        policy_code: impl Into<String>,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            kind: EntryKind::Redemption,
            description: description.into(),
            point_delta: -points.abs(),
            policy_code: Some(policy_code.into()),
        }
    }
}

/// 创建兑换规则请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePolicyRequest {
    /// 规则编码
    #[validate(length(min = 1, max = 5, message = "规则编码长度必须在1-5个字符之间"))]
    pub code: String,
    /// 兑换所需积分数
    #[validate(range(min = 1, message = "积分数必须大于0"))]
    pub point_value: i64,
    /// 对应抵扣金额（非负，不超过两位小数）
    pub monetary_value: Decimal,
}

/// 客户注册请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCustomerRequest {
    /// 客户编码（5 位）
    #[validate(length(equal = 5, message = "客户编码必须为5个字符"))]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "姓名不能为空且不超过100字符"))]
    pub full_name: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    /// 手机号（10 位）
    #[validate(length(equal = 10, message = "手机号必须为10位"))]
    pub phone: String,
    /// 明文密码，由服务层哈希后存储
    #[validate(length(min = 6, message = "密码不能少于6个字符"))]
    pub password: String,
}

/// 员工注册请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterStaffRequest {
    /// 员工编码（5 位）
    #[validate(length(equal = 5, message = "员工编码必须为5个字符"))]
    pub id: String,
    #[validate(length(min = 1, max = 100, message = "姓名不能为空且不超过100字符"))]
    pub full_name: String,
    #[validate(email(message = "邮箱格式不正确"))]
    pub email: String,
    #[validate(length(equal = 10, message = "手机号必须为10位"))]
    pub phone: String,
    #[validate(length(min = 6, message = "密码不能少于6个字符"))]
    pub password: String,
    /// 角色
    pub role: StaffRole,
}

/// 创建预约请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    /// 预约编码（5 位）
    #[validate(length(equal = 5, message = "预约编码必须为5个字符"))]
    pub id: String,
    #[validate(length(equal = 5, message = "客户编码必须为5个字符"))]
    pub customer_id: String,
    #[validate(length(equal = 5, message = "员工编码必须为5个字符"))]
    pub staff_id: String,
    #[validate(length(equal = 5, message = "服务编码必须为5个字符"))]
    pub service_id: String,
    /// 实际服务时间
    pub scheduled_at: DateTime<Utc>,
    /// 初始状态，缺省为等待中
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// 创建服务分类请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    #[validate(length(equal = 5, message = "分类编码必须为5个字符"))]
    pub id: String,
    #[validate(length(min = 1, max = 200, message = "分类名称不能为空且不超过200字符"))]
    pub name: String,
    pub description: Option<String>,
}

/// 创建服务项目请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    #[validate(length(equal = 5, message = "服务编码必须为5个字符"))]
    pub id: String,
    #[validate(length(equal = 5, message = "分类编码必须为5个字符"))]
    pub category_id: String,
    #[validate(length(min = 1, max = 200, message = "服务名称不能为空且不超过200字符"))]
    pub name: String,
    #[validate(length(min = 1, message = "服务描述不能为空"))]
    pub description: String,
    /// 是否对外展示，缺省展示
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// 创建 FAQ 请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFaqRequest {
    #[validate(length(equal = 5, message = "问题编码必须为5个字符"))]
    pub id: String,
    #[validate(length(equal = 5, message = "员工编码必须为5个字符"))]
    pub staff_id: String,
    #[validate(length(min = 1, max = 300, message = "问题不能为空且不超过300字符"))]
    pub question: String,
    #[validate(length(min = 1, message = "答案不能为空"))]
    pub answer: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

/// 发布博客文章请求
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(length(equal = 5, message = "文章编码必须为5个字符"))]
    pub id: String,
    #[validate(length(equal = 5, message = "员工编码必须为5个字符"))]
    pub staff_id: String,
    #[validate(length(min = 1, max = 200, message = "标题不能为空且不超过200字符"))]
    pub title: String,
    #[validate(length(min = 1, message = "正文不能为空"))]
    pub body: String,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_append_entry_request_validation() {
        let req = AppendEntryRequest::accrual("KH001", "消费赠送", 100);
        assert!(req.validate().is_ok());

        let req = AppendEntryRequest::accrual("KH1", "消费赠送", 100);
        assert!(req.validate().is_err());

        let req = AppendEntryRequest::accrual("KH001", "x".repeat(301), 100);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_redemption_request_normalizes_sign() {
        // 兑换构造器统一把积分数转为负值
        let req = AppendEntryRequest::redemption("KH001", "积分抵扣", 100, "QD001");
        assert_eq!(req.point_delta, -100);

        let req = AppendEntryRequest::redemption("KH001", "积分抵扣", -100, "QD001");
        assert_eq!(req.point_delta, -100);
    }

    #[test]
    fn test_create_policy_request_validation() {
        let req = CreatePolicyRequest {
            code: "QD001".to_string(),
            point_value: 100,
            monetary_value: "50.00".parse().unwrap(),
        };
        assert!(req.validate().is_ok());

        let req = CreatePolicyRequest {
            code: "".to_string(),
            point_value: 100,
            monetary_value: "50.00".parse().unwrap(),
        };
        assert!(req.validate().is_err());

        let req = CreatePolicyRequest {
            code: "QD001".to_string(),
            point_value: 0,
            monetary_value: "50.00".parse().unwrap(),
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_register_customer_request_validation() {
        let req = RegisterCustomerRequest {
            id: "KH001".to_string(),
            full_name: "Tran Thi Mai".to_string(),
            email: "mai@example.com".to_string(),
            phone: "0901234567".to_string(),
            password: "secret123".to_string(),
        };
        assert!(req.validate().is_ok());

        let req = RegisterCustomerRequest {
            email: "not-an-email".to_string(),
            ..req
        };
        assert!(req.validate().is_err());
    }
}
