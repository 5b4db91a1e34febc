//! 兑换规则存储集成测试
//!
//! 验证规则的增删改查，以及删除规则时历史流水的引用置空行为。

use std::sync::Arc;

use fake::Fake;
use fake::faker::name::en::Name;
use rust_decimal::Decimal;

use spa_shared::database::Database;
use spa_shared::test_utils::{test_database_config, unique_code};

use spa_management::repository::{ConversionPolicyRepository, LedgerRepository};
use spa_management::service::dto::{
    AppendEntryRequest, CreatePolicyRequest, RegisterCustomerRequest,
};
use spa_management::{AccountService, LoyaltyService, PolicyService, SpaError};

async fn setup() -> Database {
    let db = Database::connect(&test_database_config()).await.unwrap();
    spa_management::MIGRATOR.run(db.pool()).await.unwrap();
    db
}

fn policy_service(db: &Database) -> PolicyService<ConversionPolicyRepository> {
    PolicyService::new(Arc::new(ConversionPolicyRepository::new(db.pool().clone())))
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

async fn register_customer(db: &Database) -> String {
    let id = unique_code('K');
    let request = RegisterCustomerRequest {
        id: id.clone(),
        full_name: Name().fake(),
        email: format!("{}@test.local", id.to_lowercase()),
        phone: "0901234567".to_string(),
        password: "secret123".to_string(),
    };
    AccountService::new(db.pool().clone())
        .register_customer(request)
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn test_create_and_get_policy() {
    let db = setup().await;
    let service = policy_service(&db);
    let code = unique_code('Q');

    service
        .create_policy(CreatePolicyRequest {
            code: code.clone(),
            point_value: 100,
            monetary_value: dec("50.00"),
        })
        .await
        .unwrap();

    let policy = service.get_policy(&code).await.unwrap();
    assert_eq!(policy.point_value, 100);
    assert_eq!(policy.monetary_value, dec("50.00"));
}

#[tokio::test]
async fn test_list_policies_ordered_by_code() {
    let db = setup().await;
    let service = policy_service(&db);

    for code in ["QB001", "QA001", "QC001"] {
        service
            .create_policy(CreatePolicyRequest {
                code: code.to_string(),
                point_value: 100,
                monetary_value: dec("10.00"),
            })
            .await
            .unwrap();
    }

    let codes: Vec<String> = service
        .list_policies()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.code)
        .collect();
    assert_eq!(codes, vec!["QA001", "QB001", "QC001"]);
}

#[tokio::test]
async fn test_duplicate_code_rejected() {
    let db = setup().await;
    let service = policy_service(&db);
    let code = unique_code('Q');

    let request = CreatePolicyRequest {
        code: code.clone(),
        point_value: 100,
        monetary_value: dec("50.00"),
    };
    service.create_policy(request.clone()).await.unwrap();

    let err = service.create_policy(request).await.unwrap_err();
    assert!(matches!(err, SpaError::DuplicateCode(c) if c == code));
}

#[tokio::test]
async fn test_update_policy_changes_conversion_rate() {
    let db = setup().await;
    let service = policy_service(&db);
    let code = unique_code('Q');

    service
        .create_policy(CreatePolicyRequest {
            code: code.clone(),
            point_value: 100,
            monetary_value: dec("50.00"),
        })
        .await
        .unwrap();
    service
        .update_policy(CreatePolicyRequest {
            code: code.clone(),
            point_value: 200,
            monetary_value: dec("80.00"),
        })
        .await
        .unwrap();

    let policy = service.get_policy(&code).await.unwrap();
    assert_eq!(policy.point_value, 200);
    assert_eq!(policy.monetary_value, dec("80.00"));
    // 新比例立即对后续折算生效
    assert_eq!(policy.redemption_amount(100), dec("40.00"));
}

#[tokio::test]
async fn test_delete_policy_clears_ledger_references() {
    let db = setup().await;
    let service = policy_service(&db);
    let loyalty = LoyaltyService::new(db.pool().clone());
    let customer_id = register_customer(&db).await;
    let code = unique_code('Q');

    service
        .create_policy(CreatePolicyRequest {
            code: code.clone(),
            point_value: 100,
            monetary_value: dec("50.00"),
        })
        .await
        .unwrap();

    loyalty
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 200))
        .await
        .unwrap();
    let entry = loyalty
        .append_entry(AppendEntryRequest::redemption(
            &customer_id,
            "积分抵扣",
            100,
            &code,
        ))
        .await
        .unwrap();
    assert_eq!(entry.policy_code.as_deref(), Some(code.as_str()));

    service.delete_policy(&code).await.unwrap();

    // 规则已不存在
    let err = service.get_policy(&code).await.unwrap_err();
    assert!(matches!(err, SpaError::PolicyNotFound(_)));

    // 历史流水保留，引用置空，余额不受影响
    let kept = LedgerRepository::new(db.pool().clone())
        .get(&entry.id)
        .await
        .unwrap()
        .unwrap();
    assert!(kept.policy_code.is_none());
    assert_eq!(kept.point_delta, -100);

    let balance = loyalty.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 100);
}

#[tokio::test]
async fn test_delete_unknown_policy() {
    let db = setup().await;
    let service = policy_service(&db);

    let err = service.delete_policy("QD999").await.unwrap_err();
    assert!(matches!(err, SpaError::PolicyNotFound(c) if c == "QD999"));
}

#[tokio::test]
async fn test_validation_failures() {
    let db = setup().await;
    let service = policy_service(&db);

    // 编码超长
    let err = service
        .create_policy(CreatePolicyRequest {
            code: "QD0001".to_string(),
            point_value: 100,
            monetary_value: dec("50.00"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));

    // 积分数为零
    let err = service
        .create_policy(CreatePolicyRequest {
            code: unique_code('Q'),
            point_value: 0,
            monetary_value: dec("50.00"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));

    // 金额为负
    let err = service
        .create_policy(CreatePolicyRequest {
            code: unique_code('Q'),
            point_value: 100,
            monetary_value: dec("-1.00"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));

    // 金额超过两位小数
    let err = service
        .create_policy(CreatePolicyRequest {
            code: unique_code('Q'),
            point_value: 100,
            monetary_value: dec("0.005"),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));
}

#[tokio::test]
async fn test_redemption_amount_via_service() {
    let db = setup().await;
    let service = policy_service(&db);
    let code = unique_code('Q');

    service
        .create_policy(CreatePolicyRequest {
            code: code.clone(),
            point_value: 3,
            monetary_value: dec("1.00"),
        })
        .await
        .unwrap();

    assert_eq!(service.redemption_amount(&code, 3).await.unwrap(), dec("1.00"));
    assert_eq!(service.redemption_amount(&code, 1).await.unwrap(), dec("0.33"));
}
