//! 积分流水与余额投影集成测试
//!
//! 在进程内 SQLite 上验证追加协议的全部不变量：
//! 余额等于流水之和、余额永不为负、失败的追加不留任何痕迹。

use fake::Fake;
use fake::faker::name::en::Name;

use spa_shared::database::Database;
use spa_shared::test_utils::{test_database_config, unique_code};

use spa_management::models::{ConversionPolicy, EntryKind};
use spa_management::repository::{
    BalanceRepository, ConversionPolicyRepository, LedgerRepository,
};
use spa_management::service::dto::{AppendEntryRequest, RegisterCustomerRequest};
use spa_management::{AccountService, LoyaltyService, SpaError};

async fn setup() -> Database {
    let db = Database::connect(&test_database_config()).await.unwrap();
    spa_management::MIGRATOR.run(db.pool()).await.unwrap();
    db
}

/// 注册一个测试客户，返回客户编码
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

/// 创建一条测试兑换规则，返回规则编码
async fn create_policy(db: &Database) -> String {
    let code = unique_code('Q');
    ConversionPolicyRepository::new(db.pool().clone())
        .insert(&ConversionPolicy {
            code: code.clone(),
            point_value: 100,
            monetary_value: "50.00".parse().unwrap(),
        })
        .await
        .unwrap();
    code
}

#[tokio::test]
async fn test_accrual_updates_balance() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    let entry = service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 100))
        .await
        .unwrap();
    assert_eq!(entry.kind, EntryKind::Accrual);
    assert_eq!(entry.point_delta, 100);

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 100);
}

#[tokio::test]
async fn test_redemption_within_balance() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let policy_code = create_policy(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 150))
        .await
        .unwrap();
    let entry = service
        .append_entry(AppendEntryRequest::redemption(
            &customer_id,
            "积分抵扣",
            100,
            &policy_code,
        ))
        .await
        .unwrap();
    assert_eq!(entry.point_delta, -100);
    assert_eq!(entry.policy_code.as_deref(), Some(policy_code.as_str()));

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 50);
}

#[tokio::test]
async fn test_balance_equals_ledger_sum() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    for delta in [100, 250, -80, 30, -120] {
        let request = if delta > 0 {
            AppendEntryRequest::accrual(&customer_id, "消费赠送", delta)
        } else {
            AppendEntryRequest {
                customer_id: customer_id.clone(),
                kind: EntryKind::Redemption,
                description: "积分抵扣".to_string(),
                point_delta: delta,
                policy_code: None,
            }
        };
        service.append_entry(request).await.unwrap();
    }

    let balance = service.get_balance(&customer_id).await.unwrap();
    let sum = LedgerRepository::new(db.pool().clone())
        .sum_for_customer(&customer_id)
        .await
        .unwrap();
    assert_eq!(balance.current_points, sum);
    assert_eq!(balance.current_points, 180);
}

#[tokio::test]
async fn test_overdraw_rejected_and_leaves_no_trace() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 100))
        .await
        .unwrap();

    let err = service
        .append_entry(AppendEntryRequest {
            customer_id: customer_id.clone(),
            kind: EntryKind::Redemption,
            description: "积分抵扣".to_string(),
            point_delta: -150,
            policy_code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SpaError::InsufficientBalance {
            required: 150,
            available: 100
        }
    ));

    // 失败的追加不留任何痕迹：余额不变，流水不增
    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 100);
    let count = LedgerRepository::new(db.pool().clone())
        .count_for_customer(&customer_id)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_exact_balance_redemption_reaches_zero() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 100))
        .await
        .unwrap();
    service
        .append_entry(AppendEntryRequest {
            customer_id: customer_id.clone(),
            kind: EntryKind::Redemption,
            description: "积分抵扣".to_string(),
            point_delta: -100,
            policy_code: None,
        })
        .await
        .unwrap();

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 0);
}

#[tokio::test]
async fn test_concurrent_redemptions_only_one_succeeds() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 150))
        .await
        .unwrap();

    // 两笔各 100 的并发兑换：守卫式更新保证只有一笔通过
    let redemption = || AppendEntryRequest {
        customer_id: customer_id.clone(),
        kind: EntryKind::Redemption,
        description: "积分抵扣".to_string(),
        point_delta: -100,
        policy_code: None,
    };
    let (a, b) = tokio::join!(
        service.append_entry(redemption()),
        service.append_entry(redemption())
    );

    assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
    let failed = if a.is_err() { a.unwrap_err() } else { b.unwrap_err() };
    assert!(matches!(failed, SpaError::InsufficientBalance { .. }));

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 50);
}

#[tokio::test]
async fn test_unknown_policy_rejected() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 200))
        .await
        .unwrap();

    let err = service
        .append_entry(AppendEntryRequest::redemption(
            &customer_id,
            "积分抵扣",
            100,
            "QD999",
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::PolicyNotFound(code) if code == "QD999"));

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 200);
}

#[tokio::test]
async fn test_unknown_customer_rejected() {
    let db = setup().await;
    let service = LoyaltyService::new(db.pool().clone());

    let err = service
        .append_entry(AppendEntryRequest::accrual("KH999", "消费赠送", 100))
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::BalanceNotFound(id) if id == "KH999"));

    let err = service.get_balance("KH999").await.unwrap_err();
    assert!(matches!(err, SpaError::BalanceNotFound(_)));
}

#[tokio::test]
async fn test_sign_mismatch_rejected() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    // 累计流水带负值
    let err = service
        .append_entry(AppendEntryRequest {
            customer_id: customer_id.clone(),
            kind: EntryKind::Accrual,
            description: "消费赠送".to_string(),
            point_delta: -100,
            policy_code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));

    // 零变动
    let err = service
        .append_entry(AppendEntryRequest {
            customer_id: customer_id.clone(),
            kind: EntryKind::Accrual,
            description: "消费赠送".to_string(),
            point_delta: 0,
            policy_code: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));
}

#[tokio::test]
async fn test_overlong_description_rejected() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    let err = service
        .append_entry(AppendEntryRequest::accrual(
            &customer_id,
            "x".repeat(301),
            100,
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, SpaError::Validation(_)));
}

#[tokio::test]
async fn test_list_entries_most_recent_first() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    for (i, delta) in [10, 20, 30].iter().enumerate() {
        service
            .append_entry(AppendEntryRequest::accrual(
                &customer_id,
                format!("第{}笔", i + 1),
                *delta,
            ))
            .await
            .unwrap();
    }

    let entries = service.list_entries(&customer_id, 2).await.unwrap();
    assert_eq!(entries.len(), 2);
    // 倒序：最近的一笔在最前
    assert!(entries[0].created_at >= entries[1].created_at);
    assert_eq!(entries[0].point_delta, 30);
}

#[tokio::test]
async fn test_recompute_balance_fixes_drift() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;
    let service = LoyaltyService::new(db.pool().clone());

    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "消费赠送", 100))
        .await
        .unwrap();
    service
        .append_entry(AppendEntryRequest::accrual(&customer_id, "活动赠送", 50))
        .await
        .unwrap();

    // 人为制造投影漂移
    sqlx::query("UPDATE point_balances SET current_points = 999 WHERE customer_id = ?")
        .bind(&customer_id)
        .execute(db.pool())
        .await
        .unwrap();

    let recomputed = service.recompute_balance(&customer_id).await.unwrap();
    assert_eq!(recomputed, 150);

    let balance = service.get_balance(&customer_id).await.unwrap();
    assert_eq!(balance.current_points, 150);
}

#[tokio::test]
async fn test_recompute_balance_unknown_customer() {
    let db = setup().await;
    let service = LoyaltyService::new(db.pool().clone());

    let err = service.recompute_balance("KH999").await.unwrap_err();
    assert!(matches!(err, SpaError::BalanceNotFound(_)));
}

#[tokio::test]
async fn test_balance_row_created_with_customer() {
    let db = setup().await;
    let customer_id = register_customer(&db).await;

    let count = BalanceRepository::new(db.pool().clone())
        .count_for_customer(&customer_id)
        .await
        .unwrap();
    assert_eq!(count, 1);

    let balance = BalanceRepository::new(db.pool().clone())
        .get(&customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(balance.current_points, 0);
}
