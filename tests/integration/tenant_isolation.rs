//! Rows never cross tenant boundaries, whatever the request says.

use crate::common::builders::AccountBuilder;
use crate::common::{CRUD, TenantSeed, context, server_over};
use serde_json::json;
use std::sync::Arc;
use tenant_admin::storage::{InMemoryStorage, StorageProvider};
use tenant_admin::{AdminError, ListParams};

#[tokio::test]
async fn test_tenant_column_is_forced_on_add() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let admin = home.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);

    let body = AccountBuilder::new("Smuggled")
        .with("TenantId", json!(away.tenant_id.to_string()))
        .build();
    let id = server.add(&ctx, "api/account", body).await.unwrap();

    let row = server.get_by_id(&ctx, "api/account", &id.to_string()).await.unwrap();
    assert_eq!(row["TenantId"], json!(home.tenant_id.to_string()));
}

#[tokio::test]
async fn test_tenant_criteria_cannot_widen_the_scope() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let home_admin = home.admin_of(&["Account"], &CRUD).await;
    let away_admin = away.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);

    server
        .add(&context(home_admin), "api/account", AccountBuilder::new("Home").build())
        .await
        .unwrap();
    server
        .add(&context(away_admin), "api/account", AccountBuilder::new("Away").build())
        .await
        .unwrap();

    for operator in ["Equal", "NotEqual", "In"] {
        let filters = format!(
            r#"[{{"PropertyName":"TenantId","Operator":"{}","Value":"{}"}}]"#,
            operator, away.tenant_id
        );
        let rows = server
            .list(&context(home_admin), "api/account", &ListParams::new().with_filters(filters))
            .await
            .unwrap();
        assert!(
            rows.iter().all(|r| r["TenantId"] == json!(home.tenant_id.to_string())),
            "{} leaked rows",
            operator
        );
    }
}

#[tokio::test]
async fn test_update_and_delete_cannot_reach_other_tenants() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let home_admin = home.admin_of(&["Account"], &CRUD).await;
    let away_admin = away.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);

    let id = server
        .add(&context(away_admin), "api/account", AccountBuilder::new("Theirs").build())
        .await
        .unwrap()
        .to_string();

    let body = AccountBuilder::new("Mine").with("Id", json!(id)).build();
    let result = server.update(&context(home_admin), "api/account", &id, body).await;
    assert!(matches!(result, Err(AdminError::NotFound { .. })));

    let result = server.delete(&context(home_admin), "api/account", &id).await;
    assert!(matches!(result, Err(AdminError::NotFound { .. })));

    let row = server
        .get_by_id(&context(away_admin), "api/account", &id)
        .await
        .unwrap();
    assert_eq!(row["Name"], json!("Theirs"));
}

#[tokio::test]
async fn test_tenants_are_separate_partitions() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let server = server_over(&storage);
    let admin = home.admin_of(&["Author"], &CRUD).await;

    // Author has no tenant column but is still stored per tenant
    let id = server
        .add(&context(admin), "api/author", json!({"Name": "Borges"}))
        .await
        .unwrap();

    let mut tenants = storage.list_tenants().await.unwrap();
    tenants.sort();
    let mut expected = vec![home.tenant_id.to_string(), away.tenant_id.to_string()];
    expected.sort();
    assert_eq!(tenants, expected);

    let away_admin = away.admin_of(&["Author"], &CRUD).await;
    let result = server
        .get_by_id(&context(away_admin), "api/author", &id.to_string())
        .await;
    assert!(matches!(result, Err(AdminError::NotFound { .. })));
}
