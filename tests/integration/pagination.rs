//! Primary-key ordered skip/limit pages.

use crate::common::builders::AccountBuilder;
use crate::common::{CRUD, TenantSeed, context};
use serde_json::json;
use std::sync::Arc;
use tenant_admin::storage::InMemoryStorage;
use tenant_admin::{AdminServer, AdminServerBuilder, ListParams, RequestContext};
use uuid::Uuid;

async fn twenty_five_accounts(
    max_page_size: Option<usize>,
) -> (AdminServer<InMemoryStorage>, RequestContext) {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = AdminServerBuilder::with_shared_storage(Arc::clone(&storage))
        .with_registry(crate::common::registry_with_accounts())
        .with_max_page_size(max_page_size)
        .build()
        .unwrap();
    let ctx = context(admin);

    // Insert out of order; ids fix the listing order
    for n in (1..=25u128).rev() {
        let body = AccountBuilder::new(&format!("acct-{}", n))
            .with("Id", json!(Uuid::from_u128(n).to_string()))
            .with("Visits", json!(n as i64))
            .build();
        server.add(&ctx, "api/account", body).await.unwrap();
    }
    (server, ctx)
}

fn visits(rows: &[serde_json::Value]) -> Vec<i64> {
    rows.iter().map(|r| r["Visits"].as_i64().unwrap()).collect()
}

#[tokio::test]
async fn test_default_page_is_first_ten() {
    let (server, ctx) = twenty_five_accounts(Some(1000)).await;
    let rows = server.list(&ctx, "api/account", &ListParams::new()).await.unwrap();
    assert_eq!(visits(&rows), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_middle_and_last_pages() {
    let (server, ctx) = twenty_five_accounts(Some(1000)).await;

    let page2 = server
        .list(&ctx, "api/account", &ListParams::new().with_page(2, 10))
        .await
        .unwrap();
    assert_eq!(visits(&page2), (11..=20).collect::<Vec<_>>());

    let page3 = server
        .list(&ctx, "api/account", &ListParams::new().with_page(3, 10))
        .await
        .unwrap();
    assert_eq!(visits(&page3), (21..=25).collect::<Vec<_>>());

    let page4 = server
        .list(&ctx, "api/account", &ListParams::new().with_page(4, 10))
        .await
        .unwrap();
    assert!(page4.is_empty());
}

#[tokio::test]
async fn test_paging_applies_after_filtering() {
    let (server, ctx) = twenty_five_accounts(Some(1000)).await;
    let params = ListParams::new()
        .with_filters(r#"[{"PropertyName":"Visits","Operator":"GreaterThan","Value":"12"}]"#)
        .with_page(2, 5);
    let rows = server.list(&ctx, "api/account", &params).await.unwrap();
    assert_eq!(visits(&rows), vec![18, 19, 20, 21, 22]);
}

#[tokio::test]
async fn test_page_size_is_clamped_to_maximum() {
    let (server, ctx) = twenty_five_accounts(Some(7)).await;
    let rows = server
        .list(&ctx, "api/account", &ListParams::new().with_page(2, 100))
        .await
        .unwrap();
    assert_eq!(visits(&rows), (8..=14).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_unbounded_page_size() {
    let (server, ctx) = twenty_five_accounts(None).await;
    let rows = server
        .list(&ctx, "api/account", &ListParams::new().with_page(1, 500))
        .await
        .unwrap();
    assert_eq!(rows.len(), 25);
}

#[tokio::test]
async fn test_list_params_wire_names() {
    let params: ListParams =
        serde_json::from_value(json!({"filters": "[]", "pageNumber": 3, "pageSize": 4})).unwrap();
    assert_eq!(params, ListParams::new().with_filters("[]").with_page(3, 4));
}
