//! Concurrent requests against one server and shared storage.

use crate::common::builders::AccountBuilder;
use crate::common::{CRUD, TenantSeed, context, server_over};
use futures::future::join_all;
use std::sync::Arc;
use tenant_admin::storage::InMemoryStorage;
use tenant_admin::{Action, ListParams};

#[tokio::test]
async fn test_concurrent_adds_across_tenants() {
    let storage = Arc::new(InMemoryStorage::new());
    let mut contexts = Vec::new();
    for _ in 0..4 {
        let seed = TenantSeed::new(&storage).await;
        contexts.push(context(seed.admin_of(&["Account"], &CRUD).await));
    }
    let server = Arc::new(server_over(&storage));

    let adds = contexts.iter().flat_map(|ctx| {
        let server = Arc::clone(&server);
        (0..20).map(move |i| {
            let server = Arc::clone(&server);
            let ctx = ctx.clone();
            async move {
                server
                    .add(&ctx, "api/account", AccountBuilder::new(&format!("acct-{}", i)).build())
                    .await
            }
        })
    });
    let results = join_all(adds).await;
    assert!(results.iter().all(Result::is_ok));

    for ctx in &contexts {
        let rows = server
            .list(ctx, "api/account", &ListParams::new().with_page(1, 100))
            .await
            .unwrap();
        assert_eq!(rows.len(), 20);
        assert!(rows
            .iter()
            .all(|r| r["TenantId"] == serde_json::json!(ctx.tenant_id().to_string())));
    }
}

#[tokio::test]
async fn test_spawned_requests_share_the_server() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let writer = context(seed.admin_of(&["Account"], &CRUD).await);
    let reader = context(seed.admin_of(&["Account"], &[Action::Read]).await);
    let server = Arc::new(server_over(&storage));

    let mut handles = Vec::new();
    for i in 0..10 {
        let writer_server = Arc::clone(&server);
        let writer = writer.clone();
        handles.push(tokio::spawn(async move {
            writer_server
                .add(&writer, "api/account", AccountBuilder::new(&format!("spawned-{}", i)).build())
                .await
                .map(|_| ())
        }));
        let server = Arc::clone(&server);
        let reader = reader.clone();
        handles.push(tokio::spawn(async move {
            server
                .list(&reader, "api/account", &ListParams::new())
                .await
                .map(|_| ())
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }
    let rows = server
        .list(&reader, "api/account", &ListParams::new().with_page(1, 50))
        .await
        .unwrap();
    assert_eq!(rows.len(), 10);
}
