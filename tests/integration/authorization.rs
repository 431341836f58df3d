//! Entitlement resolution through the authorization gate.

use crate::common::builders::AccountBuilder;
use crate::common::{CRUD, TenantSeed, context, registry_with_accounts, server_over};
use serde_json::json;
use std::sync::Arc;
use tenant_admin::storage::InMemoryStorage;
use tenant_admin::{Action, AdminError, AdminServerBuilder, ListParams};
use uuid::Uuid;

fn assert_denied<T: std::fmt::Debug>(result: Result<T, AdminError>, entity: &str, action: Action) {
    match result {
        Err(AdminError::Denied {
            entity: denied_entity,
            action: denied_action,
        }) => {
            assert_eq!(denied_entity, entity);
            assert_eq!(denied_action, action);
        }
        other => panic!("expected Denied, got {:?}", other),
    }
}

#[tokio::test]
async fn test_roles_are_additive() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let user = seed.user("grace").await;
    let readers = seed.role("Readers").await;
    let writers = seed.role("Writers").await;
    seed.assign(&user, readers).await;
    seed.assign(&user, writers).await;
    seed.grant(readers, "Account", &[Action::Read]).await;
    seed.grant(writers, "Account", &[Action::Create]).await;

    let server = server_over(&storage);
    let ctx = context(user);

    let id = server
        .add(&ctx, "api/account", AccountBuilder::new("Acme").build())
        .await
        .unwrap();
    server.get_by_id(&ctx, "api/account", &id.to_string()).await.unwrap();

    assert_denied(
        server.delete(&ctx, "api/account", &id.to_string()).await,
        "api/account",
        Action::Delete,
    );
}

#[tokio::test]
async fn test_user_without_roles_is_denied_everything() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let user = seed.user("nobody").await;
    let server = server_over(&storage);
    let ctx = context(user);

    for action in CRUD {
        let result = match action {
            Action::Create => server
                .add(&ctx, "api/account", AccountBuilder::new("x").build())
                .await
                .map(|_| ()),
            Action::Read => server.list(&ctx, "api/account", &ListParams::new()).await.map(|_| ()),
            Action::Update => server
                .update(&ctx, "api/account", &Uuid::new_v4().to_string(), json!({}))
                .await
                .map(|_| ()),
            Action::Delete => server
                .delete(&ctx, "api/account", &Uuid::new_v4().to_string())
                .await
                .map(|_| ()),
        };
        assert_denied(result, "api/account", action);
    }
}

#[tokio::test]
async fn test_entitlement_for_another_entity_does_not_carry_over() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Role"], &CRUD).await;
    let server = server_over(&storage);

    assert_denied(
        server.list(&context(admin), "api/account", &ListParams::new()).await,
        "api/account",
        Action::Read,
    );
}

#[tokio::test]
async fn test_entity_name_in_entitlement_is_case_sensitive() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let user = seed.user("casey").await;
    let role = seed.role("Lowercase").await;
    seed.assign(&user, role).await;
    seed.grant(role, "account", &[Action::Read]).await;
    let server = server_over(&storage);

    assert_denied(
        server.list(&context(user), "api/account", &ListParams::new()).await,
        "api/account",
        Action::Read,
    );
}

#[tokio::test]
async fn test_user_of_another_tenant_is_denied() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let admin = home.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);

    // Same user id presented with a tenant it does not belong to
    let spoofed = tenant_admin::Principal::new(admin.user_id, away.tenant_id);
    assert_denied(
        server.list(&context(spoofed), "api/account", &ListParams::new()).await,
        "api/account",
        Action::Read,
    );
}

#[tokio::test]
async fn test_role_from_another_tenant_grants_nothing() {
    let storage = Arc::new(InMemoryStorage::new());
    let home = TenantSeed::new(&storage).await;
    let away = TenantSeed::new(&storage).await;
    let user = home.user("wanderer").await;

    // The role and its entitlement live in the other tenant
    let foreign_role = away.role("Foreign").await;
    away.grant(foreign_role, "Account", &CRUD).await;
    home.assign(&user, foreign_role).await;

    let server = server_over(&storage);
    assert_denied(
        server.list(&context(user), "api/account", &ListParams::new()).await,
        "api/account",
        Action::Read,
    );
}

#[tokio::test]
async fn test_revocation_applies_to_the_next_request() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["RoleEntitlement"], &CRUD).await;
    let user = seed.user("temp").await;
    let role = seed.role("Temp").await;
    seed.assign(&user, role).await;

    let server = server_over(&storage);
    let admin_ctx = context(admin);
    let user_ctx = context(user);

    let grant = server
        .add(
            &admin_ctx,
            "api/roleentitlement",
            json!({"RoleId": role.to_string(), "EntityName": "Account", "Action": "Read"}),
        )
        .await
        .unwrap();
    server.list(&user_ctx, "api/account", &ListParams::new()).await.unwrap();

    server
        .delete(&admin_ctx, "api/roleentitlement", &grant.to_string())
        .await
        .unwrap();
    assert_denied(
        server.list(&user_ctx, "api/account", &ListParams::new()).await,
        "api/account",
        Action::Read,
    );
}

#[tokio::test]
async fn test_gate_runs_before_body_validation() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let reader = seed.admin_of(&["Account"], &[Action::Read]).await;
    let server = server_over(&storage);

    assert_denied(
        server
            .add(&context(reader), "api/account", json!({"NoSuchProperty": 1}))
            .await,
        "api/account",
        Action::Create,
    );
}

#[tokio::test]
async fn test_unknown_route_disclosure_is_configurable() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let ctx = context(admin);

    let concealing = server_over(&storage);
    let result = concealing.list(&ctx, "api/invoices", &ListParams::new()).await;
    assert!(matches!(result, Err(AdminError::Denied { .. })));

    let disclosing = AdminServerBuilder::with_shared_storage(Arc::clone(&storage))
        .with_registry(registry_with_accounts())
        .with_conceal_unknown_entities(false)
        .build()
        .unwrap();
    let result = disclosing.list(&ctx, "api/invoices", &ListParams::new()).await;
    assert!(matches!(result, Err(AdminError::UnknownEntity { .. })));
}

#[tokio::test]
async fn test_custom_route_maps_to_entity() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["RoleEntitlement"], &[Action::Read]).await;
    let server = AdminServerBuilder::with_shared_storage(Arc::clone(&storage))
        .with_route("/api/Entitlements/", "RoleEntitlement")
        .build()
        .unwrap();

    let rows = server
        .list(&context(admin), "api/entitlements", &ListParams::new())
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["Action"], json!("Read"));
}
