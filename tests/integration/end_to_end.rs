//! CRUD flows and the error taxonomy, through the server and the operation handler.

use crate::common::builders::AccountBuilder;
use crate::common::{CRUD, TenantSeed, context, server_over};
use serde_json::json;
use std::sync::Arc;
use tenant_admin::storage::InMemoryStorage;
use tenant_admin::{AdminError, AdminOperationHandler, AdminOperationRequest, ListParams};
use uuid::Uuid;

#[tokio::test]
async fn test_account_lifecycle() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);

    let manager = Uuid::new_v4();
    let id = server
        .add(
            &ctx,
            "api/account",
            AccountBuilder::new("Initech")
                .with("Balance", json!(1250.5))
                .with("OpenedOn", json!("2023-07-04 12:00:00"))
                .with("ManagerId", json!(manager.to_string().to_uppercase()))
                .build(),
        )
        .await
        .unwrap();

    // Values come back in canonical form
    let row = server.get_by_id(&ctx, "api/account", &id.to_string()).await.unwrap();
    assert_eq!(row["Balance"], json!("1250.5"));
    assert_eq!(row["OpenedOn"], json!("2023-07-04T12:00:00Z"));
    assert_eq!(row["ManagerId"], json!(manager.to_string()));

    let body = AccountBuilder::new("Initech")
        .with("Id", json!(id.to_string()))
        .with("Visits", json!(3))
        .build();
    let updated = server
        .update(&ctx, "api/account", &id.to_string(), body)
        .await
        .unwrap();
    assert_eq!(updated["Visits"], json!(3));
    // Replacement semantics: omitted nullable fields are gone
    assert!(updated.get("ManagerId").is_none());

    let found = server
        .list(
            &ctx,
            "api/account",
            &ListParams::new()
                .with_filters(r#"[{"PropertyName":"Visits","Operator":"Equal","Value":"3"}]"#),
        )
        .await
        .unwrap();
    assert_eq!(found.len(), 1);

    assert_eq!(server.delete(&ctx, "api/account", &id.to_string()).await.unwrap(), 1);
    let empty = server.list(&ctx, "api/account", &ListParams::new()).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_filtered_list_follows_updates() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);

    let mut active = Vec::new();
    for (name, is_active) in [("a1", true), ("a2", true), ("a3", true), ("i1", false), ("i2", false)] {
        let id = server
            .add(
                &ctx,
                "api/account",
                AccountBuilder::new(name).with("IsActive", json!(is_active)).build(),
            )
            .await
            .unwrap();
        if is_active {
            active.push((name, id));
        }
    }

    let params = ListParams::new()
        .with_filters(r#"[{"PropertyName":"IsActive","Operator":"Equal","Value":"true"}]"#);
    let rows = server.list(&ctx, "api/account", &params).await.unwrap();
    assert_eq!(rows.len(), 3);

    let (name, id) = active[0];
    let body = AccountBuilder::new(name)
        .with("Id", json!(id.to_string()))
        .with("IsActive", json!(false))
        .build();
    server
        .update(&ctx, "api/account", &id.to_string(), body)
        .await
        .unwrap();

    let rows = server.list(&ctx, "api/account", &params).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_status_filter_follows_updates() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);

    let mut ids = Vec::new();
    for (name, status) in [("s1", "Active"), ("s2", "Active"), ("s3", "Active"), ("s4", "Inactive"), ("s5", "Inactive")] {
        let id = server
            .add(&ctx, "api/account", AccountBuilder::new(name).with("Status", json!(status)).build())
            .await
            .unwrap();
        ids.push((name, id));
    }
    // Exact, case-sensitive match
    let lowercase = ListParams::new()
        .with_filters(r#"[{"PropertyName":"Status","Operator":"Equal","Value":"active"}]"#);
    assert!(server.list(&ctx, "api/account", &lowercase).await.unwrap().is_empty());

    let params = ListParams::new()
        .with_filters(r#"[{"PropertyName":"Status","Operator":"Equal","Value":"Active"}]"#);
    let rows = server.list(&ctx, "api/account", &params).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r["Status"] == json!("Active")));

    let (name, id) = ids[1];
    let body = AccountBuilder::new(name)
        .with("Id", json!(id.to_string()))
        .with("Status", json!("Inactive"))
        .build();
    server
        .update(&ctx, "api/account", &id.to_string(), body)
        .await
        .unwrap();

    let rows = server.list(&ctx, "api/account", &params).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["Id"] != json!(id.to_string())));
}

#[tokio::test]
async fn test_update_requires_matching_body_id() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);
    let id = server
        .add(&ctx, "api/account", AccountBuilder::new("Globex").build())
        .await
        .unwrap()
        .to_string();

    let missing = server
        .update(&ctx, "api/account", &id, AccountBuilder::new("Globex").build())
        .await;
    assert!(matches!(missing, Err(AdminError::IdMismatch { .. })));

    let other = AccountBuilder::new("Globex")
        .with("Id", json!(Uuid::new_v4().to_string()))
        .build();
    match server.update(&ctx, "api/account", &id, other).await {
        Err(AdminError::IdMismatch { path_id, .. }) => assert_eq!(path_id, id),
        other => panic!("expected IdMismatch, got {:?}", other),
    }

    // The check is on the value, not the spelling
    let shouted = AccountBuilder::new("Globex")
        .with("Id", json!(id.to_uppercase()))
        .build();
    server.update(&ctx, "api/account", &id, shouted).await.unwrap();
}

#[tokio::test]
async fn test_update_enforces_required_properties() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);
    let id = server
        .add(&ctx, "api/account", AccountBuilder::new("Hooli").build())
        .await
        .unwrap()
        .to_string();

    let body = AccountBuilder::new("Hooli")
        .with("Id", json!(id))
        .without("Balance")
        .build();
    let result = server.update(&ctx, "api/account", &id, body).await;
    assert!(matches!(result, Err(AdminError::InvalidRequest { .. })));
}

#[tokio::test]
async fn test_tenant_row_is_the_callers_tenant() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Tenant"], &CRUD).await;
    let server = server_over(&storage);
    let ctx = context(admin);
    let tenant = seed.tenant_id.to_string();

    let row = server.get_by_id(&ctx, "api/tenant", &tenant).await.unwrap();
    assert_eq!(row["Name"], json!("Tenant"));

    let rows = server.list(&ctx, "api/tenant", &ListParams::new()).await.unwrap();
    assert_eq!(rows.len(), 1);

    let renamed = server
        .update(
            &ctx,
            "api/tenant",
            &tenant,
            json!({"Id": tenant, "Name": "Renamed", "IsActive": true}),
        )
        .await
        .unwrap();
    assert_eq!(renamed["Name"], json!("Renamed"));
}

#[tokio::test]
async fn test_handler_maps_errors_to_codes_and_statuses() {
    let storage = Arc::new(InMemoryStorage::new());
    let seed = TenantSeed::new(&storage).await;
    let admin = seed.admin_of(&["Account"], &CRUD).await;
    let handler = AdminOperationHandler::new(server_over(&storage));

    let cases = [
        (
            AdminOperationRequest::add("api/account", json!({"Nope": 1})),
            "UNKNOWN_PROPERTY",
            400,
        ),
        (
            AdminOperationRequest::add("api/account", AccountBuilder::new("x").with("Visits", json!("lots")).build()),
            "TYPE_MISMATCH",
            400,
        ),
        (
            AdminOperationRequest::list("api/account").with_query(
                ListParams::new().with_filters(r#"[{"PropertyName":"IsActive","Operator":"Contains","Value":"t"}]"#),
            ),
            "UNSUPPORTED_OPERATOR",
            400,
        ),
        (
            AdminOperationRequest::list("api/account").with_query(ListParams::new().with_filters("not json")),
            "MALFORMED_FILTER_SYNTAX",
            400,
        ),
        (
            AdminOperationRequest::get("api/account", Uuid::new_v4().to_string()),
            "NOT_FOUND",
            404,
        ),
        (
            AdminOperationRequest::delete("api/role", Uuid::new_v4().to_string()),
            "DENIED",
            403,
        ),
        (
            AdminOperationRequest::update(
                "api/account",
                Uuid::new_v4().to_string(),
                json!({"Id": Uuid::new_v4().to_string()}),
            ),
            "ID_MISMATCH",
            400,
        ),
    ];

    for (request, code, status) in cases {
        let response = handler
            .handle_operation(request.with_principal(admin).with_request_id("e2e"))
            .await;
        assert!(!response.success);
        assert_eq!(response.error_code.as_deref(), Some(code));
        assert_eq!(response.status_code, status, "{}", code);
        assert_eq!(response.metadata.request_id, "e2e");
        assert_eq!(response.metadata.tenant_id, Some(seed.tenant_id.to_string()));
    }
}
