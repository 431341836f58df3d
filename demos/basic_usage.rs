//! Basic Tenant Admin Usage Example
//!
//! Bootstraps one tenant with an administrator role, then drives the admin
//! server: create rows, list with filters and paging, update, delete, and
//! watch another tenant's user bounce off the gate.
//!
//! Run with `RUST_LOG=debug cargo run --example basic_usage` to see the
//! gate and query plans in the log.

use serde_json::json;
use std::sync::Arc;
use tenant_admin::storage::{InMemoryStorage, StorageKey, StorageProvider};
use tenant_admin::{
    Action, AdminError, AdminServerBuilder, ListParams, Principal, RequestContext,
};
use uuid::Uuid;

async fn put_row(
    storage: &InMemoryStorage,
    tenant: &str,
    entity: &str,
    id: String,
    row: serde_json::Value,
) -> Result<serde_json::Value, tenant_admin::storage::StorageError> {
    storage.put(StorageKey::new(tenant, entity, id), row).await
}

/// Write the rows that make `principal` an administrator of its tenant.
async fn bootstrap_admin(
    storage: &InMemoryStorage,
    principal: &Principal,
    entities: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    let tenant = principal.tenant_id.to_string();
    let user = principal.user_id.to_string();
    let role = Uuid::new_v4().to_string();

    let put = |entity: &'static str, id: String, row: serde_json::Value| {
        put_row(storage, &tenant, entity, id, row)
    };

    put(
        "Tenant",
        tenant.clone(),
        json!({"Id": tenant, "Name": "Acme", "IsActive": true}),
    )
    .await?;
    put(
        "User",
        user.clone(),
        json!({"Id": user, "TenantId": tenant, "UserName": "root", "Email": "root@acme.test", "IsActive": true}),
    )
    .await?;
    put("Role", role.clone(), json!({"Id": role, "TenantId": tenant, "Name": "Administrator"})).await?;
    put(
        "UserInRole",
        Uuid::new_v4().to_string(),
        json!({"TenantId": tenant, "UserId": user, "RoleId": role}),
    )
    .await?;

    for entity in entities {
        for action in Action::ALL {
            put(
                "RoleEntitlement",
                Uuid::new_v4().to_string(),
                json!({"TenantId": tenant, "RoleId": role, "EntityName": entity, "Action": action.as_str()}),
            )
            .await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("🚀 Starting Tenant Admin Basic Usage Example");

    let storage = Arc::new(InMemoryStorage::new());
    let admin = Principal::new(Uuid::new_v4(), Uuid::new_v4());
    bootstrap_admin(&storage, &admin, &["Author", "Books", "Role"]).await?;

    let server = AdminServerBuilder::with_shared_storage(Arc::clone(&storage))
        .with_default_page_size(5)
        .build()?;
    let context = RequestContext::new("example-request-1", admin);
    println!("✅ Admin server ready for tenant {}", admin.tenant_id);

    println!("\n📝 Creating authors and books...");
    let author = server
        .add(&context, "api/author", json!({"Name": "Ursula K. Le Guin"}))
        .await?;
    for (i, title) in ["A Wizard of Earthsea", "The Left Hand of Darkness", "The Dispossessed", "The Lathe of Heaven"]
        .iter()
        .enumerate()
    {
        server
            .add(
                &context,
                "api/books",
                json!({
                    "AuthorId": author.to_string(),
                    "Title": title,
                    "Price": 12.5 + i as f64,
                    "PageCount": 180 + 40 * i as i64,
                    "InPrint": i % 2 == 0
                }),
            )
            .await?;
    }

    println!("\n🔍 Listing books in print costing under 14.00...");
    let params = ListParams::new().with_filters(
        r#"[{"PropertyName":"InPrint","Operator":"Equal","Value":"true"},
            {"PropertyName":"Price","Operator":"LessThan","Value":"14.00"}]"#,
    );
    for book in server.list(&context, "api/books", &params).await? {
        println!("  - {} ({})", book["Title"], book["Price"]);
    }

    println!("\n✏️  Updating the author...");
    let id = author.to_string();
    let updated = server
        .update(
            &context,
            "api/author",
            &id,
            json!({"Id": id, "Name": "Ursula K. Le Guin", "Biography": "Novelist"}),
        )
        .await?;
    println!("  Updated: {}", updated);

    println!("\n🚫 A user from another tenant tries to read it...");
    let outsider = RequestContext::with_generated_id(Principal::new(Uuid::new_v4(), Uuid::new_v4()));
    match server.get_by_id(&outsider, "api/author", &id).await {
        Err(AdminError::Denied { entity, action }) => {
            println!("  Denied: {} on {}", action, entity)
        }
        other => println!("  Unexpected: {:?}", other),
    }

    println!("\n🗑️  Deleting the author...");
    let removed = server.delete(&context, "api/author", &id).await?;
    println!("  Removed {} row(s)", removed);

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
