//! Multi-tenant administration core for Rust.
//!
//! Provides a generic create/read/update/delete surface over a catalog of
//! entities, with role-based entitlements checked before every operation,
//! a typed filter language for list queries and mandatory tenant isolation.
//!
//! # Core Components
//!
//! - [`SchemaRegistry`] - Entity catalog with typed property descriptors
//! - [`filter`] - Compiles `{PropertyName, Operator, Value}` criteria into typed predicates
//! - [`auth`] - Role-based entitlement resolution, fail-closed
//! - [`gate`] - Route table and authorization gate in front of every operation
//! - [`query`] - Tenant-scoped, primary-key ordered, paged query plans
//! - [`AdminServer`] - The CRUD operations over pluggable [`storage`]
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tenant_admin::{AdminServer, ListParams, Principal, RequestContext};
//! use tenant_admin::storage::InMemoryStorage;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let server = AdminServer::new(InMemoryStorage::new())?;
//! let context = RequestContext::with_generated_id(Principal::new(Uuid::new_v4(), Uuid::new_v4()));
//!
//! let params = ListParams::new()
//!     .with_filters(r#"[{"PropertyName":"Name","Operator":"StartsWith","Value":"adm"}]"#)
//!     .with_page(1, 10);
//! let roles = server.list(&context, "api/role", &params).await?;
//! # Ok(())
//! # }
//! ```

pub mod admin_server;
pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod filter;
pub mod gate;
pub mod operation_handler;
pub mod query;
pub mod schema;
pub mod storage;

// Re-export commonly used types for convenience
pub use admin_server::{AdminServer, AdminServerBuilder, ListParams};
pub use auth::{Action, Decision, Principal};
pub use config::AdminConfig;
pub use context::RequestContext;
pub use error::{AdminError, AdminResult, BuildError, BuildResult};
pub use schema::{EntitySchema, SchemaRegistry, SemanticType};

pub use operation_handler::{
    AdminOperationHandler, AdminOperationRequest, AdminOperationResponse, OperationMetadata,
};
