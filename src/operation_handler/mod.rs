//! Framework-agnostic operation handler.
//!
//! Wraps an [`AdminServer`](crate::AdminServer) behind a single structured
//! request/response pair so a transport (HTTP, RPC, a CLI) only has to map its
//! own routes and status codes.
//!
//! # Key Types
//!
//! - [`AdminOperationHandler`] - dispatcher that runs the gate and then the operation
//! - [`AdminOperationRequest`] - structured request
//! - [`AdminOperationResponse`] - response with error code, status and metadata
//!
//! # Examples
//!
//! ```rust,no_run
//! use tenant_admin::operation_handler::{AdminOperationHandler, AdminOperationRequest};
//! use tenant_admin::{AdminServer, Principal, storage::InMemoryStorage};
//! use serde_json::json;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handler = AdminOperationHandler::new(AdminServer::new(InMemoryStorage::new())?);
//! let principal = Principal::new(Uuid::new_v4(), Uuid::new_v4());
//!
//! let request = AdminOperationRequest::add("api/role", json!({"Name": "auditors"}))
//!     .with_principal(principal);
//! let response = handler.handle_operation(request).await;
//! assert_eq!(response.status_code, 403);
//! # Ok(())
//! # }
//! ```

mod builders;
mod core;
mod errors;
mod handlers;

pub use core::{
    AdminOperationHandler, AdminOperationRequest, AdminOperationResponse, OperationMetadata,
};

pub use errors::create_error_response;
