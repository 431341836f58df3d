//! Core operation handler infrastructure
//!
//! This module contains the request and response types and the dispatcher. The
//! dispatcher runs the authorization gate once, as middleware, and only then
//! hands the admitted operation to a per-kind handler.

use crate::admin_server::{AdminServer, ListParams};
use crate::auth::Principal;
use crate::context::RequestContext;
use crate::error::{AdminError, AdminResult};
use crate::gate::OperationKind;
use crate::storage::StorageProvider;
use log::{debug, info, warn};
use serde_json::Value;
use std::collections::HashMap;

/// Transport-agnostic handler for entity operations.
pub struct AdminOperationHandler<S: StorageProvider> {
    pub(super) server: AdminServer<S>,
}

/// Structured request for an entity operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOperationRequest {
    /// The operation to perform
    pub operation: OperationKind,
    /// Route the request arrived on, e.g. `api/role`
    pub route: String,
    /// Path id for GetById, Update and Delete
    pub resource_id: Option<String>,
    /// Body for Add and Update
    pub data: Option<Value>,
    /// Parameters for List
    pub query: Option<ListParams>,
    /// Authenticated caller; requests without one are denied
    pub principal: Option<Principal>,
    /// Request ID for tracing and correlation
    pub request_id: Option<String>,
}

/// Structured response from an entity operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOperationResponse {
    pub success: bool,
    /// The primary data returned by the operation
    pub data: Option<Value>,
    /// Error message if the operation failed
    pub error: Option<String>,
    /// Error code for programmatic handling
    pub error_code: Option<String>,
    /// HTTP status a transport should answer with
    pub status_code: u16,
    pub metadata: OperationMetadata,
}

/// Metadata about an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationMetadata {
    /// Entity the route resolved to, when admitted
    pub entity: Option<String>,
    pub route: Option<String>,
    pub resource_id: Option<String>,
    /// Number of rows returned
    pub resource_count: Option<usize>,
    pub request_id: String,
    pub tenant_id: Option<String>,
    pub additional: HashMap<String, Value>,
}

impl OperationMetadata {
    pub(super) fn new(request_id: impl Into<String>) -> Self {
        Self {
            entity: None,
            route: None,
            resource_id: None,
            resource_count: None,
            request_id: request_id.into(),
            tenant_id: None,
            additional: HashMap::new(),
        }
    }
}

impl<S: StorageProvider> AdminOperationHandler<S> {
    pub fn new(server: AdminServer<S>) -> Self {
        Self { server }
    }

    /// Handle a structured request.
    ///
    /// Failures never escape as `Err`; they are folded into an unsuccessful
    /// response carrying the error code and status.
    pub async fn handle_operation(&self, request: AdminOperationRequest) -> AdminOperationResponse {
        let request_id = request
            .request_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let tenant_id = request.principal.map(|p| p.tenant_id.to_string());

        info!(
            "Admin operation handler processing {} on '{}' (request: '{}')",
            request.operation, request.route, request_id
        );

        let result = self.dispatch(request, &request_id).await;

        match &result {
            Ok(_) => debug!(
                "Admin operation handler completed successfully (request: '{}')",
                request_id
            ),
            Err(e) => warn!("Admin operation handler failed: {} (request: '{}')", e, request_id),
        }

        result.unwrap_or_else(|e| super::errors::create_error_response(e, request_id, tenant_id))
    }

    async fn dispatch(
        &self,
        request: AdminOperationRequest,
        request_id: &str,
    ) -> AdminResult<AdminOperationResponse> {
        let principal = request.principal.ok_or_else(|| {
            AdminError::denied(request.route.as_str(), request.operation.action())
        })?;
        let context = RequestContext::new(request_id, principal);

        let admitted = self
            .server
            .admit(&context, &request.route, request.operation)
            .await?;

        match request.operation {
            OperationKind::Add => {
                super::handlers::crud::handle_add(self, request, &context, &admitted).await
            }
            OperationKind::List => {
                super::handlers::query::handle_list(self, request, &context, &admitted).await
            }
            OperationKind::GetById => {
                super::handlers::crud::handle_get(self, request, &context, &admitted).await
            }
            OperationKind::Update => {
                super::handlers::crud::handle_update(self, request, &context, &admitted).await
            }
            OperationKind::Delete => {
                super::handlers::crud::handle_delete(self, request, &context, &admitted).await
            }
        }
    }

    /// Get access to the underlying admin server.
    pub fn server(&self) -> &AdminServer<S> {
        &self.server
    }
}
