//! Request builder utilities for AdminOperationRequest

use crate::admin_server::ListParams;
use crate::auth::Principal;
use crate::gate::OperationKind;
use crate::operation_handler::core::AdminOperationRequest;
use serde_json::Value;

impl AdminOperationRequest {
    fn bare(operation: OperationKind, route: impl Into<String>) -> Self {
        Self {
            operation,
            route: route.into(),
            resource_id: None,
            data: None,
            query: None,
            principal: None,
            request_id: None,
        }
    }

    /// Create a new add operation request.
    pub fn add(route: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::bare(OperationKind::Add, route)
        }
    }

    /// Create a new list operation request with default paging and no filters.
    pub fn list(route: impl Into<String>) -> Self {
        Self::bare(OperationKind::List, route)
    }

    pub fn get(route: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::bare(OperationKind::GetById, route)
        }
    }

    pub fn update(route: impl Into<String>, resource_id: impl Into<String>, data: Value) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            data: Some(data),
            ..Self::bare(OperationKind::Update, route)
        }
    }

    pub fn delete(route: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: Some(resource_id.into()),
            ..Self::bare(OperationKind::Delete, route)
        }
    }

    /// Attach the authenticated caller.
    pub fn with_principal(mut self, principal: Principal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Add request ID to the request.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Add list parameters to the request.
    pub fn with_query(mut self, query: ListParams) -> Self {
        self.query = Some(query);
        self
    }
}
