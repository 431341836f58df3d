//! Request context carried through every operation.

use crate::auth::Principal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-request data: a correlation id for logs plus the authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Unique identifier for this request
    pub request_id: String,
    pub principal: Principal,
}

impl RequestContext {
    /// Create a context with a specific request ID.
    pub fn new(request_id: impl Into<String>, principal: Principal) -> Self {
        Self {
            request_id: request_id.into(),
            principal,
        }
    }

    /// Create a context with a generated request ID.
    pub fn with_generated_id(principal: Principal) -> Self {
        Self::new(Uuid::new_v4().to_string(), principal)
    }

    pub fn tenant_id(&self) -> Uuid {
        self.principal.tenant_id
    }

    pub fn user_id(&self) -> Uuid {
        self.principal.user_id
    }
}
