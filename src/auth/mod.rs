//! Role-based entitlement resolution.
//!
//! A user may perform an [`Action`] on an entity when at least one role the user
//! holds in the tenant carries a matching entitlement row. Resolution is fail-closed:
//! zero roles, an unknown entity, a missing user or any store failure all resolve to
//! [`Decision::Denied`].
//!
//! Decisions are never cached. Every call re-reads the entitlement data, so a role
//! losing a permission takes effect on the next request.
//!
//! # Example Usage
//!
//! ```rust
//! use tenant_admin::auth::{Action, Decision, EntitlementResolver, StorageEntitlementStore};
//! use tenant_admin::schema::SchemaRegistry;
//! use tenant_admin::storage::InMemoryStorage;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(SchemaRegistry::with_embedded_schemas()?);
//! let store = StorageEntitlementStore::new(Arc::new(InMemoryStorage::new()));
//! let resolver = EntitlementResolver::new(registry, store);
//!
//! // Nobody holds any role yet.
//! let decision = resolver
//!     .authorize(Uuid::new_v4(), Uuid::new_v4(), "Role", Action::Read)
//!     .await;
//! assert_eq!(decision, Decision::Denied);
//! # Ok(())
//! # }
//! ```

pub mod resolver;
pub mod store;

pub use resolver::EntitlementResolver;
pub use store::{EntitlementStore, StorageEntitlementStore};

use crate::error::AdminError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Operation kind an entitlement grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Read => "Read",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = AdminError;

    /// Parse an action name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AdminError::invalid_request(format!("Unknown action '{}'", s)))
    }
}

/// Outcome of an entitlement check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allowed,
    Denied,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        self == Decision::Allowed
    }
}

/// The authenticated caller: a user acting within one tenant.
///
/// Authentication itself happens outside this crate; a `Principal` is the
/// already-verified identity handed in by the transport layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
}

impl Principal {
    pub fn new(user_id: Uuid, tenant_id: Uuid) -> Self {
        Self { user_id, tenant_id }
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.user_id, self.tenant_id)
    }
}
