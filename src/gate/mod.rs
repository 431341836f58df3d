//! Authorization gate.
//!
//! Every operation passes through [`AuthorizationGate::admit`] before any
//! entity-specific work runs. The gate looks the route up in a [`RouteTable`],
//! asks the [`EntitlementResolver`] for a decision and, on success, hands back an
//! [`AdmittedOperation`]. Handlers require that witness, so an operation that
//! skipped the gate cannot be expressed.
//!
//! # Example Usage
//!
//! ```rust
//! use tenant_admin::auth::{EntitlementResolver, Principal, StorageEntitlementStore};
//! use tenant_admin::gate::{AuthorizationGate, OperationKind, RouteTable};
//! use tenant_admin::schema::SchemaRegistry;
//! use tenant_admin::storage::InMemoryStorage;
//! use tenant_admin::AdminError;
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = Arc::new(SchemaRegistry::with_embedded_schemas()?);
//! let store = StorageEntitlementStore::new(Arc::new(InMemoryStorage::new()));
//! let gate = AuthorizationGate::new(
//!     EntitlementResolver::new(Arc::clone(&registry), store),
//!     RouteTable::from_registry(&registry),
//!     Arc::clone(&registry),
//! );
//!
//! let principal = Principal::new(Uuid::new_v4(), Uuid::new_v4());
//! let result = gate.admit(&principal, "api/books", OperationKind::List).await;
//! assert!(matches!(result, Err(AdminError::Denied { .. })));
//! # Ok(())
//! # }
//! ```

pub mod routes;

pub use routes::{OperationKind, RouteTable};

use crate::auth::{Action, Decision, EntitlementResolver, EntitlementStore, Principal};
use crate::error::{AdminError, AdminResult};
use crate::schema::SchemaRegistry;
use log::{debug, warn};
use std::sync::Arc;

/// Proof that the gate admitted `principal` to perform `action` on `entity`.
///
/// Only the gate can construct this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmittedOperation {
    principal: Principal,
    entity: String,
    action: Action,
}

impl AdmittedOperation {
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Middleware-style gate in front of every entity operation.
pub struct AuthorizationGate<E: EntitlementStore> {
    resolver: EntitlementResolver<E>,
    routes: RouteTable,
    registry: Arc<SchemaRegistry>,
    conceal_unknown_entities: bool,
}

impl<E: EntitlementStore> AuthorizationGate<E> {
    /// Create a gate that reports unknown entities as `Denied`.
    pub fn new(
        resolver: EntitlementResolver<E>,
        routes: RouteTable,
        registry: Arc<SchemaRegistry>,
    ) -> Self {
        Self {
            resolver,
            routes,
            registry,
            conceal_unknown_entities: true,
        }
    }

    /// Choose whether unknown entities are reported as `Denied` (the default) or
    /// as `UnknownEntity`.
    pub fn conceal_unknown_entities(mut self, conceal: bool) -> Self {
        self.conceal_unknown_entities = conceal;
        self
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn resolver(&self) -> &EntitlementResolver<E> {
        &self.resolver
    }

    /// Admit `operation` on the entity registered at `route`.
    pub async fn admit(
        &self,
        principal: &Principal,
        route: &str,
        operation: OperationKind,
    ) -> AdminResult<AdmittedOperation> {
        let Some((entity, action)) = self.routes.requirement(route, operation) else {
            return Err(self.unknown(route, operation.action()));
        };
        let entity = entity.to_string();
        match self.admit_entity(principal, &entity, action).await {
            // Concealed denials name the route as given
            Err(AdminError::Denied { action, .. }) if self.conceal_unknown_entities => {
                Err(AdminError::denied(route, action))
            }
            outcome => outcome,
        }
    }

    /// Admit `action` on `entity_name` directly, bypassing route lookup.
    pub async fn admit_entity(
        &self,
        principal: &Principal,
        entity_name: &str,
        action: Action,
    ) -> AdminResult<AdmittedOperation> {
        if !self.registry.contains(entity_name) {
            return Err(self.unknown(entity_name, action));
        }

        match self
            .resolver
            .authorize_principal(principal, entity_name, action)
            .await
        {
            Decision::Allowed => {
                debug!("Admitted {} {} on '{}'", principal, action, entity_name);
                Ok(AdmittedOperation {
                    principal: *principal,
                    entity: entity_name.to_string(),
                    action,
                })
            }
            Decision::Denied => {
                warn!("Denied {} {} on '{}'", principal, action, entity_name);
                Err(AdminError::denied(entity_name, action))
            }
        }
    }

    fn unknown(&self, name: &str, action: Action) -> AdminError {
        if self.conceal_unknown_entities {
            warn!("Denied {} on unregistered '{}'", action, name);
            AdminError::denied(name, action)
        } else {
            AdminError::unknown_entity(name)
        }
    }
}
