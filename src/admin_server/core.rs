//! Core admin server structure and initialization.

use crate::auth::{EntitlementResolver, StorageEntitlementStore};
use crate::config::AdminConfig;
use crate::error::BuildResult;
use crate::filter::FilterCompiler;
use crate::gate::{AuthorizationGate, RouteTable};
use crate::query::QueryShaper;
use crate::schema::SchemaRegistry;
use crate::storage::StorageProvider;
use std::sync::Arc;

/// Multi-tenant admin server.
///
/// Owns the immutable schema registry, the authorization gate and the filter and
/// query components, and drives the persistence collaborator `S`. Entitlement
/// rows are read from the same storage the entities live in.
///
/// # Examples
///
/// ```rust
/// use tenant_admin::{AdminServer, storage::InMemoryStorage};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let server = AdminServer::new(InMemoryStorage::new())?;
/// assert!(server.registry().contains("RoleEntitlement"));
/// # Ok(())
/// # }
/// ```
pub struct AdminServer<S: StorageProvider> {
    pub(super) registry: Arc<SchemaRegistry>,
    pub(super) storage: Arc<S>,
    pub(super) gate: AuthorizationGate<StorageEntitlementStore<S>>,
    pub(super) compiler: FilterCompiler,
    pub(super) shaper: QueryShaper,
    pub(super) config: AdminConfig,
}

impl<S: StorageProvider> AdminServer<S> {
    /// Create a server over the embedded entity catalog with default configuration.
    pub fn new(storage: S) -> BuildResult<Self> {
        super::AdminServerBuilder::new(storage).build()
    }

    pub(super) fn assemble(
        storage: Arc<S>,
        registry: Arc<SchemaRegistry>,
        routes: RouteTable,
        config: AdminConfig,
    ) -> BuildResult<Self> {
        config.validate()?;

        let resolver = EntitlementResolver::new(
            Arc::clone(&registry),
            StorageEntitlementStore::new(Arc::clone(&storage)),
        );
        let gate = AuthorizationGate::new(resolver, routes, Arc::clone(&registry))
            .conceal_unknown_entities(config.conceal_unknown_entities);

        Ok(Self {
            registry,
            storage,
            gate,
            compiler: FilterCompiler::new(config.in_list_delimiter),
            shaper: QueryShaper::new(config.max_page_size),
            config,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// The persistence collaborator.
    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    pub fn gate(&self) -> &AuthorizationGate<StorageEntitlementStore<S>> {
        &self.gate
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }
}
