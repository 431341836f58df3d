//! Builder for configuring admin server instances.

use super::AdminServer;
use crate::config::AdminConfig;
use crate::error::{BuildError, BuildResult};
use crate::gate::RouteTable;
use crate::schema::SchemaRegistry;
use crate::storage::StorageProvider;
use log::info;
use std::sync::Arc;

/// Fluent builder for [`AdminServer`].
///
/// # Examples
///
/// ```rust
/// use tenant_admin::AdminServerBuilder;
/// use tenant_admin::storage::InMemoryStorage;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let server = AdminServerBuilder::new(InMemoryStorage::new())
///     .with_default_page_size(25)
///     .with_max_page_size(Some(200))
///     .with_route("api/entitlements", "RoleEntitlement")
///     .build()?;
///
/// assert_eq!(server.config().default_page_size, 25);
/// assert_eq!(server.gate().routes().resolve("api/entitlements"), Some("RoleEntitlement"));
/// # Ok(())
/// # }
/// ```
pub struct AdminServerBuilder<S> {
    storage: Arc<S>,
    registry: Option<SchemaRegistry>,
    routes: Vec<(String, String)>,
    config: AdminConfig,
}

impl<S: StorageProvider> AdminServerBuilder<S> {
    /// Start from the embedded catalog and default configuration.
    pub fn new(storage: S) -> Self {
        Self::with_shared_storage(Arc::new(storage))
    }

    /// Use storage that is also held elsewhere (e.g. by seeding code).
    pub fn with_shared_storage(storage: Arc<S>) -> Self {
        Self {
            storage,
            registry: None,
            routes: Vec::new(),
            config: AdminConfig::default(),
        }
    }

    /// Serve this registry instead of the embedded catalog.
    pub fn with_registry(mut self, registry: SchemaRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Add or override a route; the entity must be registered.
    pub fn with_route(mut self, route: impl Into<String>, entity_name: impl Into<String>) -> Self {
        self.routes.push((route.into(), entity_name.into()));
        self
    }

    /// Replace the whole configuration.
    pub fn with_config(mut self, config: AdminConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_default_page_size(mut self, page_size: i64) -> Self {
        self.config.default_page_size = page_size;
        self
    }

    pub fn with_max_page_size(mut self, max_page_size: Option<usize>) -> Self {
        self.config.max_page_size = max_page_size;
        self
    }

    pub fn with_in_list_delimiter(mut self, delimiter: char) -> Self {
        self.config.in_list_delimiter = delimiter;
        self
    }

    pub fn with_conceal_unknown_entities(mut self, conceal: bool) -> Self {
        self.config.conceal_unknown_entities = conceal;
        self
    }

    /// Validate the configuration and routes and build the server.
    pub fn build(self) -> BuildResult<AdminServer<S>> {
        let registry = match self.registry {
            Some(registry) => registry,
            None => SchemaRegistry::with_embedded_schemas()?,
        };

        let mut routes = RouteTable::from_registry(&registry);
        for (route, entity) in self.routes {
            if !registry.contains(&entity) {
                return Err(BuildError::InvalidConfiguration {
                    message: format!("route '{}' targets unregistered entity '{}'", route, entity),
                });
            }
            routes.register(&route, entity);
        }

        info!(
            "Building admin server with {} entities and {} routes",
            registry.len(),
            routes.len()
        );
        AdminServer::assemble(self.storage, Arc::new(registry), routes, self.config)
    }
}
