//! Route registration: `(route, operation)` → `(entity, action)`.

use crate::auth::Action;
use crate::schema::SchemaRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The five operations every entity exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationKind {
    Add,
    List,
    GetById,
    Update,
    Delete,
}

impl OperationKind {
    pub const ALL: [OperationKind; 5] = [
        OperationKind::Add,
        OperationKind::List,
        OperationKind::GetById,
        OperationKind::Update,
        OperationKind::Delete,
    ];

    /// Action an operation requires.
    pub fn action(self) -> Action {
        match self {
            OperationKind::Add => Action::Create,
            OperationKind::List | OperationKind::GetById => Action::Read,
            OperationKind::Update => Action::Update,
            OperationKind::Delete => Action::Delete,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Maps route segments to entity names.
///
/// Lookups ignore ASCII case, a leading `api/` and surrounding slashes, so
/// `"api/RoleEntitlement/"` and `"roleentitlement"` address the same entity.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: HashMap<String, String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// One route per registered entity, named after the lowercased entity name.
    pub fn from_registry(registry: &SchemaRegistry) -> Self {
        let mut table = Self::new();
        for schema in registry.schemas() {
            table.register(schema.name(), schema.name());
        }
        table
    }

    /// Add or replace a route.
    pub fn register(&mut self, route: &str, entity_name: impl Into<String>) -> &mut Self {
        self.routes.insert(normalize(route), entity_name.into());
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_route(mut self, route: &str, entity_name: impl Into<String>) -> Self {
        self.register(route, entity_name);
        self
    }

    /// Entity served at `route`.
    pub fn resolve(&self, route: &str) -> Option<&str> {
        self.routes.get(&normalize(route)).map(String::as_str)
    }

    /// `(entity, action)` required to run `operation` at `route`.
    pub fn requirement(&self, route: &str, operation: OperationKind) -> Option<(&str, Action)> {
        self.resolve(route)
            .map(|entity| (entity, operation.action()))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

fn normalize(route: &str) -> String {
    let trimmed = route.trim().trim_matches('/');
    let lowered = trimmed.to_ascii_lowercase();
    match lowered.strip_prefix("api/") {
        Some(rest) => rest.trim_matches('/').to_string(),
        None => lowered,
    }
}
