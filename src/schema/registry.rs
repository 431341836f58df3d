//! Schema registry for describing admin entities by name.
//!
//! The registry is built once before traffic starts and is read-only afterwards,
//! so it can be shared behind an `Arc` and read concurrently without locking.

use super::embedded;
use super::types::{EntitySchema, EntitySchemaBuilder, PropertyDescriptor};
use crate::error::{AdminError, AdminResult, BuildError, BuildResult};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;

/// Registry of entity schemas keyed by exact (case-sensitive) entity name.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, EntitySchema>,
    // Registration order, for stable listings
    names: Vec<String>,
}

/// JSON form of an entity definition in the embedded catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityDefinition {
    name: String,
    #[serde(default)]
    tenant_scoped: bool,
    #[serde(default)]
    tenant_property: Option<String>,
    #[serde(default)]
    audited: bool,
    properties: Vec<PropertyDescriptor>,
}

impl SchemaRegistry {
    /// Start an empty registry builder.
    pub fn builder() -> SchemaRegistryBuilder {
        SchemaRegistryBuilder::default()
    }

    /// Create a registry holding the embedded admin catalog.
    pub fn with_embedded_schemas() -> BuildResult<Self> {
        Self::from_json_str(embedded::admin_catalog())
    }

    /// Load a registry from a JSON array of entity definitions.
    pub fn from_json_str(content: &str) -> BuildResult<Self> {
        let definitions: Vec<EntityDefinition> =
            serde_json::from_str(content).map_err(|e| BuildError::SchemaLoad {
                message: e.to_string(),
            })?;

        let mut builder = Self::builder();
        for definition in definitions {
            builder = builder.entity(Self::convert_definition(definition)?);
        }
        builder.build()
    }

    fn convert_definition(definition: EntityDefinition) -> BuildResult<EntitySchema> {
        let mut schema: EntitySchemaBuilder = EntitySchema::builder(definition.name);
        for property in definition.properties {
            schema = schema.property(property);
        }
        if definition.tenant_scoped {
            schema = schema.tenant_scoped();
        }
        if let Some(property) = definition.tenant_property {
            schema = schema.tenant_scoped_by(property);
        }
        if definition.audited {
            schema = schema.audited();
        }
        schema.build()
    }

    /// Describe an entity, failing with `UnknownEntity` when it is not registered.
    pub fn describe(&self, entity_name: &str) -> AdminResult<&EntitySchema> {
        self.schemas
            .get(entity_name)
            .ok_or_else(|| AdminError::unknown_entity(entity_name))
    }

    pub fn get(&self, entity_name: &str) -> Option<&EntitySchema> {
        self.schemas.get(entity_name)
    }

    pub fn contains(&self, entity_name: &str) -> bool {
        self.schemas.contains_key(entity_name)
    }

    /// All schemas in registration order.
    pub fn schemas(&self) -> impl Iterator<Item = &EntitySchema> {
        self.names.iter().filter_map(|name| self.schemas.get(name))
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder collecting entity schemas into a [`SchemaRegistry`].
#[derive(Debug, Default)]
pub struct SchemaRegistryBuilder {
    entities: Vec<EntitySchema>,
}

impl SchemaRegistryBuilder {
    pub fn entity(mut self, schema: EntitySchema) -> Self {
        self.entities.push(schema);
        self
    }

    pub fn build(self) -> BuildResult<SchemaRegistry> {
        let mut registry = SchemaRegistry::default();
        for schema in self.entities {
            let name = schema.name().to_string();
            if registry.schemas.contains_key(&name) {
                return Err(BuildError::DuplicateEntity { entity: name });
            }
            debug!(
                "Registering entity '{}' with {} properties",
                name,
                schema.properties().len()
            );
            registry.names.push(name.clone());
            registry.schemas.insert(name, schema);
        }
        Ok(registry)
    }
}
