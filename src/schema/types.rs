//! Core schema type definitions for admin entities.
//!
//! An [`EntitySchema`] is the static description of one entity type: its ordered
//! properties, the property that scopes rows to a tenant, and whether the entity
//! carries audit columns. Schemas are immutable once built.

use crate::error::{BuildError, BuildResult};
use crate::filter::OperatorKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Name of the Guid primary key every entity carries.
pub const PRIMARY_KEY: &str = "Id";

/// Audit columns added by [`EntitySchemaBuilder::audited`].
pub const CREATED_BY: &str = "CreatedBy";
pub const CREATED_ON: &str = "CreatedOn";
pub const UPDATED_BY: &str = "UpdatedBy";
pub const UPDATED_ON: &str = "UpdatedOn";

/// Semantic type of an entity property.
///
/// Transport-level filter values are coerced to this type before comparison.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SemanticType {
    String,
    Integer,
    Decimal,
    Boolean,
    DateTime,
    Guid,
    /// Guid foreign key to another entity's primary key
    EntityReference,
}

impl SemanticType {
    /// Whether `operator` can be applied to a property of this type.
    pub fn supports(self, operator: OperatorKind) -> bool {
        use OperatorKind::*;
        match operator {
            Equal | NotEqual | In => true,
            Contains | StartsWith | EndsWith => self == SemanticType::String,
            GreaterThan | GreaterOrEqual | LessThan | LessOrEqual => matches!(
                self,
                SemanticType::Integer | SemanticType::Decimal | SemanticType::DateTime
            ),
        }
    }

    /// Whether values of this type are Guid identifiers.
    pub fn is_identifier(self) -> bool {
        matches!(self, SemanticType::Guid | SemanticType::EntityReference)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::String => "String",
            SemanticType::Integer => "Integer",
            SemanticType::Decimal => "Decimal",
            SemanticType::Boolean => "Boolean",
            SemanticType::DateTime => "DateTime",
            SemanticType::Guid => "Guid",
            SemanticType::EntityReference => "EntityReference",
        };
        f.write_str(name)
    }
}

/// Definition of a single filterable property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name, matched case-sensitively
    pub name: String,
    /// Semantic type values are coerced to
    #[serde(rename = "type")]
    pub semantic_type: SemanticType,
    /// Whether the property may hold no value
    #[serde(default)]
    pub nullable: bool,
    /// Whether string comparison is case-sensitive
    #[serde(default = "default_case_exact")]
    pub case_exact: bool,
}

fn default_case_exact() -> bool {
    true
}

impl PropertyDescriptor {
    /// Create a required, case-exact property.
    pub fn new(name: impl Into<String>, semantic_type: SemanticType) -> Self {
        Self {
            name: name.into(),
            semantic_type,
            nullable: false,
            case_exact: true,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Compare string values of this property without regard to case.
    pub fn case_insensitive(mut self) -> Self {
        self.case_exact = false;
        self
    }
}

/// Static description of one entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    name: String,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<String, usize>,
    tenant_property: Option<String>,
    audited: bool,
}

impl EntitySchema {
    /// Start building a schema for `name`. The `Id` primary key is added automatically.
    pub fn builder(name: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Properties in declaration order, primary key first.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Look up a property by exact name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// Name of the property holding the owning tenant's id, if the entity is tenant-scoped.
    pub fn tenant_property(&self) -> Option<&str> {
        self.tenant_property.as_deref()
    }

    /// Whether rows carry CreatedBy/CreatedOn/UpdatedBy/UpdatedOn columns.
    pub fn is_audited(&self) -> bool {
        self.audited
    }

    pub fn primary_key(&self) -> &str {
        PRIMARY_KEY
    }
}

/// Builder for [`EntitySchema`].
#[derive(Debug, Clone)]
pub struct EntitySchemaBuilder {
    name: String,
    properties: Vec<PropertyDescriptor>,
    tenant_property: Option<String>,
    audited: bool,
}

impl EntitySchemaBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: vec![PropertyDescriptor::new(PRIMARY_KEY, SemanticType::Guid)],
            tenant_property: None,
            audited: false,
        }
    }

    /// Append a property.
    pub fn property(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.push(descriptor);
        self
    }

    /// Shorthand for a required, case-exact property.
    pub fn field(self, name: impl Into<String>, semantic_type: SemanticType) -> Self {
        self.property(PropertyDescriptor::new(name, semantic_type))
    }

    /// Scope rows by a `TenantId` foreign key, declaring it if absent.
    pub fn tenant_scoped(mut self) -> Self {
        if !self.properties.iter().any(|p| p.name == "TenantId") {
            self.properties.push(PropertyDescriptor::new(
                "TenantId",
                SemanticType::EntityReference,
            ));
        }
        self.tenant_property = Some("TenantId".to_string());
        self
    }

    /// Scope rows by an already declared identifier property.
    pub fn tenant_scoped_by(mut self, property: impl Into<String>) -> Self {
        self.tenant_property = Some(property.into());
        self
    }

    /// Add the audit columns.
    pub fn audited(mut self) -> Self {
        self.audited = true;
        self.properties.extend([
            PropertyDescriptor::new(CREATED_BY, SemanticType::EntityReference),
            PropertyDescriptor::new(CREATED_ON, SemanticType::DateTime),
            PropertyDescriptor::new(UPDATED_BY, SemanticType::EntityReference).nullable(),
            PropertyDescriptor::new(UPDATED_ON, SemanticType::DateTime).nullable(),
        ]);
        self
    }

    pub fn build(self) -> BuildResult<EntitySchema> {
        let mut index = HashMap::with_capacity(self.properties.len());
        for (i, property) in self.properties.iter().enumerate() {
            if index.insert(property.name.clone(), i).is_some() {
                return Err(BuildError::DuplicateProperty {
                    entity: self.name,
                    property: property.name.clone(),
                });
            }
        }

        if let Some(tenant_property) = &self.tenant_property {
            let reason = match index.get(tenant_property) {
                None => Some("property is not declared"),
                Some(&i) if !self.properties[i].semantic_type.is_identifier() => {
                    Some("property must be a Guid or EntityReference")
                }
                Some(&i) if self.properties[i].nullable => Some("property must not be nullable"),
                Some(_) => None,
            };
            if let Some(reason) = reason {
                return Err(BuildError::InvalidTenantProperty {
                    entity: self.name,
                    property: tenant_property.clone(),
                    reason: reason.to_string(),
                });
            }
        }

        Ok(EntitySchema {
            name: self.name,
            properties: self.properties,
            index,
            tenant_property: self.tenant_property,
            audited: self.audited,
        })
    }
}
