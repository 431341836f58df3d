//! Error types for tenant admin operations.
//!
//! Every failure the core can detect is reported synchronously as a distinct
//! [`AdminError`] variant. None of them are retried or swallowed inside the core;
//! transient persistence failures surface as [`AdminError::Storage`].

use crate::auth::Action;
use crate::filter::OperatorKind;
use crate::schema::SemanticType;
use crate::storage::StorageError;

/// Main error type for admin operations.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The named entity is not part of the schema registry
    #[error("Unknown entity: {entity}")]
    UnknownEntity { entity: String },

    /// A filter criterion or request body named a property the entity does not have
    #[error("Unknown property '{property}' on entity '{entity}'")]
    UnknownProperty { entity: String, property: String },

    /// A transport-level value could not be coerced to the property's type
    #[error("Value '{value}' for property '{property}' is not a valid {expected}")]
    TypeMismatch {
        property: String,
        expected: SemanticType,
        value: String,
    },

    /// The operator does not apply to the property's type
    #[error("Operator {operator} is not supported for {semantic_type} property '{property}'")]
    UnsupportedOperator {
        property: String,
        operator: OperatorKind,
        semantic_type: SemanticType,
    },

    /// The `filters` parameter was not a valid criteria array
    #[error("Malformed filter syntax: {message}")]
    MalformedFilterSyntax { message: String },

    /// The caller holds no entitlement for the requested action
    #[error("Access denied: {action} on '{entity}'")]
    Denied { entity: String, action: Action },

    /// The addressed row does not exist in the caller's tenant
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: String, id: String },

    /// Path id and body id disagree on update
    #[error("Mismatched Id: path id {path_id} does not match body id {body_id}")]
    IdMismatch { path_id: String, body_id: String },

    /// Request parameters or payload are invalid
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Failure reported by the persistence collaborator
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised while building the schema registry or the server.
///
/// These are programming errors and should be caught during development.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// An entity was registered twice
    #[error("Entity '{entity}' is already registered")]
    DuplicateEntity { entity: String },

    /// A property was declared twice on the same entity
    #[error("Property '{property}' is declared twice on entity '{entity}'")]
    DuplicateProperty { entity: String, property: String },

    /// The tenant-scoping property is missing or not an identifier
    #[error("Invalid tenant property '{property}' on entity '{entity}': {reason}")]
    InvalidTenantProperty {
        entity: String,
        property: String,
        reason: String,
    },

    /// Invalid configuration provided
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Embedded schema data could not be loaded
    #[error("Failed to load schema: {message}")]
    SchemaLoad { message: String },
}

impl AdminError {
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntity {
            entity: entity.into(),
        }
    }

    pub fn unknown_property(entity: impl Into<String>, property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            entity: entity.into(),
            property: property.into(),
        }
    }

    pub fn type_mismatch(
        property: impl Into<String>,
        expected: SemanticType,
        value: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            property: property.into(),
            expected,
            value: value.into(),
        }
    }

    pub fn denied(entity: impl Into<String>, action: Action) -> Self {
        Self::Denied {
            entity: entity.into(),
            action,
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Stable machine-readable code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownEntity { .. } => "UNKNOWN_ENTITY",
            Self::UnknownProperty { .. } => "UNKNOWN_PROPERTY",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::UnsupportedOperator { .. } => "UNSUPPORTED_OPERATOR",
            Self::MalformedFilterSyntax { .. } => "MALFORMED_FILTER_SYNTAX",
            Self::Denied { .. } => "DENIED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::IdMismatch { .. } => "ID_MISMATCH",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// HTTP status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Denied { .. } => 403,
            Self::NotFound { .. } | Self::UnknownEntity { .. } => 404,
            Self::Storage(_) => 500,
            _ => 400,
        }
    }
}

// Result type aliases for convenience
pub type AdminResult<T> = Result<T, AdminError>;
pub type BuildResult<T> = Result<T, BuildError>;
