//! Storage abstraction layer for entity rows.
//!
//! The `StorageProvider` trait defines pure data operations over JSON rows, keeping
//! entitlement checks and filter compilation out of persistence. Rows are organized
//! as `partition` → `entity` → `id`, where the partition is the owning tenant's id.
//! Entities without a tenant column are partitioned the same way.
//!
//! `put` stores unconditionally. `insert` stores only when the key is free and
//! reports [`StorageError::AlreadyExists`] otherwise, with the check and the write
//! made as one step.
//!
//! # Example Usage
//!
//! ```rust
//! use tenant_admin::storage::{InMemoryStorage, StorageKey, StorageProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//!
//! let key = StorageKey::new("0b8e5a4c-8e0f-4e55-9d38-3f1d0a2b7c11", "Role", "42");
//! storage.put(key.clone(), json!({"Id": "42", "Name": "Auditor"})).await?;
//!
//! assert!(storage.get(key.clone()).await?.is_some());
//! assert!(storage.delete(key).await?);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod in_memory;

pub use errors::StorageError;
pub use in_memory::{InMemoryStorage, InMemoryStorageStats};

use crate::query::QueryPlan;
use serde_json::Value;
use std::fmt;
use std::future::Future;

/// A hierarchical key for identifying rows in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey {
    partition: String,
    entity: String,
    id: String,
}

impl StorageKey {
    pub fn new(
        partition: impl Into<String>,
        entity: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            partition: partition.into(),
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Create a prefix for scanning one entity within a partition.
    pub fn prefix(partition: impl Into<String>, entity: impl Into<String>) -> StoragePrefix {
        StoragePrefix {
            partition: partition.into(),
            entity: entity.into(),
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.partition, self.entity, self.id)
    }
}

/// A prefix for querying rows by partition and entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePrefix {
    partition: String,
    entity: String,
}

impl StoragePrefix {
    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }
}

impl fmt::Display for StoragePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.partition, self.entity)
    }
}

/// Core trait for storage providers that handle pure data persistence.
///
/// Implementations perform no validation and no authorization. Every read that
/// serves a caller's list request goes through [`execute`](Self::execute), which
/// receives a plan already carrying the mandatory tenant clause.
pub trait StorageProvider: Send + Sync {
    /// The error type returned by storage operations.
    ///
    /// Converts into [`StorageError`] so failures keep their kind.
    type Error: std::error::Error + Send + Sync + Into<StorageError> + 'static;

    /// Store a row at `key`, replacing any existing row, and return what was stored.
    fn put(
        &self,
        key: StorageKey,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Store a row at `key` only if no row is there yet.
    fn insert(
        &self,
        key: StorageKey,
        data: Value,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Retrieve a row by key. `None` when absent.
    fn get(
        &self,
        key: StorageKey,
    ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send;

    /// Delete a row. Returns `true` if it existed.
    fn delete(&self, key: StorageKey) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Rows under `prefix` whose top-level `attribute` equals `value` as text.
    ///
    /// String values compare exactly; numbers and booleans compare by their JSON
    /// text. Results are ordered by id.
    fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &str,
    ) -> impl Future<Output = Result<Vec<(StorageKey, Value)>, Self::Error>> + Send;

    fn exists(&self, key: StorageKey) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Number of rows under `prefix`.
    fn count(
        &self,
        prefix: StoragePrefix,
    ) -> impl Future<Output = Result<usize, Self::Error>> + Send;

    /// Run a shaped query: filter by the plan's predicate, order by id ascending,
    /// then skip and take.
    fn execute(
        &self,
        plan: &QueryPlan,
    ) -> impl Future<Output = Result<Vec<Value>, Self::Error>> + Send;

    /// Partitions that hold at least one row.
    fn list_tenants(&self) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send;

    /// Remove every row from every partition.
    fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
