//! In-memory storage implementation for entity rows.
//!
//! A thread-safe implementation of [`StorageProvider`] over nested `HashMap`s
//! behind a tokio `RwLock`. Intended for tests, demos and embedding, where
//! persistence is not required.
//!
//! * PUT/GET/DELETE: O(1) average case
//! * EXECUTE: O(n log n) in the rows of one partition/entity pair
//! * FIND_BY_ATTRIBUTE: O(n)
//!
//! Ids are stored as canonical lowercase GUID text, so sorting keys as strings
//! yields primary-key order.
//!
//! # Example Usage
//!
//! ```rust
//! use tenant_admin::storage::{InMemoryStorage, StorageKey, StorageProvider};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = InMemoryStorage::new();
//! let tenant = "6f1c3c1e-4b7a-4a51-8f0e-2d3b9c4a5e60";
//!
//! storage
//!     .put(StorageKey::new(tenant, "User", "1"), json!({"Id": "1", "UserName": "ada"}))
//!     .await?;
//!
//! let prefix = StorageKey::prefix(tenant, "User");
//! let found = storage.find_by_attribute(prefix, "UserName", "ada").await?;
//! assert_eq!(found.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::query::QueryPlan;
use crate::storage::{StorageError, StorageKey, StoragePrefix, StorageProvider};
use log::trace;
use serde_json::Value;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

type EntityRows = HashMap<String, Value>;

/// Thread-safe in-memory storage.
///
/// Layout: `partition` → `entity` → `id` → `row`.
#[derive(Clone)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, HashMap<String, EntityRows>>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get storage statistics for debugging and monitoring.
    pub async fn stats(&self) -> InMemoryStorageStats {
        let data_guard = self.data.read().await;
        let mut stats = InMemoryStorageStats {
            partition_count: 0,
            entity_count: 0,
            total_rows: 0,
        };

        for partition in data_guard.values() {
            stats.partition_count += 1;
            for rows in partition.values() {
                stats.entity_count += 1;
                stats.total_rows += rows.len();
            }
        }

        stats
    }

    fn attribute_text(data: &Value, attribute: &str) -> Option<String> {
        match data.get(attribute)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn require_object(key: &StorageKey, data: &Value) -> Result<(), StorageError> {
        if data.is_object() {
            Ok(())
        } else {
            Err(StorageError::invalid_data(format!(
                "row for {} must be a JSON object",
                key
            )))
        }
    }

    fn sorted_ids(rows: &EntityRows) -> Vec<&String> {
        let mut ids: Vec<_> = rows.keys().collect();
        ids.sort();
        ids
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageProvider for InMemoryStorage {
    type Error = StorageError;

    async fn put(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        Self::require_object(&key, &data)?;

        let mut data_guard = self.data.write().await;
        data_guard
            .entry(key.partition().to_string())
            .or_default()
            .entry(key.entity().to_string())
            .or_default()
            .insert(key.id().to_string(), data.clone());

        trace!("Stored row at {}", key);
        Ok(data)
    }

    async fn insert(&self, key: StorageKey, data: Value) -> Result<Value, Self::Error> {
        Self::require_object(&key, &data)?;

        let mut data_guard = self.data.write().await;
        let rows = data_guard
            .entry(key.partition().to_string())
            .or_default()
            .entry(key.entity().to_string())
            .or_default();

        match rows.entry(key.id().to_string()) {
            Entry::Occupied(_) => Err(StorageError::already_exists(&key)),
            Entry::Vacant(slot) => {
                slot.insert(data.clone());
                trace!("Inserted row at {}", key);
                Ok(data)
            }
        }
    }

    async fn get(&self, key: StorageKey) -> Result<Option<Value>, Self::Error> {
        let data_guard = self.data.read().await;

        Ok(data_guard
            .get(key.partition())
            .and_then(|partition| partition.get(key.entity()))
            .and_then(|rows| rows.get(key.id()))
            .cloned())
    }

    async fn delete(&self, key: StorageKey) -> Result<bool, Self::Error> {
        let mut data_guard = self.data.write().await;

        let existed = data_guard
            .get_mut(key.partition())
            .and_then(|partition| partition.get_mut(key.entity()))
            .map(|rows| rows.remove(key.id()).is_some())
            .unwrap_or(false);

        Ok(existed)
    }

    async fn find_by_attribute(
        &self,
        prefix: StoragePrefix,
        attribute: &str,
        value: &str,
    ) -> Result<Vec<(StorageKey, Value)>, Self::Error> {
        let data_guard = self.data.read().await;

        let Some(rows) = data_guard
            .get(prefix.partition())
            .and_then(|partition| partition.get(prefix.entity()))
        else {
            return Ok(Vec::new());
        };

        let results = Self::sorted_ids(rows)
            .into_iter()
            .filter_map(|id| {
                let row = rows.get(id)?;
                (Self::attribute_text(row, attribute).as_deref() == Some(value)).then(|| {
                    (
                        StorageKey::new(prefix.partition(), prefix.entity(), id.as_str()),
                        row.clone(),
                    )
                })
            })
            .collect();

        Ok(results)
    }

    async fn exists(&self, key: StorageKey) -> Result<bool, Self::Error> {
        let data_guard = self.data.read().await;

        Ok(data_guard
            .get(key.partition())
            .and_then(|partition| partition.get(key.entity()))
            .is_some_and(|rows| rows.contains_key(key.id())))
    }

    async fn count(&self, prefix: StoragePrefix) -> Result<usize, Self::Error> {
        let data_guard = self.data.read().await;

        Ok(data_guard
            .get(prefix.partition())
            .and_then(|partition| partition.get(prefix.entity()))
            .map(|rows| rows.len())
            .unwrap_or(0))
    }

    async fn execute(&self, plan: &QueryPlan) -> Result<Vec<Value>, Self::Error> {
        if plan.limit() == 0 {
            return Ok(Vec::new());
        }

        let data_guard = self.data.read().await;

        let Some(rows) = data_guard
            .get(&plan.partition())
            .and_then(|partition| partition.get(plan.entity()))
        else {
            return Ok(Vec::new());
        };

        let ordered = Self::sorted_ids(rows).into_iter().filter_map(|id| rows.get(id));
        let page = plan.select(ordered);
        trace!("Executed {} -> {} rows", plan, page.len());
        Ok(page)
    }

    async fn list_tenants(&self) -> Result<Vec<String>, Self::Error> {
        let data_guard = self.data.read().await;

        let mut partitions: Vec<String> = data_guard
            .iter()
            .filter(|(_, partition)| partition.values().any(|rows| !rows.is_empty()))
            .map(|(name, _)| name.clone())
            .collect();
        partitions.sort();
        Ok(partitions)
    }

    async fn clear(&self) -> Result<(), Self::Error> {
        self.data.write().await.clear();
        Ok(())
    }
}

/// Statistics about the current state of in-memory storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InMemoryStorageStats {
    /// Number of partitions with data
    pub partition_count: usize,
    /// Number of entity tables across all partitions
    pub entity_count: usize,
    /// Total number of rows
    pub total_rows: usize,
}
