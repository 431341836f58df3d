//! Read access to persisted role and entitlement rows.

use super::Action;
use crate::storage::{StorageKey, StorageProvider};
use log::trace;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

const USER_ENTITY: &str = "User";
const ROLE_ENTITY: &str = "Role";
const USER_IN_ROLE_ENTITY: &str = "UserInRole";
const ROLE_ENTITLEMENT_ENTITY: &str = "RoleEntitlement";

/// Source of role memberships and role grants.
///
/// Implementations only read. They must not cache across calls, since the
/// resolver relies on every call observing the current entitlement data.
pub trait EntitlementStore: Send + Sync {
    /// Error type for lookups
    type Error: std::error::Error + Send + Sync + 'static;

    /// Ids of the roles `user_id` holds within `tenant_id`.
    ///
    /// An unknown user holds no roles.
    fn roles_for_user(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send;

    /// Whether `role_id` carries an entitlement for `(entity_name, action)`.
    fn role_grants(
        &self,
        tenant_id: Uuid,
        role_id: Uuid,
        entity_name: &str,
        action: Action,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;
}

/// Entitlement store backed by the `User`, `Role`, `UserInRole` and
/// `RoleEntitlement` rows of a [`StorageProvider`].
///
/// Every row consulted must sit in the requested tenant's partition and carry the
/// same `TenantId`; rows that fail either check are ignored.
pub struct StorageEntitlementStore<S: StorageProvider> {
    storage: Arc<S>,
}

impl<S: StorageProvider> StorageEntitlementStore<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }

    async fn row_exists_in_tenant(
        &self,
        tenant_id: Uuid,
        entity: &str,
        id: Uuid,
    ) -> Result<bool, S::Error> {
        let row = self
            .storage
            .get(StorageKey::new(tenant_id.to_string(), entity, id.to_string()))
            .await?;
        Ok(row.is_some_and(|row| belongs_to(&row, tenant_id)))
    }
}

impl<S: StorageProvider> Clone for StorageEntitlementStore<S> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
        }
    }
}

impl<S: StorageProvider> EntitlementStore for StorageEntitlementStore<S> {
    type Error = S::Error;

    async fn roles_for_user(&self, tenant_id: Uuid, user_id: Uuid) -> Result<Vec<Uuid>, S::Error> {
        if !self
            .row_exists_in_tenant(tenant_id, USER_ENTITY, user_id)
            .await?
        {
            trace!("User {} not found in tenant {}", user_id, tenant_id);
            return Ok(Vec::new());
        }

        let memberships = self
            .storage
            .find_by_attribute(
                StorageKey::prefix(tenant_id.to_string(), USER_IN_ROLE_ENTITY),
                "UserId",
                &user_id.to_string(),
            )
            .await?;

        let mut roles = Vec::new();
        for (_, row) in memberships {
            if !belongs_to(&row, tenant_id) {
                continue;
            }
            let Some(role_id) = guid_field(&row, "RoleId") else {
                continue;
            };
            if roles.contains(&role_id) {
                continue;
            }
            if self
                .row_exists_in_tenant(tenant_id, ROLE_ENTITY, role_id)
                .await?
            {
                roles.push(role_id);
            }
        }

        trace!(
            "User {} holds {} role(s) in tenant {}",
            user_id,
            roles.len(),
            tenant_id
        );
        Ok(roles)
    }

    async fn role_grants(
        &self,
        tenant_id: Uuid,
        role_id: Uuid,
        entity_name: &str,
        action: Action,
    ) -> Result<bool, S::Error> {
        let grants = self
            .storage
            .find_by_attribute(
                StorageKey::prefix(tenant_id.to_string(), ROLE_ENTITLEMENT_ENTITY),
                "RoleId",
                &role_id.to_string(),
            )
            .await?;

        Ok(grants.iter().any(|(_, row)| {
            belongs_to(row, tenant_id)
                && row.get("EntityName").and_then(Value::as_str) == Some(entity_name)
                && row
                    .get("Action")
                    .and_then(Value::as_str)
                    .and_then(|text| text.parse::<Action>().ok())
                    == Some(action)
        }))
    }
}

fn guid_field(row: &Value, field: &str) -> Option<Uuid> {
    row.get(field)
        .and_then(Value::as_str)
        .and_then(|text| Uuid::parse_str(text).ok())
}

fn belongs_to(row: &Value, tenant_id: Uuid) -> bool {
    guid_field(row, "TenantId") == Some(tenant_id)
}
