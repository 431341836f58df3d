//! The entitlement resolver.

use super::{Action, Decision, EntitlementStore, Principal};
use crate::schema::SchemaRegistry;
use log::{debug, warn};
use std::sync::Arc;
use uuid::Uuid;

/// Decides whether a user may perform an action on an entity within a tenant.
///
/// Roles are additive: the first role granting the pair allows the request.
pub struct EntitlementResolver<E: EntitlementStore> {
    registry: Arc<SchemaRegistry>,
    store: E,
}

impl<E: EntitlementStore> EntitlementResolver<E> {
    pub fn new(registry: Arc<SchemaRegistry>, store: E) -> Self {
        Self { registry, store }
    }

    pub fn store(&self) -> &E {
        &self.store
    }

    /// Resolve `(user_id, tenant_id, entity_name, action)` to a decision.
    ///
    /// Never fails: unknown entities, users without roles and store errors are
    /// all reported as [`Decision::Denied`].
    pub async fn authorize(
        &self,
        user_id: Uuid,
        tenant_id: Uuid,
        entity_name: &str,
        action: Action,
    ) -> Decision {
        if !self.registry.contains(entity_name) {
            debug!("Denying {} on unknown entity '{}'", action, entity_name);
            return Decision::Denied;
        }

        let roles = match self.store.roles_for_user(tenant_id, user_id).await {
            Ok(roles) => roles,
            Err(e) => {
                warn!(
                    "Role lookup failed for user {} in tenant {}: {}",
                    user_id, tenant_id, e
                );
                return Decision::Denied;
            }
        };

        if roles.is_empty() {
            debug!("User {} holds no roles in tenant {}", user_id, tenant_id);
            return Decision::Denied;
        }

        for role_id in roles {
            match self
                .store
                .role_grants(tenant_id, role_id, entity_name, action)
                .await
            {
                Ok(true) => {
                    debug!(
                        "Role {} grants {} on '{}' to user {}",
                        role_id, action, entity_name, user_id
                    );
                    return Decision::Allowed;
                }
                Ok(false) => {}
                Err(e) => warn!("Grant lookup failed for role {}: {}", role_id, e),
            }
        }

        debug!(
            "No role of user {} grants {} on '{}'",
            user_id, action, entity_name
        );
        Decision::Denied
    }

    /// [`authorize`](Self::authorize) for an authenticated principal.
    pub async fn authorize_principal(
        &self,
        principal: &Principal,
        entity_name: &str,
        action: Action,
    ) -> Decision {
        self.authorize(principal.user_id, principal.tenant_id, entity_name, action)
            .await
    }
}
