//! CRUD operations for entity rows.
//!
//! Every public operation first obtains an [`AdmittedOperation`] from the gate.
//! The `*_admitted` variants accept a witness obtained separately, so a transport
//! layer can run the gate as middleware and dispatch afterwards.

use super::AdminServer;
use super::rows::{self, Row};
use crate::auth::Action;
use crate::context::RequestContext;
use crate::error::{AdminError, AdminResult};
use crate::filter::parse_filters;
use crate::gate::{AdmittedOperation, OperationKind};
use crate::query::Pagination;
use crate::schema::{EntitySchema, PRIMARY_KEY};
use crate::storage::{StorageError, StorageKey, StorageProvider};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Transport-level parameters of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// JSON array of `{PropertyName, Operator, Value}` criteria
    pub filters: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = Some(filters.into());
        self
    }

    pub fn with_page(mut self, page_number: i64, page_size: i64) -> Self {
        self.page_number = Some(page_number);
        self.page_size = Some(page_size);
        self
    }
}

impl<S: StorageProvider> AdminServer<S> {
    /// Run the gate for `operation` at `route`.
    pub async fn admit(
        &self,
        context: &RequestContext,
        route: &str,
        operation: OperationKind,
    ) -> AdminResult<AdmittedOperation> {
        info!(
            "{} on '{}' by {} (request: '{}')",
            operation, route, context.principal, context.request_id
        );
        self.gate.admit(&context.principal, route, operation).await
    }

    /// Create a row and return its id.
    pub async fn add(&self, context: &RequestContext, route: &str, body: Value) -> AdminResult<Uuid> {
        let admitted = self.admit(context, route, OperationKind::Add).await?;
        self.add_admitted(&admitted, body).await
    }

    /// List one page of rows matching `params.filters` within the caller's tenant.
    pub async fn list(
        &self,
        context: &RequestContext,
        route: &str,
        params: &ListParams,
    ) -> AdminResult<Vec<Value>> {
        let admitted = self.admit(context, route, OperationKind::List).await?;
        self.list_admitted(&admitted, params).await
    }

    pub async fn get_by_id(&self, context: &RequestContext, route: &str, id: &str) -> AdminResult<Value> {
        let admitted = self.admit(context, route, OperationKind::GetById).await?;
        self.get_admitted(&admitted, id).await
    }

    /// Replace a row. The body must carry the same `Id` as the path.
    pub async fn update(
        &self,
        context: &RequestContext,
        route: &str,
        id: &str,
        body: Value,
    ) -> AdminResult<Value> {
        let admitted = self.admit(context, route, OperationKind::Update).await?;
        self.update_admitted(&admitted, id, body).await
    }

    /// Delete a row and return the number of rows removed.
    pub async fn delete(&self, context: &RequestContext, route: &str, id: &str) -> AdminResult<u64> {
        let admitted = self.admit(context, route, OperationKind::Delete).await?;
        self.delete_admitted(&admitted, id).await
    }

    pub async fn add_admitted(&self, admitted: &AdmittedOperation, body: Value) -> AdminResult<Uuid> {
        let schema = self.schema_for(admitted, Action::Create)?;
        let principal = admitted.principal();

        let mut row = rows::validate_body(schema, body)?;
        let id = rows::stamp_identity(schema, &mut row, principal.tenant_id);
        rows::stamp_created(schema, &mut row, principal, Utc::now());
        rows::check_required(schema, &row)?;

        let key = self.key(schema, principal.tenant_id, id);
        match self.storage.insert(key, Value::Object(row)).await.map_err(Into::<StorageError>::into) {
            Ok(_) => {}
            Err(StorageError::AlreadyExists { .. }) => {
                return Err(AdminError::invalid_request(format!(
                    "{} with ID {} already exists",
                    schema.name(),
                    id
                )));
            }
            Err(e) => return Err(AdminError::Storage(e)),
        }
        debug!("Created {} {} in tenant {}", schema.name(), id, principal.tenant_id);
        Ok(id)
    }

    pub async fn list_admitted(
        &self,
        admitted: &AdmittedOperation,
        params: &ListParams,
    ) -> AdminResult<Vec<Value>> {
        let schema = self.schema_for(admitted, Action::Read)?;

        let criteria = parse_filters(params.filters.as_deref())?;
        let predicate = self.compiler.compile(schema, &criteria)?;
        let pagination = Pagination::new(
            params.page_number.unwrap_or(self.config.default_page_number),
            params.page_size.unwrap_or(self.config.default_page_size),
        )?;
        let plan = self
            .shaper
            .shape(schema, predicate, admitted.principal().tenant_id, pagination)?;

        let rows = self.storage.execute(&plan).await.map_err(storage_failure)?;
        debug!("Listed {} {} row(s)", rows.len(), schema.name());
        Ok(rows)
    }

    pub async fn get_admitted(&self, admitted: &AdmittedOperation, id: &str) -> AdminResult<Value> {
        let schema = self.schema_for(admitted, Action::Read)?;
        let id = rows::path_id(schema, id)?;
        self.fetch_owned(schema, admitted.principal().tenant_id, id)
            .await?
            .ok_or_else(|| AdminError::not_found(schema.name(), id.to_string()))
    }

    pub async fn update_admitted(
        &self,
        admitted: &AdmittedOperation,
        id: &str,
        body: Value,
    ) -> AdminResult<Value> {
        let schema = self.schema_for(admitted, Action::Update)?;
        let principal = admitted.principal();
        let path_id = rows::path_id(schema, id)?;

        let mut row = rows::validate_body(schema, body)?;
        check_body_id(&row, path_id, id)?;

        let existing = self
            .fetch_owned(schema, principal.tenant_id, path_id)
            .await?
            .ok_or_else(|| AdminError::not_found(schema.name(), path_id.to_string()))?;

        rows::stamp_identity(schema, &mut row, principal.tenant_id);
        rows::stamp_updated(schema, &mut row, &existing, principal, Utc::now());
        rows::check_required(schema, &row)?;

        let stored = self
            .storage
            .put(self.key(schema, principal.tenant_id, path_id), Value::Object(row))
            .await
            .map_err(storage_failure)?;
        debug!("Updated {} {}", schema.name(), path_id);
        Ok(stored)
    }

    pub async fn delete_admitted(&self, admitted: &AdmittedOperation, id: &str) -> AdminResult<u64> {
        let schema = self.schema_for(admitted, Action::Delete)?;
        let tenant_id = admitted.principal().tenant_id;
        let id = rows::path_id(schema, id)?;

        if self.fetch_owned(schema, tenant_id, id).await?.is_none() {
            return Err(AdminError::not_found(schema.name(), id.to_string()));
        }

        let removed = self
            .storage
            .delete(self.key(schema, tenant_id, id))
            .await
            .map_err(storage_failure)?;
        debug!("Deleted {} {}: {}", schema.name(), id, removed);
        Ok(u64::from(removed))
    }

    /// Schema of the admitted entity, provided the witness grants `action`.
    fn schema_for(&self, admitted: &AdmittedOperation, action: Action) -> AdminResult<&EntitySchema> {
        if admitted.action() != action {
            return Err(AdminError::denied(admitted.entity(), action));
        }
        self.registry.describe(admitted.entity())
    }

    fn key(&self, schema: &EntitySchema, tenant_id: Uuid, id: Uuid) -> StorageKey {
        StorageKey::new(tenant_id.to_string(), schema.name(), id.to_string())
    }

    async fn fetch_owned(
        &self,
        schema: &EntitySchema,
        tenant_id: Uuid,
        id: Uuid,
    ) -> AdminResult<Option<Value>> {
        let row = self
            .storage
            .get(self.key(schema, tenant_id, id))
            .await
            .map_err(storage_failure)?;
        Ok(row.filter(|row| rows::owned_by(schema, row, tenant_id)))
    }
}

fn check_body_id(row: &Row, path_id: Uuid, raw_path_id: &str) -> AdminResult<()> {
    match rows::guid(row, PRIMARY_KEY) {
        Some(body_id) if body_id == path_id => Ok(()),
        Some(body_id) => Err(AdminError::IdMismatch {
            path_id: raw_path_id.to_string(),
            body_id: body_id.to_string(),
        }),
        None => Err(AdminError::IdMismatch {
            path_id: raw_path_id.to_string(),
            body_id: String::new(),
        }),
    }
}

fn storage_failure(error: impl Into<StorageError>) -> AdminError {
    AdminError::Storage(error.into())
}
