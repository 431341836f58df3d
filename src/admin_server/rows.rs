//! Request body validation and server-side stamping of rows.

use crate::auth::Principal;
use crate::error::{AdminError, AdminResult};
use crate::filter::TypedValue;
use crate::schema::types::{CREATED_BY, CREATED_ON, UPDATED_BY, UPDATED_ON};
use crate::schema::{EntitySchema, PRIMARY_KEY, SemanticType};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

pub(super) type Row = Map<String, Value>;

/// Check every property of `body` against `schema` and rewrite values in
/// canonical form (lowercase GUIDs, RFC 3339 UTC timestamps, decimal text).
pub(super) fn validate_body(schema: &EntitySchema, body: Value) -> AdminResult<Row> {
    let Value::Object(fields) = body else {
        return Err(AdminError::invalid_request(format!(
            "{} body must be a JSON object",
            schema.name()
        )));
    };

    let mut row = Row::with_capacity(fields.len());
    for (name, value) in fields {
        let descriptor = schema
            .property(&name)
            .ok_or_else(|| AdminError::unknown_property(schema.name(), &name))?;

        let canonical = if value.is_null() {
            Value::Null
        } else {
            TypedValue::from_json(descriptor.semantic_type, Some(&value))
                .filter(|typed| !typed.is_null())
                .map(|typed| typed.to_json())
                .ok_or_else(|| {
                    AdminError::type_mismatch(
                        &descriptor.name,
                        descriptor.semantic_type,
                        value_text(&value),
                    )
                })?
        };
        row.insert(name, canonical);
    }

    Ok(row)
}

/// Reject rows that leave a non-nullable property empty.
pub(super) fn check_required(schema: &EntitySchema, row: &Row) -> AdminResult<()> {
    match schema
        .properties()
        .iter()
        .find(|p| !p.nullable && row.get(&p.name).is_none_or(Value::is_null))
    {
        Some(missing) => Err(AdminError::invalid_request(format!(
            "Property '{}' of {} is required",
            missing.name,
            schema.name()
        ))),
        None => Ok(()),
    }
}

/// Fill in the primary key (when absent) and the tenant column of a new row.
///
/// Returns the row's final id. The tenant column always takes the caller's
/// tenant, whatever the body said.
pub(super) fn stamp_identity(schema: &EntitySchema, row: &mut Row, tenant_id: Uuid) -> Uuid {
    if guid(row, PRIMARY_KEY).is_none() {
        row.insert(PRIMARY_KEY.to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    if let Some(tenant_property) = schema.tenant_property() {
        row.insert(tenant_property.to_string(), Value::String(tenant_id.to_string()));
    }
    guid(row, PRIMARY_KEY).unwrap_or_else(Uuid::nil)
}

/// Stamp audit columns on a newly created row.
pub(super) fn stamp_created(schema: &EntitySchema, row: &mut Row, by: &Principal, at: DateTime<Utc>) {
    if !schema.is_audited() {
        return;
    }
    row.insert(CREATED_BY.to_string(), Value::String(by.user_id.to_string()));
    row.insert(CREATED_ON.to_string(), timestamp(at));
    row.insert(UPDATED_BY.to_string(), Value::Null);
    row.insert(UPDATED_ON.to_string(), Value::Null);
}

/// Stamp audit columns on a replacement row, keeping the creation stamp of `existing`.
pub(super) fn stamp_updated(
    schema: &EntitySchema,
    row: &mut Row,
    existing: &Value,
    by: &Principal,
    at: DateTime<Utc>,
) {
    if !schema.is_audited() {
        return;
    }
    for column in [CREATED_BY, CREATED_ON] {
        row.insert(
            column.to_string(),
            existing.get(column).cloned().unwrap_or(Value::Null),
        );
    }
    row.insert(UPDATED_BY.to_string(), Value::String(by.user_id.to_string()));
    row.insert(UPDATED_ON.to_string(), timestamp(at));
}

/// Whether a stored row belongs to `tenant_id` under `schema`'s tenant column.
pub(super) fn owned_by(schema: &EntitySchema, row: &Value, tenant_id: Uuid) -> bool {
    match schema.tenant_property() {
        Some(property) => {
            row.get(property)
                .and_then(Value::as_str)
                .and_then(|text| Uuid::parse_str(text).ok())
                == Some(tenant_id)
        }
        None => true,
    }
}

/// Parse a path id. Non-GUID ids cannot address any row.
pub(super) fn path_id(schema: &EntitySchema, id: &str) -> AdminResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| AdminError::not_found(schema.name(), id))
}

pub(super) fn guid(row: &Row, property: &str) -> Option<Uuid> {
    match TypedValue::from_json(SemanticType::Guid, row.get(property)) {
        Some(TypedValue::Guid(id)) => Some(id),
        _ => None,
    }
}

fn timestamp(at: DateTime<Utc>) -> Value {
    TypedValue::DateTime(at).to_json()
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
