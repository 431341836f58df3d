//! Error handling utilities for operation handlers

use crate::error::AdminError;
use crate::operation_handler::core::{AdminOperationResponse, OperationMetadata};
use serde_json::Value;

/// Create an error response from an [`AdminError`].
///
/// Variants that name an entity or id carry it into the metadata.
pub fn create_error_response(
    error: AdminError,
    request_id: String,
    tenant_id: Option<String>,
) -> AdminOperationResponse {
    let mut metadata = OperationMetadata::new(request_id);
    metadata.tenant_id = tenant_id;

    match &error {
        AdminError::NotFound { entity, id } => {
            metadata.entity = Some(entity.clone());
            metadata.resource_id = Some(id.clone());
        }
        AdminError::Denied { entity, action } => {
            metadata.entity = Some(entity.clone());
            metadata
                .additional
                .insert("action".to_string(), Value::String(action.to_string()));
        }
        AdminError::IdMismatch { path_id, body_id } => {
            metadata.resource_id = Some(path_id.clone());
            metadata
                .additional
                .insert("body_id".to_string(), Value::String(body_id.clone()));
        }
        AdminError::Storage(storage) => {
            metadata
                .additional
                .insert("transient".to_string(), Value::Bool(storage.is_transient()));
        }
        _ => {}
    }

    AdminOperationResponse {
        success: false,
        data: None,
        error: Some(error.to_string()),
        error_code: Some(error.error_code().to_string()),
        status_code: error.status_code(),
        metadata,
    }
}
