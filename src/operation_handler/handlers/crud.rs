//! CRUD operation handlers
//!
//! Add, GetById, Update and Delete over an already admitted operation.

use crate::context::RequestContext;
use crate::error::{AdminError, AdminResult};
use crate::gate::AdmittedOperation;
use crate::operation_handler::core::{
    AdminOperationHandler, AdminOperationRequest, AdminOperationResponse, OperationMetadata,
};
use crate::storage::StorageProvider;
use serde_json::Value;

/// Handle add operations. The response data is the new row's id.
pub async fn handle_add<S: StorageProvider>(
    handler: &AdminOperationHandler<S>,
    request: AdminOperationRequest,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminResult<AdminOperationResponse> {
    let data = request
        .data
        .ok_or_else(|| AdminError::invalid_request("Missing data for add operation"))?;

    let id = handler.server().add_admitted(admitted, data).await?;

    let mut response = success(Value::String(id.to_string()), &request.route, context, admitted);
    response.metadata.resource_id = Some(id.to_string());
    response.status_code = 201;
    Ok(response)
}

/// Handle get-by-id operations.
pub async fn handle_get<S: StorageProvider>(
    handler: &AdminOperationHandler<S>,
    request: AdminOperationRequest,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminResult<AdminOperationResponse> {
    let resource_id = require_id(&request, "get")?;
    let row = handler.server().get_admitted(admitted, &resource_id).await?;

    let mut response = success(row, &request.route, context, admitted);
    response.metadata.resource_id = Some(resource_id);
    Ok(response)
}

/// Handle update operations. The response data is the stored row.
pub async fn handle_update<S: StorageProvider>(
    handler: &AdminOperationHandler<S>,
    request: AdminOperationRequest,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminResult<AdminOperationResponse> {
    let resource_id = require_id(&request, "update")?;
    let data = request
        .data
        .clone()
        .ok_or_else(|| AdminError::invalid_request("Missing data for update operation"))?;

    let row = handler
        .server()
        .update_admitted(admitted, &resource_id, data)
        .await?;

    let mut response = success(row, &request.route, context, admitted);
    response.metadata.resource_id = Some(resource_id);
    Ok(response)
}

/// Handle delete operations. The response data is the number of rows removed.
pub async fn handle_delete<S: StorageProvider>(
    handler: &AdminOperationHandler<S>,
    request: AdminOperationRequest,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminResult<AdminOperationResponse> {
    let resource_id = require_id(&request, "delete")?;
    let removed = handler
        .server()
        .delete_admitted(admitted, &resource_id)
        .await?;

    let mut response = success(Value::from(removed), &request.route, context, admitted);
    response.metadata.resource_id = Some(resource_id);
    Ok(response)
}

fn require_id(request: &AdminOperationRequest, operation: &str) -> AdminResult<String> {
    request.resource_id.clone().ok_or_else(|| {
        AdminError::invalid_request(format!("Missing resource_id for {} operation", operation))
    })
}

/// Successful response for a single row.
pub(super) fn success(
    data: Value,
    route: &str,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminOperationResponse {
    let mut metadata = OperationMetadata::new(context.request_id.clone());
    metadata.entity = Some(admitted.entity().to_string());
    metadata.route = Some(route.to_string());
    metadata.resource_count = Some(1);
    metadata.tenant_id = Some(context.tenant_id().to_string());

    AdminOperationResponse {
        success: true,
        data: Some(data),
        error: None,
        error_code: None,
        status_code: 200,
        metadata,
    }
}
