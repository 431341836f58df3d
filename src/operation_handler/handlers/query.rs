//! List operation handler

use super::crud::success;
use crate::admin_server::ListParams;
use crate::context::RequestContext;
use crate::error::AdminResult;
use crate::gate::AdmittedOperation;
use crate::operation_handler::core::{
    AdminOperationHandler, AdminOperationRequest, AdminOperationResponse,
};
use crate::storage::StorageProvider;
use serde_json::Value;

/// Handle list operations.
pub async fn handle_list<S: StorageProvider>(
    handler: &AdminOperationHandler<S>,
    request: AdminOperationRequest,
    context: &RequestContext,
    admitted: &AdmittedOperation,
) -> AdminResult<AdminOperationResponse> {
    let params = request.query.clone().unwrap_or_default();
    let rows = handler.server().list_admitted(admitted, &params).await?;
    let count = rows.len();

    let mut response = success(Value::Array(rows), &request.route, context, admitted);
    response.metadata.resource_count = Some(count);
    record_paging(&mut response, &params);
    Ok(response)
}

fn record_paging(response: &mut AdminOperationResponse, params: &ListParams) {
    if let Some(page_number) = params.page_number {
        response
            .metadata
            .additional
            .insert("page_number".to_string(), Value::from(page_number));
    }
    if let Some(page_size) = params.page_size {
        response
            .metadata
            .additional
            .insert("page_size".to_string(), Value::from(page_size));
    }
}
