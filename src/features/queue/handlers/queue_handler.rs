use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath};
use crate::features::auth::model::AuthenticatedClient;
use crate::features::queue::dtos::{
    DepartmentQueueParams, DepartmentQueueStatusDto, IssueTicketDto, PatientQueueStatusDto,
    PatientTicketDto, TicketReceiptDto,
};
use crate::features::queue::services::QueueService;
use crate::shared::constants::MESSAGE_TICKET_NOT_FOUND;
use crate::shared::types::ApiResponse;

/// Take a queue ticket
#[utoipa::path(
    post,
    path = "/api/antrian",
    request_body = IssueTicketDto,
    responses(
        (status = 200, description = "Ticket issued", body = ApiResponse<TicketReceiptDto>),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Queue busy, retry")
    ),
    security(("bearer_auth" = [])),
    tag = "antrian"
)]
pub async fn issue_ticket(
    client: AuthenticatedClient,
    State(service): State<Arc<QueueService>>,
    AppJson(dto): AppJson<IssueTicketDto>,
) -> Result<Json<ApiResponse<TicketReceiptDto>>> {
    tracing::debug!("Issue ticket requested by {}", client.sub);
    let receipt = service.issue_ticket(dto).await?;
    Ok(Json(ApiResponse::success(Some(receipt))))
}

/// Queue status of a department on an examination date
#[utoipa::path(
    get,
    path = "/api/antrian/{kodepoli}/{tanggalperiksa}",
    params(DepartmentQueueParams),
    responses(
        (status = 200, description = "Queue status", body = ApiResponse<DepartmentQueueStatusDto>),
        (status = 400, description = "Invalid date"),
        (status = 401, description = "Unauthorized")
    ),
    security(("bearer_auth" = [])),
    tag = "antrian"
)]
pub async fn get_department_status(
    State(service): State<Arc<QueueService>>,
    AppPath(params): AppPath<DepartmentQueueParams>,
) -> Result<Json<ApiResponse<DepartmentQueueStatusDto>>> {
    let status = service
        .department_status(&params.kodepoli, &params.tanggalperiksa)
        .await?;
    Ok(Json(ApiResponse::success(Some(status))))
}

/// Remaining queue for a patient's ticket
#[utoipa::path(
    get,
    path = "/api/antrian/{nomorkartu}/{kodepoli}/{tanggalperiksa}",
    params(PatientTicketDto),
    responses(
        (status = 200, description = "Queue status for the patient", body = ApiResponse<PatientQueueStatusDto>),
        (status = 201, description = "Ticket not found (legacy mode)"),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "antrian"
)]
pub async fn get_patient_status(
    State(service): State<Arc<QueueService>>,
    AppPath(dto): AppPath<PatientTicketDto>,
) -> Result<Response> {
    match service.patient_status(dto).await {
        Ok(status) => Ok(Json(ApiResponse::success(Some(status))).into_response()),
        Err(err) => legacy_not_found(&service, err),
    }
}

/// Cancel a patient's ticket
#[utoipa::path(
    delete,
    path = "/api/antrian",
    request_body = PatientTicketDto,
    responses(
        (status = 200, description = "Ticket cancelled"),
        (status = 201, description = "Ticket not found (legacy mode)"),
        (status = 400, description = "Missing or invalid field"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Ticket not found")
    ),
    security(("bearer_auth" = [])),
    tag = "antrian"
)]
pub async fn cancel_ticket(
    client: AuthenticatedClient,
    State(service): State<Arc<QueueService>>,
    AppJson(dto): AppJson<PatientTicketDto>,
) -> Result<Response> {
    tracing::debug!("Cancel ticket requested by {}", client.sub);
    match service.cancel_ticket(dto).await {
        Ok(_) => Ok(Json(ApiResponse::<()>::success(None)).into_response()),
        Err(err) => legacy_not_found(&service, err),
    }
}

/// In legacy mode "not found" is answered with 201 in both transport and metadata
fn legacy_not_found(service: &QueueService, err: AppError) -> Result<Response> {
    match err {
        AppError::NotFound(_) if service.legacy_not_found_status() => {
            let status = StatusCode::CREATED;
            let body = ApiResponse::<()>::error(MESSAGE_TICKET_NOT_FOUND, status, None);
            Ok((status, Json(body)).into_response())
        }
        err => Err(err),
    }
}
