use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::features::queue::handlers;
use crate::features::queue::services::QueueService;

/// Create routes for the queue feature
///
/// Note: This feature requires authentication
pub fn routes(service: Arc<QueueService>) -> Router {
    Router::new()
        .route(
            "/api/antrian",
            post(handlers::issue_ticket).delete(handlers::cancel_ticket),
        )
        .route(
            "/api/antrian/{kodepoli}/{tanggalperiksa}",
            get(handlers::get_department_status),
        )
        .route(
            "/api/antrian/{nomorkartu}/{kodepoli}/{tanggalperiksa}",
            get(handlers::get_patient_status),
        )
        .with_state(service)
}
