use std::sync::Arc;
use std::time::Duration;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use fake::{faker::number::en::NumberWithFormat, Fake};

use crate::core::config::QueueConfig;
use crate::features::auth::model::AuthenticatedClient;
use crate::features::queue::dtos::{IssueTicketDto, PatientTicketDto};
use crate::features::queue::repositories::InMemoryQueueRepository;
use crate::features::queue::QueueService;

pub const TEST_DEPARTMENT: &str = "POL-OBG";
pub const TEST_DEPARTMENT_NAME: &str = "Poli Kandungan";
pub const TEST_EXAM_DATE: &str = "2024-01-10";

pub fn create_test_client() -> AuthenticatedClient {
    AuthenticatedClient {
        sub: "bridging@rs.local".to_string(),
    }
}

async fn inject_client_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_client());
    next.run(request).await
}

/// Wrap a router so every request arrives already authenticated
pub fn with_client_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_client_middleware))
}

pub fn test_queue_config() -> QueueConfig {
    QueueConfig {
        departments: "POL-OBG=Poli Kandungan;POL-ANA=Poli Anak"
            .parse()
            .expect("fixture departments parse"),
        issue_max_retries: 3,
        issue_retry_backoff: Duration::from_millis(1),
        legacy_not_found_status: false,
    }
}

pub fn in_memory_queue_service_with(
    config: &QueueConfig,
) -> (Arc<QueueService>, Arc<InMemoryQueueRepository>) {
    let repository = Arc::new(InMemoryQueueRepository::new());
    let service = Arc::new(QueueService::new(repository.clone(), config));
    (service, repository)
}

pub fn in_memory_queue_service() -> (Arc<QueueService>, Arc<InMemoryQueueRepository>) {
    in_memory_queue_service_with(&test_queue_config())
}

/// Random 13-digit JKN card number
pub fn fake_card_number() -> String {
    NumberWithFormat("0001#########").fake::<String>()
}

pub fn issue_dto(card_number: &str, department_code: &str, exam_date: &str) -> IssueTicketDto {
    IssueTicketDto {
        nomorkartu: card_number.to_string(),
        nik: "3171234567890001".to_string(),
        kodepoli: department_code.to_string(),
        tanggalperiksa: exam_date.to_string(),
        keluhan: "Kontrol kehamilan".to_string(),
    }
}

pub fn patient_dto(card_number: &str, department_code: &str, exam_date: &str) -> PatientTicketDto {
    PatientTicketDto {
        nomorkartu: card_number.to_string(),
        kodepoli: department_code.to_string(),
        tanggalperiksa: exam_date.to_string(),
    }
}
