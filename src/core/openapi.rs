use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::auth;
use crate::features::queue::{dtos as queue_dtos, handlers as queue_handlers};
use crate::shared::types::{ApiResponse, Metadata};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth::handlers::login,
        // Queue
        queue_handlers::issue_ticket,
        queue_handlers::get_department_status,
        queue_handlers::get_patient_status,
        queue_handlers::cancel_ticket,
    ),
    components(
        schemas(
            Metadata,
            // Auth
            auth::dtos::LoginRequestDto,
            auth::dtos::TokenResponseDto,
            ApiResponse<auth::dtos::TokenResponseDto>,
            // Queue
            queue_dtos::IssueTicketDto,
            queue_dtos::PatientTicketDto,
            queue_dtos::TicketReceiptDto,
            queue_dtos::DepartmentQueueStatusDto,
            queue_dtos::PatientQueueStatusDto,
            ApiResponse<queue_dtos::TicketReceiptDto>,
            ApiResponse<queue_dtos::DepartmentQueueStatusDto>,
            ApiResponse<queue_dtos::PatientQueueStatusDto>,
        )
    ),
    tags(
        (name = "auth", description = "API client login"),
        (name = "antrian", description = "Clinic department queue tickets"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Antrean Poli API",
        version = "0.1.0",
        description = "Queue tickets for clinic departments",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Overrides the document info with deployment values
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
