use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::MESSAGE_SUCCESS;

/// Response envelope shared by every endpoint:
/// `{"response": ..., "metadata": {"message": ..., "code": ...}}`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub response: Option<T>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Metadata {
    pub message: String,
    /// Mirrors the transport status, except for the legacy not-found mode
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>) -> Self {
        Self {
            response: data,
            metadata: Metadata {
                message: MESSAGE_SUCCESS.to_string(),
                code: StatusCode::OK.as_u16(),
                errors: None,
            },
        }
    }

    pub fn error(
        message: impl Into<String>,
        code: StatusCode,
        errors: Option<Vec<String>>,
    ) -> ApiResponse<()> {
        ApiResponse {
            response: None,
            metadata: Metadata {
                message: message.into(),
                code: code.as_u16(),
                errors,
            },
        }
    }
}
