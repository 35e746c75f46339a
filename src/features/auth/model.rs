use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// API client resolved from a valid bearer token
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedClient {
    /// Login identity the token was issued to
    pub sub: String,
}

/// Claims carried by tokens from `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}
