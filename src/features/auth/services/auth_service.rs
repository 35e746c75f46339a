use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, TokenResponseDto};
use crate::features::auth::services::token_service::TokenService;
use constant_time_eq::constant_time_eq;
use sha2::{Digest, Sha256};
use std::sync::Arc;

/// Checks the configured API client credentials and hands out bearer tokens
pub struct AuthService {
    client_email: String,
    client_password_digest: Vec<u8>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(config: &AuthConfig, token_service: Arc<TokenService>) -> Result<Self> {
        let client_password_digest = hex::decode(&config.client_password_sha256)
            .map_err(|e| AppError::Internal(format!("Invalid password digest: {}", e)))?;

        Ok(Self {
            client_email: config.client_email.clone(),
            client_password_digest,
            token_service,
        })
    }

    /// Login with email and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        let email_matches = dto.email.eq_ignore_ascii_case(&self.client_email);
        let password_digest = Sha256::digest(dto.password.as_bytes());
        let password_matches = constant_time_eq(&password_digest, &self.client_password_digest);

        if !(email_matches && password_matches) {
            tracing::warn!("Rejected login attempt for {}", dto.email);
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let issued = self.token_service.issue(&self.client_email)?;
        tracing::info!("Token issued for client {}", self.client_email);

        Ok(TokenResponseDto {
            token: issued.token,
            expires_in: issued.expires_in,
        })
    }
}
