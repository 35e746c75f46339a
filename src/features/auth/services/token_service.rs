use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::Claims;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};

/// Signed bearer token plus its lifetime
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Service for signing HS256 bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_secs: i64::try_from(config.token_ttl.as_secs()).unwrap_or(i64::MAX / 2),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<IssuedToken> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            nbf: now,
            exp: now.saturating_add(self.ttl_secs),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| {
                tracing::error!("Failed to sign token: {}", e);
                AppError::Internal(format!("Failed to sign token: {}", e))
            })?;

        tracing::debug!("Token issued for {}, expires in {} seconds", subject, self.ttl_secs);

        Ok(IssuedToken {
            token,
            expires_in: self.ttl_secs,
        })
    }
}
