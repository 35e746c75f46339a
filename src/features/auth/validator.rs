use super::model::{AuthenticatedClient, Claims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::time::Duration;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    issuer: String,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, issuer: String, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedClient, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_aud = false;
        validation.validate_nbf = true;
        validation.leeway = self.leeway;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(AuthenticatedClient {
            sub: token_data.claims.sub,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{encode, EncodingKey, Header};

    const SECRET: &str = "test-secret";
    const ISSUER: &str = "antrean-poli";

    fn token_with(secret: &str, iss: &str, exp_offset: i64) -> String {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "bridging@rs.local".to_string(),
            iss: iss.to_string(),
            iat: now,
            nbf: now,
            exp: now + exp_offset,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn validator() -> JwtValidator {
        JwtValidator::new(SECRET, ISSUER.to_string(), Duration::from_secs(0))
    }

    #[test]
    fn test_accepts_valid_token() {
        let client = validator()
            .validate_token(&token_with(SECRET, ISSUER, 300))
            .unwrap();
        assert_eq!(client.sub, "bridging@rs.local");
    }

    #[test]
    fn test_rejects_expired_token() {
        let result = validator().validate_token(&token_with(SECRET, ISSUER, -120));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_rejects_foreign_secret() {
        let result = validator().validate_token(&token_with("other-secret", ISSUER, 300));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_rejects_foreign_issuer() {
        let result = validator().validate_token(&token_with(SECRET, "someone-else", 300));
        assert!(matches!(result, Err(AppError::Auth(_))));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(validator().validate_token("not-a-jwt").is_err());
    }
}
