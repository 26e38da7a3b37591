use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_expiry_minutes: i64,
}

/// Claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl AccessTokenClaims {
    pub fn user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
        }
    }

    pub fn generate_access_token(&self, user_id: Uuid) -> Result<String, anyhow::Error> {
        self.generate_access_token_at(user_id, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    pub fn generate_access_token_at(
        &self,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<String, anyhow::Error> {
        let exp = issued_at + Duration::minutes(self.access_token_expiry_minutes);

        let claims = AccessTokenClaims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to encode access token: {}", e))
    }

    /// Verify signature and expiry with zero leeway.
    pub fn validate_access_token(
        &self,
        token: &str,
    ) -> Result<AccessTokenClaims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        decode::<AccessTokenClaims>(token, &self.decoding_key, &validation).map(|t| t.claims)
    }

    /// Access token lifetime in seconds (for client info)
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtService {
        JwtService::new(&JwtConfig {
            secret: "test-secret".into(),
            access_token_expiry_minutes: 60,
        })
    }

    #[test]
    fn fresh_token_round_trips_subject() {
        let jwt = service();
        let user_id = Uuid::new_v4();
        let token = jwt.generate_access_token(user_id).unwrap();

        let claims = jwt.validate_access_token(&token).unwrap();
        assert_eq!(claims.user_id(), Some(user_id));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_near_end_of_lifetime_is_accepted() {
        let jwt = service();
        let issued = Utc::now() - Duration::minutes(59);
        let token = jwt.generate_access_token_at(Uuid::new_v4(), issued).unwrap();
        assert!(jwt.validate_access_token(&token).is_ok());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = service();
        let issued = Utc::now() - Duration::minutes(61);
        let token = jwt.generate_access_token_at(Uuid::new_v4(), issued).unwrap();

        let err = jwt.validate_access_token(&token).unwrap_err();
        assert_eq!(
            *err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        );
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let jwt = service();
        let token = jwt.generate_access_token(Uuid::new_v4()).unwrap();

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let first = signature.chars().next().unwrap();
        let replacement = if first == 'x' { 'y' } else { 'x' };
        let tampered = format!("{}.{}{}", unsigned, replacement, &signature[1..]);

        assert!(jwt.validate_access_token(&tampered).is_err());
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let other = JwtService::new(&JwtConfig {
            secret: "another-secret".into(),
            access_token_expiry_minutes: 60,
        });
        let token = other.generate_access_token(Uuid::new_v4()).unwrap();
        assert!(service().validate_access_token(&token).is_err());
    }
}
