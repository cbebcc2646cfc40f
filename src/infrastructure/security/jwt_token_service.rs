use chrono::{Duration, TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::application::ports::{CredentialError, TokenIdentity, TokenService};
use crate::domain::entities::User;
use crate::domain::value_objects::UserId;

/// Bearer token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: u64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 tokens signed with a shared secret
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<String, CredentialError> {
        let now = Utc::now();
        let claims = Claims {
            user_id: user.id().value(),
            email: user.email().to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CredentialError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenIdentity, CredentialError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| CredentialError::InvalidToken)?;
        let expires_at = Utc
            .timestamp_opt(data.claims.exp, 0)
            .single()
            .ok_or(CredentialError::InvalidToken)?;

        Ok(TokenIdentity {
            user_id: UserId::new(data.claims.user_id),
            email: data.claims.email,
            expires_at,
        })
    }
}
