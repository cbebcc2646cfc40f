use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::domain::entities::User;
use crate::domain::value_objects::UserId;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Identity carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenIdentity {
    pub user_id: UserId,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// Port for issuing and verifying bearer tokens
#[cfg_attr(test, automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, user: &User) -> Result<String, CredentialError>;

    fn verify(&self, token: &str) -> Result<TokenIdentity, CredentialError>;
}

/// Port for one-way password hashing
#[cfg_attr(test, automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// `Ok(false)` on mismatch; `Err` only when `hash` is unparseable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}
