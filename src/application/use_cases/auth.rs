use std::sync::Arc;
use thiserror::Error;

use crate::application::dto::{AuthResponse, LoginRequest, SignupRequest, UserDto};
use crate::application::ports::{
    CredentialError, PasswordHasher, RepositoryError, TokenService, UserRepository,
};
use crate::domain::entities::NewUser;
use crate::domain::errors::DomainError;
use crate::domain::value_objects::{Email, UserId};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("User already exists with this email")]
    EmailTaken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for AuthError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::AlreadyExists(_) => AuthError::EmailTaken,
            other => AuthError::Repository(other),
        }
    }
}

/// Use case: Register an account and issue its first token
pub struct SignupUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl SignupUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, request: SignupRequest) -> Result<AuthResponse, AuthError> {
        let email = Email::new(&request.email)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = self.hasher.hash(&request.password)?;
        // The repository re-checks uniqueness atomically; two racing signups
        // surface as AlreadyExists here.
        let user = self
            .users
            .create(NewUser {
                email,
                name: request.name.trim().to_string(),
                password_hash,
            })
            .await?;

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = %user.id(), "User registered");

        Ok(AuthResponse::bearer(&user, token))
    }
}

/// Use case: Exchange credentials for a token
pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUseCase {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    pub async fn execute(&self, request: LoginRequest) -> Result<AuthResponse, AuthError> {
        let email = Email::new(&request.email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(&request.password, user.password_hash())? {
            tracing::warn!(user_id = %user.id(), "Login rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&user)?;
        Ok(AuthResponse::bearer(&user, token))
    }
}

/// Use case: Load the account behind a verified token
pub struct GetCurrentUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<UserDto, AuthError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        Ok(UserDto::from(&user))
    }
}
