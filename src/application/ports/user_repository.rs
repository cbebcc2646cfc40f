use async_trait::async_trait;
#[cfg(test)]
use mockall::{automock, predicate::*};
use thiserror::Error;

use crate::domain::entities::{NewUser, User};
use crate::domain::value_objects::{Email, UserId};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Port for account persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Assigns the next id and stores the user.
    ///
    /// Fails with `AlreadyExists` when the email is taken; the check and the
    /// insert are atomic.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;
}
