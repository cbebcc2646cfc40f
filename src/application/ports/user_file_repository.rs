use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::application::ports::RepositoryError;
use crate::domain::entities::{NewUserFile, UserFile};
use crate::domain::value_objects::UserId;

/// Port for upload bookkeeping
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserFileRepository: Send + Sync {
    async fn create(&self, file: NewUserFile) -> Result<UserFile, RepositoryError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserFile>, RepositoryError>;

    /// Every record whose `expires_at` is at or before `now`. Records stay in
    /// place until `delete` is called for them.
    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<UserFile>, RepositoryError>;

    /// Drops one record. Returns `false` when it was already gone.
    async fn delete(&self, id: u64) -> Result<bool, RepositoryError>;
}
