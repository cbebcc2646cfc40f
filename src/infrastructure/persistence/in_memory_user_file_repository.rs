use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::application::ports::{RepositoryError, UserFileRepository};
use crate::domain::entities::{NewUserFile, UserFile};
use crate::domain::value_objects::UserId;

/// Process-local upload records
#[derive(Default)]
pub struct InMemoryUserFileRepository {
    next_id: AtomicU64,
    files: DashMap<u64, UserFile>,
}

impl InMemoryUserFileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl UserFileRepository for InMemoryUserFileRepository {
    async fn create(&self, file: NewUserFile) -> Result<UserFile, RepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        let file = UserFile::record(id, file);
        self.files.insert(id, file.clone());
        Ok(file)
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<UserFile>, RepositoryError> {
        let mut files: Vec<UserFile> = self
            .files
            .iter()
            .filter(|entry| entry.user_id == Some(user_id))
            .map(|entry| entry.value().clone())
            .collect();
        files.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(files)
    }

    async fn list_expired(&self, now: DateTime<Utc>) -> Result<Vec<UserFile>, RepositoryError> {
        Ok(self
            .files
            .iter()
            .filter(|entry| entry.is_expired(now))
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn delete(&self, id: u64) -> Result<bool, RepositoryError> {
        Ok(self.files.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::path::PathBuf;

    fn file(user: Option<u64>, expires_at: DateTime<Utc>) -> NewUserFile {
        NewUserFile {
            user_id: user.map(UserId::new),
            original_name: "a.pdf".to_string(),
            stored_name: "files-1-1.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size: 3,
            path: PathBuf::from("/tmp/files-1-1.pdf"),
            expires_at,
        }
    }

    #[tokio::test]
    async fn test_list_expired_leaves_records_in_place() {
        let repo = InMemoryUserFileRepository::new();
        let now = Utc::now();
        repo.create(file(None, now - Duration::minutes(1))).await.unwrap();
        repo.create(file(Some(1), now)).await.unwrap();
        repo.create(file(Some(1), now + Duration::hours(1))).await.unwrap();

        let expired = repo.list_expired(now).await.unwrap();
        assert_eq!(expired.len(), 2);
        assert_eq!(repo.len(), 3);

        for record in &expired {
            assert!(repo.delete(record.id).await.unwrap());
        }
        assert_eq!(repo.len(), 1);
        assert!(repo.list_expired(now).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_record() {
        let repo = InMemoryUserFileRepository::new();
        assert!(!repo.delete(42).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_user() {
        let repo = InMemoryUserFileRepository::new();
        let later = Utc::now() + Duration::hours(1);
        repo.create(file(Some(1), later)).await.unwrap();
        repo.create(file(Some(2), later)).await.unwrap();
        repo.create(file(None, later)).await.unwrap();

        let files = repo.list_for_user(UserId::new(1)).await.unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].user_id, Some(UserId::new(1)));
    }
}
