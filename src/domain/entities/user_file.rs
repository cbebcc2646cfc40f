use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::value_objects::UserId;

#[derive(Debug, Clone)]
pub struct NewUserFile {
    pub user_id: Option<UserId>,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: PathBuf,
    pub expires_at: DateTime<Utc>,
}

/// An upload kept on disk until `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFile {
    pub id: u64,
    pub user_id: Option<UserId>,
    pub original_name: String,
    pub stored_name: String,
    pub mime_type: String,
    pub size: u64,
    pub path: PathBuf,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl UserFile {
    pub fn record(id: u64, file: NewUserFile) -> Self {
        Self {
            id,
            user_id: file.user_id,
            original_name: file.original_name,
            stored_name: file.stored_name,
            mime_type: file.mime_type,
            size: file.size,
            path: file.path,
            expires_at: file.expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn expiry_is_inclusive() {
        let expires_at = Utc::now();
        let file = UserFile::record(
            1,
            NewUserFile {
                user_id: None,
                original_name: "a.pdf".to_string(),
                stored_name: "files-1-2.pdf".to_string(),
                mime_type: "application/pdf".to_string(),
                size: 10,
                path: PathBuf::from("/tmp/files-1-2.pdf"),
                expires_at,
            },
        );
        assert!(!file.is_expired(expires_at - Duration::seconds(1)));
        assert!(file.is_expired(expires_at));
    }
}
