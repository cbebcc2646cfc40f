use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Email, UserId};

/// Registration data for a user whose id has not been assigned yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub name: String,
    pub password_hash: String,
}

/// Registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl User {
    /// Materializes a stored user once the repository has assigned an id.
    pub fn register(id: UserId, new_user: NewUser) -> Self {
        Self {
            id,
            email: new_user.email,
            name: new_user.name,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn reconstruct(
        id: UserId,
        email: Email,
        name: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
