use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::entities::{NewUser, User};
use crate::domain::value_objects::{Email, UserId};

#[derive(Default)]
struct UserTable {
    next_id: u64,
    by_id: HashMap<UserId, User>,
    id_by_email: HashMap<Email, UserId>,
}

/// Process-local account store. Ids start at 1.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut table = self.table.write();
        if table.id_by_email.contains_key(&user.email) {
            return Err(RepositoryError::AlreadyExists(user.email.to_string()));
        }

        table.next_id += 1;
        let id = UserId::new(table.next_id);
        let email = user.email.clone();
        let user = User::register(id, user);

        table.id_by_email.insert(email, id);
        table.by_id.insert(id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let table = self.table.read();
        Ok(table
            .id_by_email
            .get(email)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.table.read().by_id.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: Email::new(email).unwrap(),
            name: "Test".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_increment_from_one() {
        let repo = InMemoryUserRepository::new();
        let a = repo.create(new_user("a@example.com")).await.unwrap();
        let b = repo.create(new_user("b@example.com")).await.unwrap();
        assert_eq!(a.id().value(), 1);
        assert_eq!(b.id().value(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.create(new_user("a@example.com")).await.unwrap();
        let result = repo.create(new_user("A@Example.com")).await;
        assert!(matches!(result, Err(RepositoryError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_lookups() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(new_user("a@example.com")).await.unwrap();

        let by_email = repo
            .find_by_email(&Email::new("a@example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.id(), created.id());
        assert!(repo.find_by_id(UserId::new(42)).await.unwrap().is_none());
    }
}
