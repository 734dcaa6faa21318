use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::CredentialError;

/// Process-local credential store for tests and local runs.
///
/// The uniqueness check and the insert happen under one write lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, CredentialError> {
        let mut users = self.users.write().await;

        match users.entry(user.username.as_str().to_string()) {
            Entry::Occupied(_) => Err(CredentialError::DuplicateUsername(
                user.username.as_str().to_string(),
            )),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(user)
            }
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, CredentialError> {
        Ok(self.users.read().await.get(username.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::user::models::Role;
    use crate::domain::user::models::UserId;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: Username::new(name.to_string()).unwrap(),
            password_hash: "$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string(),
            role: Role::default(),
        }
    }

    #[tokio::test]
    async fn test_create_then_find() {
        let repository = InMemoryUserRepository::new();
        let created = repository.create(user("alice")).await.unwrap();

        let found = repository
            .find_by_username(&created.username)
            .await
            .unwrap()
            .expect("stored user");
        assert_eq!(found, created);

        let missing = Username::new("bob".to_string()).unwrap();
        assert_eq!(repository.find_by_username(&missing).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repository = InMemoryUserRepository::new();
        repository.create(user("alice")).await.unwrap();

        let result = repository.create(user("alice")).await;
        assert!(matches!(
            result.unwrap_err(),
            CredentialError::DuplicateUsername(name) if name == "alice"
        ));
        assert_eq!(repository.len().await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_exactly_one_wins() {
        let repository = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repository = Arc::clone(&repository);
                tokio::spawn(async move { repository.create(user("alice")).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(CredentialError::DuplicateUsername(_)) => duplicates += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 7);
        assert_eq!(repository.len().await, 1);
    }
}
