use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use super::{NewUser, UserRecord, UserStore, UserStoreError};

#[derive(Debug, Default)]
struct Inner {
    next_id: u64,
    by_id: HashMap<u64, UserRecord>,
    id_by_username: HashMap<String, u64>,
}

/// Process-local user store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    inner: RwLock<Inner>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UserStoreError> {
        let mut inner = self.inner.write();

        if inner.id_by_username.contains_key(&user.username) {
            return Err(UserStoreError::UsernameTaken(user.username));
        }

        inner.next_id += 1;
        let record = UserRecord {
            id: inner.next_id,
            username: user.username,
            password: user.password,
            email: user.email,
            phone: user.phone,
        };

        inner
            .id_by_username
            .insert(record.username.clone(), record.id);
        inner.by_id.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let inner = self.inner.read();
        Ok(inner
            .id_by_username
            .get(username)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.inner.read().by_id.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "secret1".to_string(),
            email: Some(format!("{username}@example.com")),
            phone: "555-0100".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let store = InMemoryUserStore::new();
        let alice = store.create_user(new_user("alice")).await.unwrap();
        let bob = store.create_user(new_user("bob")).await.unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(
            store.find_by_username("alice").await.unwrap(),
            Some(alice.clone())
        );
        assert_eq!(store.find_by_id(2).await.unwrap(), Some(bob));
        assert_eq!(store.find_by_id(99).await.unwrap(), None);
        assert_eq!(store.find_by_username("carol").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let store = InMemoryUserStore::new();
        store.create_user(new_user("alice")).await.unwrap();

        let err = store.create_user(new_user("alice")).await.unwrap_err();
        assert_eq!(err, UserStoreError::UsernameTaken("alice".to_string()));
    }
}
