//! Identity-store collaborator.
//!
//! The auth layer only needs to create accounts and look them up; storage
//! engines plug in behind [`UserStore`].

mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use memory::InMemoryUserStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: String,
}

impl UserRecord {
    /// Compare a presented password against the stored one.
    pub fn password_matches(&self, presented: &str) -> bool {
        // No early exit on the first differing byte.
        self.password.len() == presented.len()
            && self
                .password
                .bytes()
                .zip(presented.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

/// User fields safe to send to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUser {
    pub user_id: u64,
    pub username: String,
    pub email: Option<String>,
    pub phone: String,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            user_id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub email: Option<String>,
    pub phone: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserStoreError {
    #[error("username already registered: {0}")]
    UsernameTaken(String),
    /// Backend failure reported by persistent store implementations.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account. Usernames are unique.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UserStoreError>;

    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, UserStoreError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, UserStoreError>;
}
