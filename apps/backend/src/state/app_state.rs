use std::sync::Arc;

use super::clock::{Clock, SystemClock};
use super::security_config::SecurityConfig;
use crate::users::{InMemoryUserStore, UserStore};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Identity store collaborator used by register/login/profile
    pub users: Arc<dyn UserStore>,
    /// Time source for issuing and verifying tokens
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(security: SecurityConfig, users: Arc<dyn UserStore>) -> Self {
        Self {
            security,
            users,
            clock: Arc::new(SystemClock),
        }
    }

    /// State backed by an empty in-memory user store.
    pub fn in_memory(security: SecurityConfig) -> Self {
        Self::new(security, Arc::new(InMemoryUserStore::new()))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("security", &self.security)
            .finish_non_exhaustive()
    }
}
