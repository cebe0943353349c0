//! `CredentialStore` backed by a mutex-guarded map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{PasswordHash, StoredCredentials, User, UserId, Username};

#[derive(Default)]
struct State {
    next_id: i64,
    by_username: HashMap<Username, StoredCredentials>,
}

/// In-memory credential store. Identifiers start at 1.
pub struct MemoryCredentialStore {
    state: Mutex<State>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl MemoryCredentialStore {
    /// Create an empty store stamping `created_at` from `clock`.
    pub fn new(clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Mutex::new(State::default()),
            clock,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, CredentialStoreError> {
        self.state
            .lock()
            .map_err(|_| CredentialStoreError::query("credential store lock poisoned"))
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, CredentialStoreError> {
        let mut state = self.lock()?;
        if state.by_username.contains_key(username) {
            return Err(CredentialStoreError::username_taken(username.as_ref()));
        }
        state.next_id += 1;
        let user = User::new(
            UserId::new(state.next_id),
            username.clone(),
            self.clock.utc(),
        );
        state.by_username.insert(
            username.clone(),
            StoredCredentials {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, CredentialStoreError> {
        Ok(self.lock()?.by_username.get(username).cloned())
    }
}
