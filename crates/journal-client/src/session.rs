//! Client-side session cache.
//!
//! The cache holds the signed-in user and token in memory and mirrors the
//! token into a [`TokenStore`] under [`TOKEN_KEY`]. A fresh cache starts
//! signed out even when the store still holds a token from an earlier run;
//! only [`SessionCache::read_token`] consults the store.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{SessionError, StoreError};
use crate::models::User;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "um.token";

/// Key/value storage for the bearer token, e.g. tab-scoped browser storage.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing storage fails.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing storage fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    /// Returns [`StoreError`] when the backing storage fails.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store; values vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

fn poisoned(key: &str) -> StoreError {
    StoreError::Io {
        key: key.to_owned(),
        message: "store lock poisoned".to_owned(),
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.read().map_err(|_| poisoned(key))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| poisoned(key))?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.write().map_err(|_| poisoned(key))?;
        values.remove(key);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct SessionState {
    user: Option<User>,
    token: Option<String>,
}

/// Shared handle to the signed-in user and token.
///
/// Clones share state, so UI tasks can each hold one.
///
/// # Examples
/// ```
/// use journal_client::{MemoryTokenStore, SessionCache, SessionError};
///
/// let session = SessionCache::new(MemoryTokenStore::default());
/// assert!(!session.is_signed_in());
/// assert_eq!(session.read_token(), Err(SessionError::NoToken));
/// ```
#[derive(Clone)]
pub struct SessionCache {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl SessionCache {
    /// Build a signed-out cache over `store`.
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    /// Build a signed-out cache over a store shared with other owners.
    #[must_use]
    pub fn with_shared_store(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
        }
    }

    /// Record a successful sign-in and persist the token.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the token cannot be persisted; the
    /// in-memory state is left unchanged in that case.
    pub fn set_session(&self, user: User, token: String) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, &token)?;
        let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
        debug!(user_id = user.user_id, "session started");
        state.user = Some(user);
        state.token = Some(token);
        Ok(())
    }

    /// Forget the user and token, in memory and in the store.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the stored token cannot be removed.
    pub fn clear_session(&self) -> Result<(), SessionError> {
        {
            let mut state = self.state.write().map_err(|_| SessionError::Poisoned)?;
            *state = SessionState::default();
        }
        self.store.remove(TOKEN_KEY)?;
        debug!("session cleared");
        Ok(())
    }

    /// Read the persisted token.
    ///
    /// # Errors
    /// Returns [`SessionError::NoToken`] when nothing (or an empty string) is
    /// stored.
    pub fn read_token(&self) -> Result<String, SessionError> {
        match self.store.get(TOKEN_KEY)? {
            Some(token) if !token.is_empty() => Ok(token),
            _ => Err(SessionError::NoToken),
        }
    }

    /// The signed-in user, if any.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.read().ok().and_then(|state| state.user.clone())
    }

    /// The in-memory token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.state.read().ok().and_then(|state| state.token.clone())
    }

    /// Whether a user is signed in.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.state
            .read()
            .map(|state| state.user.is_some())
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("signed_in", &self.is_signed_in())
            .finish_non_exhaustive()
    }
}
