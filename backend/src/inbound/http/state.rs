//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and depend only on driving
//! ports, so they can be exercised with doubles and no I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, EntriesCommand, EntriesQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub entries: Arc<dyn EntriesQuery>,
    pub entries_command: Arc<dyn EntriesCommand>,
}

impl HttpState {
    /// Bundle the driving ports.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use journal_backend::domain::{AccountService, EntryService};
    /// use journal_backend::inbound::http::state::HttpState;
    /// use journal_backend::outbound::crypto::{Argon2PasswordHasher, HmacTokenService};
    /// use journal_backend::outbound::memory::{MemoryCredentialStore, MemoryEntryStore};
    /// use zeroize::Zeroizing;
    ///
    /// let accounts = AccountService::new(
    ///     Arc::new(MemoryCredentialStore::default()),
    ///     Arc::new(Argon2PasswordHasher::new()),
    ///     Arc::new(HmacTokenService::new(Zeroizing::new(vec![1; 32]))),
    /// );
    /// let entries = EntryService::new(Arc::new(MemoryEntryStore::new()));
    /// let state = HttpState::new(Arc::new(accounts), Arc::new(entries.clone()), Arc::new(entries));
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(
        auth: Arc<dyn AuthService>,
        entries: Arc<dyn EntriesQuery>,
        entries_command: Arc<dyn EntriesCommand>,
    ) -> Self {
        Self {
            auth,
            entries,
            entries_command,
        }
    }
}
