//! Builders composing domain services over the configured store adapters.

use std::sync::Arc;

use journal_backend::domain::ports::{CredentialStore, EntryStore, TokenService};
use journal_backend::domain::{AccountService, EntryService};
use journal_backend::inbound::http::state::HttpState;
use journal_backend::outbound::crypto::{Argon2PasswordHasher, HmacTokenService};
use journal_backend::outbound::memory::{MemoryCredentialStore, MemoryEntryStore};
use journal_backend::outbound::persistence::{DbPool, DieselCredentialStore, DieselEntryStore};
use zeroize::Zeroizing;

/// Where account and entry data live.
pub enum Stores {
    /// PostgreSQL through the shared pool.
    Postgres(DbPool),
    /// Process-local maps; data is lost on restart.
    Memory,
}

/// Handler state plus the verifier used by the bearer gate.
#[derive(Clone)]
pub struct AppServices {
    pub http_state: HttpState,
    pub tokens: Arc<dyn TokenService>,
}

fn compose<C, E>(credentials: C, entries: E, tokens: Arc<HmacTokenService>) -> HttpState
where
    C: CredentialStore + 'static,
    E: EntryStore + 'static,
{
    let accounts = AccountService::new(
        Arc::new(credentials),
        Arc::new(Argon2PasswordHasher::new()),
        tokens,
    );
    let entries = EntryService::new(Arc::new(entries));
    HttpState::new(
        Arc::new(accounts),
        Arc::new(entries.clone()),
        Arc::new(entries),
    )
}

/// Wire services over `stores`, signing tokens with `secret`.
pub fn build_services(stores: Stores, secret: Zeroizing<Vec<u8>>) -> AppServices {
    let signer = Arc::new(HmacTokenService::new(secret));
    let http_state = match stores {
        Stores::Postgres(pool) => compose(
            DieselCredentialStore::new(pool.clone()),
            DieselEntryStore::new(pool),
            Arc::clone(&signer),
        ),
        Stores::Memory => compose(
            MemoryCredentialStore::default(),
            MemoryEntryStore::new(),
            Arc::clone(&signer),
        ),
    };
    AppServices {
        http_state,
        tokens: signer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use journal_backend::domain::Credentials;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn memory_services_issue_tokens_the_gate_accepts() {
        let services = build_services(Stores::Memory, Zeroizing::new(vec![9; 32]));
        let credentials = Credentials::try_from_parts("alice", "secret123").expect("valid");

        services
            .http_state
            .auth
            .sign_up(&credentials)
            .await
            .expect("sign-up succeeds");
        let signed_in = services
            .http_state
            .auth
            .sign_in(&credentials)
            .await
            .expect("sign-in succeeds");

        let identity = services
            .tokens
            .verify(&signed_in.token)
            .expect("token verifies");
        assert_eq!(identity.username().as_ref(), "alice");
    }
}
