//! Test utilities for the backend crate.
//!
//! Shared by unit tests, the integration tests under `tests/` and the
//! client crate's tests. Compiled only for tests or with the `test-support`
//! feature.

use std::io::{self, Write};
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use tempfile::NamedTempFile;
use zeroize::Zeroizing;

use crate::Trace;
use crate::domain::ports::TokenService;
use crate::domain::{AccountService, EntryService};
use crate::inbound::http::configure;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::crypto::{Argon2PasswordHasher, HmacTokenService};
use crate::outbound::memory::{MemoryCredentialStore, MemoryEntryStore};

/// Signing secret used by [`memory_backend`].
pub const TEST_SECRET: [u8; 32] = [0x5a; 32];

/// Fully wired in-memory backend.
#[derive(Clone)]
pub struct MemoryBackend {
    /// Handler state over in-memory stores.
    pub state: HttpState,
    /// Verifier sharing the signing secret of `state.auth`.
    pub tokens: Arc<dyn TokenService>,
}

/// Build a backend over fresh in-memory stores signed with [`TEST_SECRET`].
///
/// # Examples
/// ```
/// let backend = journal_backend::test_support::memory_backend();
/// let _auth = backend.state.auth.clone();
/// ```
pub fn memory_backend() -> MemoryBackend {
    memory_backend_with_secret(Zeroizing::new(TEST_SECRET.to_vec()))
}

/// Build a backend over fresh in-memory stores signed with `secret`.
pub fn memory_backend_with_secret(secret: Zeroizing<Vec<u8>>) -> MemoryBackend {
    let tokens = Arc::new(HmacTokenService::new(secret));
    let accounts = AccountService::new(
        Arc::new(MemoryCredentialStore::default()),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&tokens),
    );
    let entries = EntryService::new(Arc::new(MemoryEntryStore::new()));
    MemoryBackend {
        state: HttpState::new(
            Arc::new(accounts),
            Arc::new(entries.clone()),
            Arc::new(entries),
        ),
        tokens,
    }
}

/// Running HTTP server bound to an ephemeral loopback port.
pub struct TestServer {
    addr: SocketAddr,
    handle: ServerHandle,
}

impl TestServer {
    /// Base URL such as `http://127.0.0.1:41234`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop accepting connections and wait for workers to finish.
    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

/// Serve `backend` with the production route table on `127.0.0.1:0`.
///
/// Must be called from within a Tokio runtime; the server runs on a spawned
/// task until [`TestServer::stop`] is awaited or the runtime shuts down.
pub fn spawn_server(backend: MemoryBackend) -> io::Result<TestServer> {
    let state = web::Data::new(backend.state);
    let tokens = backend.tokens;
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let server = HttpServer::new(move || {
        let state = state.clone();
        let tokens = Arc::clone(&tokens);
        App::new()
            .app_data(health.clone())
            .wrap(Trace)
            .configure(move |cfg| configure(cfg, state, tokens))
            .service(ready)
            .service(live)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server
        .addrs()
        .first()
        .copied()
        .ok_or_else(|| io::Error::other("server bound no address"))?;
    let server = server.run();
    let handle = server.handle();
    tokio::spawn(server);
    Ok(TestServer { addr, handle })
}

/// Write `contents` to a fresh temporary file, e.g. a token secret file.
///
/// The file is removed when the returned handle drops.
pub fn secret_file(contents: &[u8]) -> io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}
