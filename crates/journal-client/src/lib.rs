//! Session cache and typed HTTP client for the journal API.
//!
//! UI code talks to the backend only through [`ApiClient`]. The client keeps
//! the signed-in user and bearer token in a [`SessionCache`], which persists
//! the token under the fixed key [`TOKEN_KEY`] in a pluggable
//! [`TokenStore`].
//!
//! # Example
//!
//! ```no_run
//! use journal_client::{ApiClient, EntryInput, MemoryTokenStore, SessionCache};
//!
//! # async fn run() -> Result<(), journal_client::ClientError> {
//! let session = SessionCache::new(MemoryTokenStore::default());
//! let client = ApiClient::new("http://localhost:8080").with_session(session);
//!
//! client.sign_up("alice", "secret123").await?;
//! client.sign_in("alice", "secret123").await?;
//! let entry = client
//!     .add_entry(&EntryInput::new("Day 1", "hello", "http://x/y.png"))
//!     .await?;
//! assert_eq!(client.read_entry(entry.entry_id).await?, entry);
//! # Ok(())
//! # }
//! ```

mod api;
mod error;
mod file_store;
mod models;
mod session;

pub use api::ApiClient;
pub use error::{ClientError, SessionError, StoreError};
pub use file_store::FileTokenStore;
pub use models::{Entry, EntryInput, SignInResult, User};
pub use session::{MemoryTokenStore, SessionCache, TOKEN_KEY, TokenStore};
