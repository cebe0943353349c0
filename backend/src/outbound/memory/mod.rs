//! In-process store adapters.
//!
//! Used by debug builds started without a database and by tests that need a
//! real store without PostgreSQL. Data lives only as long as the process.

mod credential_store;
mod entry_store;

pub use credential_store::MemoryCredentialStore;
pub use entry_store::MemoryEntryStore;
