//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and contain no
//! business logic. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use journal_backend::outbound::persistence::{
//!     DbPool, DieselEntryStore, PoolConfig, run_migrations,
//! };
//!
//! # async fn demo() -> Result<(), journal_backend::outbound::persistence::PoolError> {
//! let url = "postgres://journal@localhost/journal";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let entries = DieselEntryStore::new(pool);
//! # let _ = entries;
//! # Ok(())
//! # }
//! ```

mod diesel_credential_store;
mod diesel_entry_store;
mod diesel_error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_credential_store::DieselCredentialStore;
pub use diesel_entry_store::DieselEntryStore;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
