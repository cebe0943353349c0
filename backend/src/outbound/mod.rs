//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL stores using Diesel with `diesel-async`
//! - **memory**: process-local stores for database-less debug runs and tests
//! - **crypto**: Argon2id password hashing and HMAC-SHA256 session tokens
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod crypto;
pub mod memory;
pub mod persistence;
