//! Driven port for salted, memory-hard password hashing.

use super::define_port_error;
use crate::domain::PasswordHash;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hashing could not be performed.
        Hash { message } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message } => "stored password hash is malformed: {message}",
    }
}

/// Port for hashing and verifying passwords.
///
/// Hashing is CPU and memory heavy; callers on an async runtime should expect
/// adapters to block for tens of milliseconds.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError>;

    /// Check `password` against a stored hash.
    fn verify(&self, password: &str, hash: &PasswordHash) -> Result<bool, PasswordHasherError>;
}
