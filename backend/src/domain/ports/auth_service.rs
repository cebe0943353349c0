//! Driving port for sign-up and sign-in use-cases.
//!
//! Inbound adapters call this port without knowing which stores, hashers or
//! token signers back it, so HTTP handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Credentials, Error, User};

/// Result of a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// The authenticated user.
    pub user: User,
    /// Bearer token to present on subsequent requests.
    pub token: String,
}

/// Domain use-case port for account authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user.
    ///
    /// Fails with a conflict when the username is already taken.
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, Error>;

    /// Check credentials and issue a session token.
    ///
    /// Fails with unauthorised when the username is unknown or the password
    /// does not match; the two cases are indistinguishable to callers.
    async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, Error>;
}
