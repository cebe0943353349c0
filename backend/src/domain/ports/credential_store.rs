//! Driven port for persisting user credentials.
//!
//! Adapters own username uniqueness: a duplicate insert must surface as
//! [`CredentialStoreError::UsernameTaken`] rather than a generic query error so
//! the domain can answer with a conflict.

use async_trait::async_trait;

use crate::domain::{PasswordHash, StoredCredentials, User, Username};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// A user with this username already exists.
        UsernameTaken { username } => "username {username} is already taken",
        /// Store connection could not be established.
        Connection { message } => "credential store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "credential store query failed: {message}",
    }
}

/// Port for user credential persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a new user and return its public projection.
    ///
    /// The store assigns the identifier and creation timestamp.
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, CredentialStoreError>;

    /// Look up a user and its password hash by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, CredentialStoreError>;
}
