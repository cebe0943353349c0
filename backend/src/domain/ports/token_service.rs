//! Driven port for issuing and verifying stateless session tokens.
//!
//! Tokens carry `{userId, username}` and are trusted only when their
//! signature validates against the server-held secret. Tokens carry no
//! expiry; they stay valid until the secret rotates.

use super::define_port_error;
use crate::domain::SessionIdentity;

define_port_error! {
    /// Errors raised while issuing or verifying tokens.
    pub enum TokenError {
        /// The token is not structurally a token.
        Malformed { message } => "malformed token: {message}",
        /// The signature does not match the server secret.
        BadSignature => "token signature is invalid",
        /// The token could not be produced.
        Issue { message } => "token issuance failed: {message}",
    }
}

/// Port for token issuance and verification.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Produce a signed token embedding `identity`.
    fn issue(&self, identity: &SessionIdentity) -> Result<String, TokenError>;

    /// Verify `token` and return the identity it carries.
    fn verify(&self, token: &str) -> Result<SessionIdentity, TokenError>;
}
