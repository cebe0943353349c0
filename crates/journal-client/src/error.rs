//! Error types for the journal client.
//!
//! Every facade call returns [`ClientError`]; session and storage failures
//! keep their own enums so callers can tell a missing token from a broken
//! store.

use thiserror::Error;

/// Failures reading or writing the persistent token store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The key is not a plain file name.
    #[error("invalid store key '{key}'")]
    InvalidKey {
        /// Offending key.
        key: String,
    },
    /// The backing storage failed.
    #[error("token store I/O failed for '{key}': {message}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Description of the I/O error.
        message: String,
    },
}

/// Failures of the session cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// No token is stored.
    #[error("No token found")]
    NoToken,
    /// The token store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// A thread panicked while holding the session lock.
    #[error("session state lock poisoned")]
    Poisoned,
}

/// Failures surfaced by [`crate::ApiClient`] calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error("request failed with status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// The JSON `error` field, or the status reason when absent.
        message: String,
    },
    /// The request never produced a response.
    #[error("transport error: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },
    /// A success response body could not be decoded.
    #[error("could not decode response: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
    /// The session cache failed.
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ClientError {
    /// HTTP status for [`ClientError::Status`], otherwise `None`.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
