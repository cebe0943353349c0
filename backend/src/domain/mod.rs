//! Domain primitives, ports and services.
//!
//! Purpose: define strongly typed journal entities and the use-cases that
//! operate on them, independent of HTTP and storage.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and its stable identifier.
//! - User, Username, Credentials, SessionIdentity: account types.
//! - Entry, EntryDraft, EntryId: journal entry types.
//! - AccountService, EntryService: implementations of the driving ports.

pub mod account_service;
pub mod auth;
pub mod entry;
pub mod entry_service;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::account_service::AccountService;
pub use self::auth::{Credentials, CredentialsValidationError, SessionIdentity};
pub use self::entry::{
    Entry, EntryDraft, EntryField, EntryId, EntryIdParseError, EntryValidationError,
};
pub use self::entry_service::EntryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    PasswordHash, StoredCredentials, User, UserId, Username, UsernameValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use journal_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
