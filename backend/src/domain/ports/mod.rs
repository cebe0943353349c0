//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`AuthService`, `EntriesQuery`, `EntriesCommand`) are what
//! inbound adapters call. Driven ports (`CredentialStore`, `EntryStore`,
//! `PasswordHasher`, `TokenService`) are what outbound adapters implement.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_service;
mod credential_store;
mod entries;
mod entry_store;
mod password_hasher;
mod token_service;

#[cfg(test)]
pub use auth_service::MockAuthService;
pub use auth_service::{AuthService, SignedIn};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use entries::{MockEntriesCommand, MockEntriesQuery};
pub use entries::{EntriesCommand, EntriesQuery};
#[cfg(test)]
pub use entry_store::MockEntryStore;
pub use entry_store::{EntryStore, EntryStoreError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
