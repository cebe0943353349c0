//! Driving ports for entry reads and writes.
//!
//! Missing entries surface as not-found errors here, unlike the driven
//! [`super::EntryStore`] which reports absence as `None`.

use async_trait::async_trait;

use crate::domain::{Entry, EntryDraft, EntryId, Error};

/// Read-side entry use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesQuery: Send + Sync {
    /// All entries in creation order.
    async fn list(&self) -> Result<Vec<Entry>, Error>;

    /// One entry, or not-found.
    async fn get(&self, id: EntryId) -> Result<Entry, Error>;
}

/// Write-side entry use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntriesCommand: Send + Sync {
    /// Persist a new entry.
    async fn create(&self, draft: EntryDraft) -> Result<Entry, Error>;

    /// Replace all three mutable fields of an existing entry.
    async fn update(&self, id: EntryId, draft: EntryDraft) -> Result<Entry, Error>;

    /// Remove an entry permanently.
    async fn delete(&self, id: EntryId) -> Result<(), Error>;
}
