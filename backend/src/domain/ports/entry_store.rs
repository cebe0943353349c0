//! Driven port for journal entry persistence.
//!
//! Every method maps to a single atomic statement in the backing store.
//! There is no optimistic concurrency: concurrent updates to one entry apply
//! last-write-wins.

use async_trait::async_trait;

use crate::domain::{Entry, EntryDraft, EntryId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by entry store adapters.
    pub enum EntryStoreError {
        /// Store connection could not be established.
        Connection { message } => "entry store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message } => "entry store query failed: {message}",
    }
}

/// Port for entry persistence. Absence is reported as `None`/`false`, never
/// as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All entries in creation order.
    async fn list(&self) -> Result<Vec<Entry>, EntryStoreError>;

    /// Fetch one entry.
    async fn find(&self, id: EntryId) -> Result<Option<Entry>, EntryStoreError>;

    /// Insert an entry, assigning a fresh identifier.
    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryStoreError>;

    /// Replace all mutable fields of an existing entry.
    async fn update(&self, id: EntryId, draft: &EntryDraft)
    -> Result<Option<Entry>, EntryStoreError>;

    /// Hard-delete an entry. Returns whether a row was removed.
    async fn delete(&self, id: EntryId) -> Result<bool, EntryStoreError>;
}
