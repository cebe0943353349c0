//! Entry domain service.
//!
//! Implements [`EntriesQuery`] and [`EntriesCommand`] over an [`EntryStore`],
//! turning store-level absence into not-found errors that carry the entry id.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::domain::ports::{EntriesCommand, EntriesQuery, EntryStore, EntryStoreError};
use crate::domain::{Entry, EntryDraft, EntryId, Error};

/// Entry service implementing the entry driving ports.
pub struct EntryService<S> {
    store: Arc<S>,
}

impl<S> EntryService<S> {
    /// Create a new service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S> Clone for EntryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

fn map_store_error(error: EntryStoreError) -> Error {
    match error {
        EntryStoreError::Connection { message } => {
            warn!(error = %message, "entry store unavailable");
            Error::service_unavailable("service unavailable")
        }
        EntryStoreError::Query { message } => {
            error!(error = %message, "entry store query failed");
            Error::internal(format!("entry store error: {message}"))
        }
    }
}

fn entry_not_found(id: EntryId) -> Error {
    Error::not_found(format!("Entry {id} not found")).with_details(json!({ "entryId": id.get() }))
}

#[async_trait]
impl<S> EntriesQuery for EntryService<S>
where
    S: EntryStore,
{
    async fn list(&self) -> Result<Vec<Entry>, Error> {
        self.store.list().await.map_err(map_store_error)
    }

    async fn get(&self, id: EntryId) -> Result<Entry, Error> {
        self.store
            .find(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| entry_not_found(id))
    }
}

#[async_trait]
impl<S> EntriesCommand for EntryService<S>
where
    S: EntryStore,
{
    async fn create(&self, draft: EntryDraft) -> Result<Entry, Error> {
        let entry = self.store.insert(&draft).await.map_err(map_store_error)?;
        info!(entry_id = %entry.id(), "entry created");
        Ok(entry)
    }

    async fn update(&self, id: EntryId, draft: EntryDraft) -> Result<Entry, Error> {
        let entry = self
            .store
            .update(id, &draft)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| entry_not_found(id))?;
        info!(entry_id = %id, "entry updated");
        Ok(entry)
    }

    async fn delete(&self, id: EntryId) -> Result<(), Error> {
        if self.store.delete(id).await.map_err(map_store_error)? {
            info!(entry_id = %id, "entry deleted");
            Ok(())
        } else {
            Err(entry_not_found(id))
        }
    }
}
