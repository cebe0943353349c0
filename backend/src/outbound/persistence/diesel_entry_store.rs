//! PostgreSQL-backed `EntryStore` implementation using Diesel ORM.
//!
//! Update and delete are single statements keyed on the primary key, so the
//! affected row count alone decides whether the entry existed.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EntryStore, EntryStoreError};
use crate::domain::{Entry, EntryDraft, EntryId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{EntryChanges, EntryRow};
use super::pool::{DbPool, PoolError};
use super::schema::entries;

/// Diesel-backed implementation of the [`EntryStore`] port.
#[derive(Clone)]
pub struct DieselEntryStore {
    pool: DbPool,
}

impl DieselEntryStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EntryStoreError {
    EntryStoreError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> EntryStoreError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => EntryStoreError::connection(message),
        DieselFailure::Query(message) => EntryStoreError::query(message),
        DieselFailure::UniqueViolation => EntryStoreError::query("unexpected unique violation"),
    }
}

fn row_to_entry(row: EntryRow) -> Result<Entry, EntryStoreError> {
    let EntryRow {
        entry_id,
        title,
        notes,
        photo_url,
    } = row;
    let draft = EntryDraft::try_new(title, notes, photo_url)
        .map_err(|err| EntryStoreError::query(format!("entry {entry_id} is corrupt: {err}")))?;
    Ok(Entry::new(EntryId::new(entry_id), draft))
}

fn changes(draft: &EntryDraft) -> EntryChanges<'_> {
    EntryChanges {
        title: draft.title(),
        notes: draft.notes(),
        photo_url: draft.photo_url(),
    }
}

#[async_trait]
impl EntryStore for DieselEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, EntryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<EntryRow> = entries::table
            .select(EntryRow::as_select())
            .order(entries::entry_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn find(&self, id: EntryId) -> Result<Option<Entry>, EntryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EntryRow> = entries::table
            .find(id.get())
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_entry).transpose()
    }

    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: EntryRow = diesel::insert_into(entries::table)
            .values(&changes(draft))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_entry(row)
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
    ) -> Result<Option<Entry>, EntryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<EntryRow> = diesel::update(entries::table.find(id.get()))
            .set(&changes(draft))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_entry).transpose()
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed = diesel::delete(entries::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
