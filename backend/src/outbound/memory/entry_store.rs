//! `EntryStore` backed by an ordered map.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{EntryStore, EntryStoreError};
use crate::domain::{Entry, EntryDraft, EntryId};

#[derive(Default)]
struct State {
    next_id: i64,
    entries: BTreeMap<EntryId, EntryDraft>,
}

/// In-memory entry store. Identifiers are never reused after deletion.
#[derive(Default)]
pub struct MemoryEntryStore {
    state: Mutex<State>,
}

impl MemoryEntryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, EntryStoreError> {
        self.state
            .lock()
            .map_err(|_| EntryStoreError::query("entry store lock poisoned"))
    }
}

#[async_trait]
impl EntryStore for MemoryEntryStore {
    async fn list(&self) -> Result<Vec<Entry>, EntryStoreError> {
        Ok(self
            .lock()?
            .entries
            .iter()
            .map(|(id, draft)| Entry::new(*id, draft.clone()))
            .collect())
    }

    async fn find(&self, id: EntryId) -> Result<Option<Entry>, EntryStoreError> {
        Ok(self
            .lock()?
            .entries
            .get(&id)
            .map(|draft| Entry::new(id, draft.clone())))
    }

    async fn insert(&self, draft: &EntryDraft) -> Result<Entry, EntryStoreError> {
        let mut state = self.lock()?;
        state.next_id += 1;
        let id = EntryId::new(state.next_id);
        state.entries.insert(id, draft.clone());
        Ok(Entry::new(id, draft.clone()))
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
    ) -> Result<Option<Entry>, EntryStoreError> {
        let mut state = self.lock()?;
        Ok(state.entries.get_mut(&id).map(|stored| {
            *stored = draft.clone();
            Entry::new(id, draft.clone())
        }))
    }

    async fn delete(&self, id: EntryId) -> Result<bool, EntryStoreError> {
        Ok(self.lock()?.entries.remove(&id).is_some())
    }
}
