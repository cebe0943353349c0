//! Wire types exchanged with the journal API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Public projection of a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub user_id: i64,
    /// Unique username.
    pub username: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Successful sign-in payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResult {
    /// The signed-in user.
    pub user: User,
    /// Bearer token for subsequent entry calls.
    pub token: String,
}

/// A persisted journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Server-assigned identifier.
    pub entry_id: i64,
    /// Entry title.
    pub title: String,
    /// Entry notes.
    pub notes: String,
    /// Photo URL.
    pub photo_url: String,
}

impl Entry {
    /// The mutable fields of this entry, e.g. to edit and send back.
    #[must_use]
    pub fn input(&self) -> EntryInput {
        EntryInput::new(&self.title, &self.notes, &self.photo_url)
    }
}

/// Fields sent on create and update. All three replace the stored values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    /// Entry title.
    pub title: String,
    /// Entry notes.
    pub notes: String,
    /// Photo URL.
    pub photo_url: String,
}

impl EntryInput {
    /// Bundle the three entry fields.
    pub fn new(
        title: impl Into<String>,
        notes: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            notes: notes.into(),
            photo_url: photo_url.into(),
        }
    }
}
