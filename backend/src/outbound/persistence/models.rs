//! Internal Diesel row structs.
//!
//! These never leave the persistence module; adapters convert them into
//! domain types at the boundary.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{entries, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i64,
    pub username: String,
    pub hashed_password: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub hashed_password: &'a str,
}

/// Row read from the entries table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = entries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EntryRow {
    pub entry_id: i64,
    pub title: String,
    pub notes: String,
    pub photo_url: String,
}

/// Insert and update payload for entries; all three fields are always
/// written together.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = entries)]
pub(crate) struct EntryChanges<'a> {
    pub title: &'a str,
    pub notes: &'a str,
    pub photo_url: &'a str,
}
