//! Diesel table definitions for the journal schema.
//!
//! Kept in sync with `backend/migrations` by hand.

diesel::table! {
    /// Registered accounts.
    users (user_id) {
        /// Identity primary key.
        user_id -> Int8,
        /// Trimmed login name, unique.
        username -> Text,
        /// PHC-formatted Argon2id hash.
        hashed_password -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Journal entries shared by every signed-in user.
    entries (entry_id) {
        /// Identity primary key.
        entry_id -> Int8,
        title -> Text,
        notes -> Text,
        photo_url -> Text,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, entries);
