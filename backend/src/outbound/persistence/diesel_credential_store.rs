//! PostgreSQL-backed `CredentialStore` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CredentialStore, CredentialStoreError};
use crate::domain::{PasswordHash, StoredCredentials, User, UserId, Username};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`CredentialStore`] port.
///
/// Username uniqueness is enforced by the `users.username` unique index;
/// concurrent sign-ups for one name resolve to exactly one winner.
#[derive(Clone)]
pub struct DieselCredentialStore {
    pool: DbPool,
}

impl DieselCredentialStore {
    /// Create a new store with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CredentialStoreError {
    CredentialStoreError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error, username: &Username) -> CredentialStoreError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation => CredentialStoreError::username_taken(username.as_ref()),
        DieselFailure::Connection(message) => CredentialStoreError::connection(message),
        DieselFailure::Query(message) => CredentialStoreError::query(message),
    }
}

fn row_to_credentials(row: UserRow) -> Result<StoredCredentials, CredentialStoreError> {
    let username = Username::new(&row.username).map_err(|err| {
        CredentialStoreError::query(format!("invalid username in database: {err}"))
    })?;
    Ok(StoredCredentials {
        user: User::new(UserId::new(row.user_id), username, row.created_at),
        password_hash: PasswordHash::new(row.hashed_password),
    })
}

#[async_trait]
impl CredentialStore for DieselCredentialStore {
    async fn create_user(
        &self,
        username: &Username,
        password_hash: &PasswordHash,
    ) -> Result<User, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            username: username.as_ref(),
            hashed_password: password_hash.as_ref(),
        };
        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, username))?;

        row_to_credentials(inserted).map(|stored| stored.user)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<StoredCredentials>, CredentialStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, username))?;

        row.map(row_to_credentials).transpose()
    }
}
