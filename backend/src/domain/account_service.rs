//! Account domain service: sign-up and sign-in.
//!
//! Implements the [`AuthService`] driving port over the credential store,
//! password hasher and token signer. Hashing runs on the blocking pool so a
//! slow Argon2 round never stalls the async workers.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};

use crate::domain::ports::{
    AuthService, CredentialStore, CredentialStoreError, PasswordHasher, PasswordHasherError,
    SignedIn, TokenError, TokenService,
};
use crate::domain::{Credentials, Error, PasswordHash, SessionIdentity, User};

const INVALID_LOGIN: &str = "invalid login";
const SERVICE_UNAVAILABLE: &str = "service unavailable";
// Hashed once per service and verified against for unknown usernames, so
// both sign-in failure paths cost one Argon2 verification.
const DECOY_PASSWORD: &str = "journal-decoy-password";

/// Account service implementing [`AuthService`].
pub struct AccountService<S, H, T> {
    store: Arc<S>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    decoy_hash: Arc<OnceCell<PasswordHash>>,
}

impl<S, H, T> AccountService<S, H, T> {
    /// Create a new service with the given adapters.
    pub fn new(store: Arc<S>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            store,
            hasher,
            tokens,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }
}

impl<S, H, T> Clone for AccountService<S, H, T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            decoy_hash: Arc::clone(&self.decoy_hash),
        }
    }
}

fn map_store_error(error: CredentialStoreError) -> Error {
    match error {
        CredentialStoreError::UsernameTaken { .. } => Error::conflict("username already taken"),
        CredentialStoreError::Connection { message } => {
            warn!(error = %message, "credential store unavailable");
            Error::service_unavailable(SERVICE_UNAVAILABLE)
        }
        CredentialStoreError::Query { message } => {
            error!(error = %message, "credential store query failed");
            Error::internal(format!("credential store error: {message}"))
        }
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

fn map_token_error(error: TokenError) -> Error {
    Error::internal(format!("failed to issue token: {error}"))
}

impl<S, H, T> AccountService<S, H, T>
where
    H: PasswordHasher + 'static,
{
    async fn hash_password(&self, password: &str) -> Result<PasswordHash, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|err| Error::internal(format!("hashing task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    async fn verify_password(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = zeroize::Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("verification task failed: {err}")))?
            .map_err(map_hasher_error)
    }

    /// Burn one verification for a username with no account. The outcome is
    /// discarded; the caller rejects the attempt regardless.
    async fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.hash_password(DECOY_PASSWORD))
            .await;
        match decoy {
            Ok(hash) => {
                if let Err(err) = self.verify_password(password, hash.clone()).await {
                    debug!(error = %err, "decoy verification failed");
                }
            }
            Err(err) => debug!(error = %err, "decoy hash unavailable"),
        }
    }
}

#[async_trait]
impl<S, H, T> AuthService for AccountService<S, H, T>
where
    S: CredentialStore,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn sign_up(&self, credentials: &Credentials) -> Result<User, Error> {
        let hash = self.hash_password(credentials.password()).await?;
        let user = self
            .store
            .create_user(credentials.username(), &hash)
            .await
            .map_err(map_store_error)?;
        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<SignedIn, Error> {
        let Some(stored) = self
            .store
            .find_by_username(credentials.username())
            .await
            .map_err(map_store_error)?
        else {
            self.verify_decoy(credentials.password()).await;
            debug!("sign-in for unknown username");
            return Err(Error::unauthorized(INVALID_LOGIN));
        };

        if !self
            .verify_password(credentials.password(), stored.password_hash)
            .await?
        {
            debug!(user_id = %stored.user.id(), "sign-in with wrong password");
            return Err(Error::unauthorized(INVALID_LOGIN));
        }

        let identity = SessionIdentity::new(stored.user.id(), stored.user.username().clone());
        let token = self.tokens.issue(&identity).map_err(map_token_error)?;
        info!(user_id = %stored.user.id(), "user signed in");
        Ok(SignedIn {
            user: stored.user,
            token,
        })
    }
}
