//! HTTP inbound adapter exposing the journal REST endpoints.
//!
//! Routes:
//! - `POST /api/auth/sign-up`, `POST /api/auth/sign-in` (open)
//! - `GET|POST /api/entries`, `GET|PUT|DELETE /api/entries/{entryId}`
//!   (behind [`bearer::BearerAuth`])

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::TokenService;

pub mod auth;
pub mod bearer;
pub mod entries;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
mod validation;

pub use error::ApiResult;

use state::HttpState;

/// Register the API scopes on `cfg`.
///
/// `tokens` verifies bearer tokens for the entry routes; it must share the
/// signing secret used by the [`crate::domain::ports::AuthService`] in
/// `state`.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use journal_backend::domain::ports::TokenService;
/// use journal_backend::domain::{AccountService, EntryService};
/// use journal_backend::inbound::http::configure;
/// use journal_backend::inbound::http::state::HttpState;
/// use journal_backend::outbound::crypto::{Argon2PasswordHasher, HmacTokenService};
/// use journal_backend::outbound::memory::{MemoryCredentialStore, MemoryEntryStore};
/// use zeroize::Zeroizing;
///
/// let tokens = Arc::new(HmacTokenService::new(Zeroizing::new(vec![3; 32])));
/// let accounts = AccountService::new(
///     Arc::new(MemoryCredentialStore::default()),
///     Arc::new(Argon2PasswordHasher::new()),
///     Arc::clone(&tokens),
/// );
/// let entries = EntryService::new(Arc::new(MemoryEntryStore::new()));
/// let state = web::Data::new(HttpState::new(
///     Arc::new(accounts),
///     Arc::new(entries.clone()),
///     Arc::new(entries),
/// ));
/// let verifier: Arc<dyn TokenService> = tokens;
/// let _app = App::new().configure(|cfg| configure(cfg, state, verifier));
/// ```
pub fn configure(
    cfg: &mut web::ServiceConfig,
    state: web::Data<HttpState>,
    tokens: Arc<dyn TokenService>,
) {
    cfg.app_data(state)
        .app_data(error::json_config())
        .service(
            web::scope("/api/auth")
                .service(auth::sign_up)
                .service(auth::sign_in),
        )
        .service(
            web::scope("/api/entries")
                .wrap(bearer::BearerAuth::new(tokens))
                .service(entries::list_entries)
                .service(entries::create_entry)
                .service(entries::get_entry)
                .service(entries::update_entry)
                .service(entries::delete_entry),
        );
}
