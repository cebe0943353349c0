//! Account API handlers.
//!
//! ```text
//! POST /api/auth/sign-up {"username":"alice","password":"secret123"}
//! POST /api/auth/sign-in {"username":"alice","password":"secret123"}
//! ```

use actix_web::{HttpResponse, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Credentials, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::credentials_error;

/// Body for sign-up and sign-in. Missing fields read as empty strings so they
/// fail validation with field details.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CredentialsRequest {
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "secret123")]
    pub password: String,
}

/// Public projection of a user. Never includes the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub user_id: i64,
    #[schema(example = "alice")]
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().get(),
            username: user.username().to_string(),
            created_at: user.created_at(),
        }
    }
}

/// Successful sign-in payload.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct SignInResponse {
    pub user: UserResponse,
    /// Bearer token for `Authorization: Bearer <token>`.
    pub token: String,
}

fn credentials(payload: web::Json<CredentialsRequest>) -> ApiResult<Credentials> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let password = zeroize::Zeroizing::new(password);
    Credentials::try_from_parts(&username, &password).map_err(credentials_error)
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signUp",
    security([])
)]
#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = credentials(payload)?;
    let user = state.auth.sign_up(&credentials).await?;
    Ok(HttpResponse::Created().json(UserResponse::from(&user)))
}

/// Exchange credentials for a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Signed in", body = SignInResponse),
        (status = 400, description = "Missing username or password", body = ErrorSchema),
        (status = 401, description = "Invalid login", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<SignInResponse>> {
    let credentials = credentials(payload)?;
    let signed_in = state.auth.sign_in(&credentials).await.inspect_err(|err| {
        debug!(code = ?err.code(), "sign-in rejected");
    })?;
    Ok(web::Json(SignInResponse {
        user: UserResponse::from(&signed_in.user),
        token: signed_in.token,
    }))
}
