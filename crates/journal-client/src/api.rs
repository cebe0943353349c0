//! Typed facade over the journal HTTP API.
//!
//! Every call maps a non-2xx response to [`ClientError::Status`], reading the
//! message from the JSON `error` field when the server sent one. Entry calls
//! attach `Authorization: Bearer <token>` whenever the session holds a token,
//! falling back to the token persisted in its store.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::ClientError;
use crate::models::{Entry, EntryInput, SignInResult, User};
use crate::session::SessionCache;

#[derive(Serialize)]
struct CredentialsBody<'a> {
    username: &'a str,
    password: &'a str,
}

/// HTTP client for the journal API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Option<SessionCache>,
}

impl ApiClient {
    /// Client for the API rooted at `base_url`, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http_client(reqwest::Client::new(), base_url)
    }

    /// Client reusing a configured [`reqwest::Client`].
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            http,
            base_url,
            session: None,
        }
    }

    /// Attach a session cache used to store and send the bearer token.
    #[must_use]
    pub fn with_session(mut self, session: SessionCache) -> Self {
        self.session = Some(session);
        self
    }

    /// The attached session cache, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&SessionCache> {
        self.session.as_ref()
    }

    /// Register a new account.
    ///
    /// # Errors
    /// 400 for blank fields, 409 when the username is taken.
    pub async fn sign_up(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let request = self
            .request(Method::POST, "/api/auth/sign-up")
            .json(&CredentialsBody { username, password });
        decode(self.send(request).await?).await
    }

    /// Sign in and, when a session is attached, remember the user and token.
    ///
    /// # Errors
    /// 401 for an unknown user or wrong password; [`ClientError::Session`]
    /// if the token cannot be persisted.
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
    ) -> Result<SignInResult, ClientError> {
        let request = self
            .request(Method::POST, "/api/auth/sign-in")
            .json(&CredentialsBody { username, password });
        let result: SignInResult = decode(self.send(request).await?).await?;
        if let Some(session) = &self.session {
            session.set_session(result.user.clone(), result.token.clone())?;
        }
        Ok(result)
    }

    /// Forget the signed-in user and token.
    ///
    /// # Errors
    /// [`ClientError::Session`] if the stored token cannot be removed.
    pub fn sign_out(&self) -> Result<(), ClientError> {
        if let Some(session) = &self.session {
            session.clear_session()?;
        }
        Ok(())
    }

    /// List all entries in creation order.
    ///
    /// # Errors
    /// 401 without a valid token.
    pub async fn read_entries(&self) -> Result<Vec<Entry>, ClientError> {
        let request = self.authorised(Method::GET, "/api/entries");
        decode(self.send(request).await?).await
    }

    /// Fetch one entry.
    ///
    /// # Errors
    /// 404 when the entry does not exist, 401 without a valid token.
    pub async fn read_entry(&self, entry_id: i64) -> Result<Entry, ClientError> {
        let request = self.authorised(Method::GET, &format!("/api/entries/{entry_id}"));
        decode(self.send(request).await?).await
    }

    /// Create an entry.
    ///
    /// # Errors
    /// 400 for a blank field, 401 without a valid token.
    pub async fn add_entry(&self, entry: &EntryInput) -> Result<Entry, ClientError> {
        let request = self.authorised(Method::POST, "/api/entries").json(entry);
        decode(self.send(request).await?).await
    }

    /// Replace all fields of an entry.
    ///
    /// # Errors
    /// 400 for a blank field, 404 when the entry does not exist, 401 without
    /// a valid token.
    pub async fn update_entry(
        &self,
        entry_id: i64,
        entry: &EntryInput,
    ) -> Result<Entry, ClientError> {
        let request = self
            .authorised(Method::PUT, &format!("/api/entries/{entry_id}"))
            .json(entry);
        decode(self.send(request).await?).await
    }

    /// Delete an entry.
    ///
    /// # Errors
    /// 404 when the entry does not exist, 401 without a valid token.
    pub async fn remove_entry(&self, entry_id: i64) -> Result<(), ClientError> {
        let request = self.authorised(Method::DELETE, &format!("/api/entries/{entry_id}"));
        self.send(request).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{path}", self.base_url))
    }

    fn authorised(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.request(method, path);
        let token = self
            .session
            .as_ref()
            .and_then(|session| session.token().or_else(|| session.read_token().ok()));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|err| ClientError::Transport {
            message: err.to_string(),
        })?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = error_message(status, response).await;
        debug!(status = status.as_u16(), %message, "request failed");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    response.json().await.map_err(|err| ClientError::Decode {
        message: err.to_string(),
    })
}

/// The body's `error` field, or the status reason when there is none.
async fn error_message(status: StatusCode, response: Response) -> String {
    let from_body = response
        .bytes()
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<Value>(&bytes).ok())
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_owned));
    from_body.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map_or_else(|| status.as_str().to_owned(), str::to_owned)
    })
}
