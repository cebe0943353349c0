//! Bearer-token Auth Gate.
//!
//! [`BearerAuth`] wraps the entry routes. It reads `Authorization: Bearer
//! <token>`, verifies the token and stores the resulting
//! [`SessionIdentity`] in request extensions. Requests without a valid token
//! are answered with 401 before the wrapped service runs. Handlers obtain the
//! identity through the [`Authenticated`] extractor.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::ports::TokenService;
use crate::domain::{Error, SessionIdentity};

/// Why a request was turned away by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    MissingHeader,
    WrongScheme,
    InvalidToken,
}

impl Rejection {
    fn message(self) -> &'static str {
        match self {
            Self::MissingHeader => "missing bearer token",
            Self::WrongScheme => "authorization header must use the Bearer scheme",
            Self::InvalidToken => "invalid token",
        }
    }
}

/// Extract the token from an `Authorization` header value.
fn bearer_token(header: &str) -> Result<&str, Rejection> {
    let (scheme, token) = header
        .trim()
        .split_once(' ')
        .ok_or(Rejection::WrongScheme)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Rejection::WrongScheme);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Rejection::MissingHeader);
    }
    Ok(token)
}

fn authenticate(req: &ServiceRequest, tokens: &dyn TokenService) -> Result<SessionIdentity, Rejection> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(Rejection::MissingHeader)?
        .to_str()
        .map_err(|_| Rejection::WrongScheme)?;
    let token = bearer_token(header)?;
    tokens.verify(token).map_err(|err| {
        debug!(error = %err, "token verification failed");
        Rejection::InvalidToken
    })
}

/// Middleware factory gating requests on a verified bearer token.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use journal_backend::inbound::http::bearer::BearerAuth;
/// use journal_backend::outbound::crypto::HmacTokenService;
/// use zeroize::Zeroizing;
///
/// let tokens = Arc::new(HmacTokenService::new(Zeroizing::new(vec![7; 32])));
/// let _app = App::new().service(web::scope("/api/entries").wrap(BearerAuth::new(tokens)));
/// ```
#[derive(Clone)]
pub struct BearerAuth {
    tokens: Arc<dyn TokenService>,
}

impl BearerAuth {
    /// Gate requests using `tokens` for verification.
    pub fn new(tokens: Arc<dyn TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// Service wrapper produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<dyn TokenService>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let outcome = authenticate(&req, self.tokens.as_ref());
        Box::pin(async move {
            match outcome {
                Ok(identity) => {
                    req.extensions_mut().insert(identity);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(rejection) => {
                    debug!(path = req.path(), reason = ?rejection, "request rejected by auth gate");
                    // Built here so the error picks up the request's trace id.
                    let error = Error::unauthorized(rejection.message());
                    Ok(req.into_response(error.error_response()).map_into_right_body())
                }
            }
        })
    }
}

/// Identity of the caller, as verified by [`BearerAuth`].
///
/// Extraction fails with 401 when the gate did not run for this route.
#[derive(Debug, Clone)]
pub struct Authenticated(pub SessionIdentity);

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<SessionIdentity>()
                .cloned()
                .map(Authenticated)
                .ok_or_else(|| Error::unauthorized(Rejection::MissingHeader.message())),
        )
    }
}
