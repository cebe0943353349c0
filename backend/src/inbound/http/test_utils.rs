//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::ports::{
    MockAuthService, MockEntriesCommand, MockEntriesQuery, MockTokenService, TokenError,
    TokenService,
};
use crate::domain::{SessionIdentity, UserId, Username};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Token accepted by [`test_tokens`].
pub const TEST_TOKEN: &str = "test-token";

/// Token verifier accepting only [`TEST_TOKEN`], which resolves to user 1
/// `alice`.
pub fn test_tokens() -> Arc<dyn TokenService> {
    let mut tokens = MockTokenService::new();
    tokens.expect_verify().returning(|candidate| {
        if candidate == TEST_TOKEN {
            let username = Username::new("alice").map_err(|_| TokenError::bad_signature())?;
            Ok(SessionIdentity::new(UserId::new(1), username))
        } else {
            Err(TokenError::bad_signature())
        }
    });
    Arc::new(tokens)
}

/// State whose entry ports fail the test if touched.
pub fn auth_only_state(auth: MockAuthService) -> HttpState {
    HttpState::new(
        Arc::new(auth),
        Arc::new(MockEntriesQuery::new()),
        Arc::new(MockEntriesCommand::new()),
    )
}

/// State whose auth port fails the test if touched.
pub fn entries_state(query: MockEntriesQuery, command: MockEntriesCommand) -> HttpState {
    HttpState::new(
        Arc::new(MockAuthService::new()),
        Arc::new(query),
        Arc::new(command),
    )
}

/// Full route table over `state`, gated by [`test_tokens`].
pub fn entries_test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = web::Data::new(state);
    App::new().configure(move |cfg| configure(cfg, state, test_tokens()))
}

/// Same route table as [`entries_test_app`]; named for readability in the
/// account handler tests.
pub fn auth_test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    entries_test_app(state)
}
