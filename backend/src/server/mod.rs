//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::{AppServices, Stores, build_services};

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use journal_backend::Trace;
#[cfg(debug_assertions)]
use journal_backend::doc::ApiDoc;
use journal_backend::domain::ports::TokenService;
use journal_backend::inbound::http::configure;
use journal_backend::inbound::http::health::{HealthState, live, ready};
use journal_backend::inbound::http::state::HttpState;
use journal_backend::inbound::http::token_config::BuildMode;
use journal_backend::outbound::persistence::{DbPool, PoolConfig, run_migrations};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Everything the app factory needs per worker.
#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    tokens: Arc<dyn TokenService>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        tokens,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .wrap(Trace)
        .configure(|cfg| configure(cfg, http_state, tokens))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Pick the store adapters for `settings`.
///
/// With a database URL, migrations are applied and a pool is built. Without
/// one, debug builds fall back to in-memory stores and release builds refuse
/// to start.
///
/// # Errors
/// Returns [`io::Error`] when migrations or pool construction fail, or when a
/// release build has no database configured.
pub async fn select_stores(settings: &ServerSettings, mode: BuildMode) -> io::Result<Stores> {
    let Some(url) = settings.database_url() else {
        if mode.is_debug() {
            warn!("no database configured; using in-memory stores (data is not persisted)");
            return Ok(Stores::Memory);
        }
        return Err(io::Error::other(
            "JOURNAL_DATABASE_URL is required in release builds",
        ));
    };

    run_migrations(url)
        .await
        .map_err(|err| io::Error::other(format!("migrations failed: {err}")))?;
    let max_size = settings.db_max_connections().map_err(io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(max_size))
        .await
        .map_err(|err| io::Error::other(format!("create database pool: {err}")))?;
    info!(max_size, "database pool ready");
    Ok(Stores::Postgres(pool))
}

/// Construct an Actix HTTP server over `services`.
///
/// # Errors
/// Propagates [`io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    services: AppServices,
    bind_addr: SocketAddr,
) -> io::Result<Server> {
    let AppServices { http_state, tokens } = services;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        tokens,
    };

    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();

    info!(%bind_addr, "listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};
    use zeroize::Zeroizing;

    fn deps() -> AppDependencies {
        let services = build_services(Stores::Memory, Zeroizing::new(vec![4; 32]));
        let health = web::Data::new(HealthState::new());
        health.mark_ready();
        AppDependencies {
            health_state: health,
            http_state: web::Data::new(services.http_state),
            tokens: services.tokens,
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_health_and_gates_entries() {
        let app = actix_test::init_service(build_app(deps())).await;

        let readiness = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(readiness.status(), StatusCode::OK);

        let entries = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/entries").to_request(),
        )
        .await;
        assert_eq!(entries.status(), StatusCode::UNAUTHORIZED);
        assert!(entries.headers().contains_key("trace-id"));
    }

    #[rstest]
    #[actix_web::test]
    async fn signed_in_token_opens_the_entry_routes() {
        let app = actix_test::init_service(build_app(deps())).await;
        let creds = json!({ "username": "alice", "password": "secret123" });

        let sign_up = actix_test::TestRequest::post()
            .uri("/api/auth/sign-up")
            .set_json(&creds)
            .to_request();
        assert_eq!(
            actix_test::call_service(&app, sign_up).await.status(),
            StatusCode::CREATED
        );
        let sign_in = actix_test::TestRequest::post()
            .uri("/api/auth/sign-in")
            .set_json(&creds)
            .to_request();
        let body: Value = actix_test::call_and_read_body_json(&app, sign_in).await;
        let token = body["token"].as_str().expect("token").to_owned();

        let list = actix_test::TestRequest::get()
            .uri("/api/entries")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let entries: Value = actix_test::call_and_read_body_json(&app, list).await;
        assert_eq!(entries, json!([]));
    }

    #[rstest]
    #[tokio::test]
    async fn release_builds_require_a_database() {
        let settings = ServerSettings {
            bind_addr: None,
            database_url: None,
            db_max_connections: None,
        };
        assert!(select_stores(&settings, BuildMode::Release).await.is_err());
        assert!(matches!(
            select_stores(&settings, BuildMode::Debug).await,
            Ok(Stores::Memory)
        ));
    }
}
