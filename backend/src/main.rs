//! Backend entry-point: loads settings, wires stores and serves the REST API.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use journal_backend::inbound::http::health::HealthState;
use journal_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
use server::{ServerSettings, build_services, create_server, select_stores};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| io::Error::other(format!("load settings: {err}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let mode = BuildMode::from_debug_assertions();

    let token_settings = token_settings_from_env(&DefaultEnv::new(), mode)
        .map_err(|err| io::Error::other(format!("token configuration: {err}")))?;
    let stores = select_stores(&settings, mode).await?;
    let services = build_services(stores, token_settings.secret);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, services, bind_addr)?;
    server.await
}
