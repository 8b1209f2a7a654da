//! Listshare entry-point: loads settings, composes adapters, and serves the
//! REST API with OpenAPI docs in debug builds.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use listshare::inbound::http::health::HealthState;
use server::{AppSettings, ServerConfig, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings).await?;
    let config = ServerConfig::new(bind_addr).with_cors_origin(settings.cors_origin.clone());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), http_state, config).await?;
    info!(%bind_addr, "listshare listening");
    server.await?;
    Ok(())
}
