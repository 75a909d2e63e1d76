pub mod config;
pub mod error;
pub mod planet;
pub mod zones;


use anyhow::Context;
use axum::routing::get;
use axum::Router;
use config::{Config, Mode};
use ecobot_engine::ZoneCatalog;
use ecobot_protocol::routes;
use planet::PlanetApp;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use zones::ZonesApp;

pub fn build_router(config: &Config) -> anyhow::Result<Router> {
    let api = match config.mode {
        Mode::Zones => {
            let catalog = match &config.catalog {
                Some(path) => ZoneCatalog::load(path)?,
                None => ZoneCatalog::eco_city(),
            };
            tracing::info!(zones = catalog.zones.len(), "zone catalog loaded");
            zones::router(ZonesApp::new(Arc::new(catalog)))
        }
        Mode::Planet => planet::router(PlanetApp::new(config.read_mode, config.seed)),
    };

    Ok(api
        .route(routes::HEALTH, get(health))
        .layer(TraceLayer::new_for_http())
        // Browser game served from anywhere; the API is open to every origin.
        .layer(CorsLayer::permissive()))
}

async fn health() -> &'static str {
    "ok"
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    serve_listener(listener, &config, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("ctrl-c handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    })
    .await?;
    Ok(())
}

pub async fn serve_listener(
    listener: tokio::net::TcpListener,
    config: &Config,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<SocketAddr> {
    let app = build_router(config)?;
    let addr = listener.local_addr()?;
    tracing::info!(%addr, mode = ?config.mode, "ecobot server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    tracing::info!("ecobot server stopped");
    Ok(addr)
}
