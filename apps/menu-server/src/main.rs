use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use menu_api::{build_router, AppState};
use menu_infrastructure::{seed_demo_menu, DocumentBackend, LocalObjectStorage};
use menu_shared::config::AppConfig;
use menu_shared::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration (.env included)
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize telemetry; the guard flushes the log file on exit
    let _log_guard = init_telemetry(&config.logging)?;

    info!("{} starting ({})", config.app.name, config.app.env);

    // Document store
    let store = Arc::new(
        DocumentBackend::connect(&config.database)
            .await
            .context("Failed to open document store")?,
    );

    if config.seed.demo {
        if config.is_production() {
            warn!("Demo seed is enabled in production");
        }
        let seeded = seed_demo_menu(store.clone()).await?;
        info!("Demo seed created {} menu items", seeded);
    }

    // Object storage for uploaded images
    let storage = Arc::new(LocalObjectStorage::from_settings(&config.storage));
    tokio::fs::create_dir_all(storage.root_dir())
        .await
        .with_context(|| format!("Failed to create upload directory {}", config.storage.root_dir))?;

    let state = AppState::new(store, storage.clone(), &config.storage.prefix);

    let cors = match config.cors.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(e) => {
            warn!("Invalid CORS origin {}: {}", config.cors.allowed_origin, e);
            CorsLayer::new()
        }
    };

    // Build router
    let app = build_router(state, storage.root_dir(), config.upload.max_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(
            cors.allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE]),
        );

    // Bind address
    let host: std::net::IpAddr = config.app.host.parse()?;
    let addr = SocketAddr::from((host, config.app.port));
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
