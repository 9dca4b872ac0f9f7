/// Server setup and initialization
///
/// Wires together all components: database, storages and HTTP routes.
/// Provides the main application factory function for creating the Axum app.

use crate::{
    api::{create_api_routes, AppState},
    config::Config,
    store::Database,
};
use anyhow::Result;
use axum::{routing::get, Router};
use std::path::Path;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
};
use tracing_subscriber::EnvFilter;

/// Build the router for an already prepared application state
///
/// Health check, every `/api/*` route, and a permissive CORS layer so the admin
/// UI may be served from another origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))
        // REST API for all entities
        .merge(create_api_routes())
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Create the main Axum application with all routes and middleware
///
/// Opens the database, applies migrations, seeds an empty database when asked
/// to, and mounts the static UI bundle if one is configured.
pub async fn create_app(config: Config) -> Result<Router> {
    tracing::info!("🏗️ Initializing database");
    let database = Database::connect(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;

    database
        .migrate()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to migrate database: {}", e))?;

    if config.database.seed {
        database
            .seed_if_empty()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to seed database: {}", e))?;
    }

    tracing::info!("📡 Creating HTTP router with all endpoints");
    let mut app = build_router(AppState::new(database.pool().clone()));

    if let Some(dir) = &config.server.static_dir {
        let index = Path::new(dir).join("index.html");
        tracing::info!("🖥️ Serving admin UI from {}", dir);
        app = app.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)));
    }

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Creates the application and starts the Axum server on the configured address and port.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting dnaflow server...");

    // Create the application
    let app = create_app(config.clone()).await?;

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}
