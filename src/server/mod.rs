//! HTTP wrapper around the scan pipeline.
//!
//! A thin axum service: one scan endpoint plus a health check. The chain
//! CSV is re-loaded per request so every scan runs against its own
//! immutable snapshot.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// Shared state for all handlers.
pub struct AppState {
    /// Directory chain CSVs are resolved against.
    pub data_dir: PathBuf,
    /// CSV used when a request does not name one.
    pub default_csv: String,
}

/// Configure and run the web server.
pub async fn run_server(
    addr: SocketAddr,
    data_dir: PathBuf,
    default_csv: String,
) -> anyhow::Result<()> {
    let app_state = Arc::new(AppState {
        data_dir,
        default_csv,
    });

    // Permissive CORS: the scanner UI runs on its own dev-server origin.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/scan", post(handlers::post_scan))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Scanner API listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
