//! HTTP server hosting the webhook plus health and metrics endpoints.
//!
//! Runs on PORT (default 8080).

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::core::metrics;

/// Health and metrics routes, merged into every server we start
pub fn ops_routes() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}

/// Start the web server with the given application routes.
///
/// Returns when the server stops; shuts down gracefully on Ctrl+C.
pub async fn start_web_server(port: u16, app: Router) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = app.merge(ops_routes());

    log::info!("Starting web server on http://{}", addr);
    log::info!("  /callback - LINE webhook");
    log::info!("  /health   - Health check");
    log::info!("  /metrics  - Prometheus metrics");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Web server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}

/// GET /health: simple health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// GET /metrics in Prometheus text exposition format
async fn metrics_handler() -> Response {
    match metrics::render() {
        Ok(body) => ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}
