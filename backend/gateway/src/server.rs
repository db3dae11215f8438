//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use mathlens_pipeline::Solver;

use crate::health_api;
use crate::solve_api;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub solver: Arc<Solver>,
    /// Request body cap: the base64 expansion of `max_image_bytes` plus JSON
    /// framing headroom.
    pub body_limit: usize,
}

impl GatewayState {
    pub fn new(solver: Arc<Solver>, max_image_bytes: usize) -> Self {
        Self {
            solver,
            body_limit: max_image_bytes / 3 * 4 + 16 * 1024,
        }
    }
}

/// Build the gateway router.
pub fn build_router(state: GatewayState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route(
            "/api/solve",
            post(solve_api::solve).fallback(solve_api::method_not_allowed),
        )
        .route("/api/health", get(health_api::get_health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the main axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
