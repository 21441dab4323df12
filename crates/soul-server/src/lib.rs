//! HTTP query surface for the soul registry.
//!
//! A thin axum layer exposing the resolution service operations as REST
//! endpoints. No business logic lives here: handlers decode input, call
//! the service, and map outcomes onto the status contract (missing
//! record 404, malformed input 400, duplicate registration 409, store
//! failure 503; an empty result list is a plain 200).

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod routes;

use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use soul_resolve::ResolutionService;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub service: Arc<ResolutionService>,
}

/// Builds the API router with tracing and permissive CORS layers.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/resolve/:name", get(routes::resolve))
        .route("/api/alternatives/:name", get(routes::alternatives))
        .route("/api/verify", post(routes::verify))
        .route("/api/recommend", post(routes::recommend))
        .route("/api/graph", post(routes::build_graph))
        .route("/api/stats", get(routes::stats))
        .route("/api/packages", post(routes::register))
        .route("/api/packages/:namespace/:name", delete(routes::purge))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Binds `addr` and serves the API until the task is cancelled or the
/// listener fails.
pub async fn serve(addr: &str, service: Arc<ResolutionService>) -> std::io::Result<()> {
    let app = create_router(AppState { service });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("soul registry API listening on {addr}");
    axum::serve(listener, app).await
}
