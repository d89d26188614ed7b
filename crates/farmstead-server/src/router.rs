//! Axum router construction.
//!
//! Assembles all routes (REST + `WebSocket`) into a single [`Router`]
//! with CORS middleware enabled for cross-origin dashboard access.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;
use crate::ws;

/// Build the complete Axum router for the play server.
///
/// The router includes:
/// - `GET /` -- health check
/// - `GET /ws` -- the play `WebSocket`
/// - `GET /api/farm` -- current world snapshot
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/", get(handlers::index))
        // WebSocket
        .route("/ws", get(ws::ws_play))
        // REST API
        .route("/api/farm", get(handlers::get_farm))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
