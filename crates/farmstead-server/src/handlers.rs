//! REST endpoint handlers.
//!
//! Both endpoints read from the shared world via [`AppState`]; neither
//! mutates anything.
//!
//! | Method | Path        | Description                 |
//! |--------|-------------|-----------------------------|
//! | `GET`  | `/`         | Health check JSON           |
//! | `GET`  | `/api/farm` | Current world snapshot      |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;

use crate::state::AppState;

/// Health check: confirms the backend is up and serving.
///
/// # Route
///
/// `GET /`
pub async fn index() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "message": "Farmstead simulation backend is running",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Return the current world snapshot.
///
/// # Route
///
/// `GET /api/farm`
pub async fn get_farm(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.snapshot().await)
}
