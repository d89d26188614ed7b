//! Play/observer API server for the Farmstead simulation.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **`WebSocket` endpoint** (`/ws`) over which clients receive the
//!   initial state, a stream of state updates as the scheduler advances
//!   the world, and replies to the actions they submit
//! - **REST endpoints**: `GET /` (health check) and `GET /api/farm`
//!   (current world snapshot)
//!
//! # Architecture
//!
//! [`state::AppState`] holds the shared world behind one write lock and
//! a [`tokio::sync::broadcast`] channel for snapshot fan-out. Actions
//! take the write lock, mutate, capture the snapshot, release the lock,
//! and only then publish -- mutate-then-publish, never
//! publish-while-mutating. A subscriber that disconnects or lags is
//! dropped by the channel without disturbing anyone else.

pub mod handlers;
pub mod protocol;
pub mod router;
pub mod server;
pub mod state;
pub mod ws;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use state::{AppState, BroadcastObserver};
