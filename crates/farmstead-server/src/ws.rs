//! `WebSocket` handler: the play socket.
//!
//! Clients connect to `GET /ws` and immediately receive the current
//! world as an `initial_state` message. From then on the socket carries
//! two interleaved flows, multiplexed with `tokio::select!`:
//!
//! - snapshots from the broadcast channel, forwarded as `state_update`
//!   frames whenever the scheduler advances the world or any player
//!   acts;
//! - the client's own messages, parsed, applied, and answered with an
//!   `action_result` (or an `error` frame for unusable messages).
//!
//! If a client falls behind the broadcast, lagged snapshots are
//! silently skipped and the client resumes from the most recent one. A
//! failed send means the client is gone; the handler returns and the
//! receiver drops out of the subscriber set.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::IntoResponse;
use tracing::{debug, warn};

use crate::protocol::{self, ActionStatus, ClientMessage, ServerMessage};
use crate::state::AppState;

/// Upgrade an HTTP request to a `WebSocket` connection and begin the
/// play session.
///
/// # Route
///
/// `GET /ws`
pub async fn ws_play(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_ws(socket, state))
}

/// Drive one client's socket for its whole lifetime.
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
    debug!("WebSocket client connected");

    // The client gets the world immediately, before any subscription
    // traffic.
    let initial = ServerMessage::InitialState {
        state: state.snapshot().await,
    };
    if send_message(&mut socket, &initial).await.is_err() {
        debug!("WebSocket client left before the initial state");
        return;
    }

    let mut rx = state.subscribe();

    loop {
        tokio::select! {
            // A snapshot published by the scheduler or another player.
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        let update = ServerMessage::StateUpdate { state: snapshot };
                        if send_message(&mut socket, &update).await.is_err() {
                            debug!("WebSocket client disconnected (send failed)");
                            return;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        debug!(skipped = n, "WebSocket client lagged, skipping ahead");
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                        debug!("Broadcast channel closed, shutting down WebSocket");
                        return;
                    }
                }
            }
            // The client sent something.
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let reply = process_text(&state, text.as_str()).await;
                        if send_message(&mut socket, &reply).await.is_err() {
                            debug!("WebSocket client disconnected (reply failed)");
                            return;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        debug!("WebSocket client disconnected");
                        return;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let pong = Message::Pong(data);
                        if socket.send(pong).await.is_err() {
                            debug!("WebSocket client disconnected (pong failed)");
                            return;
                        }
                    }
                    Some(Err(e)) => {
                        debug!("WebSocket error: {e}");
                        return;
                    }
                    _ => {
                        // Ignore binary and pong frames.
                    }
                }
            }
        }
    }
}

/// Parse and handle one text frame, producing the direct reply.
///
/// A successful or rejected action also publishes the post-action
/// snapshot to every subscriber, so all clients converge.
async fn process_text(state: &Arc<AppState>, text: &str) -> ServerMessage {
    match protocol::parse_client_message(text) {
        Ok(ClientMessage::GetState) => ServerMessage::StateUpdate {
            state: state.snapshot().await,
        },
        Ok(ClientMessage::Act(action)) => {
            let (result, snapshot) = state.apply_action(&action).await;
            drop(state.broadcast(snapshot.clone()));
            match result {
                Ok(receipt) => ServerMessage::ActionResult {
                    status: ActionStatus::Success,
                    message: receipt.message,
                    state: snapshot,
                },
                Err(error) => ServerMessage::ActionResult {
                    status: ActionStatus::Error,
                    message: error.to_string(),
                    state: snapshot,
                },
            }
        }
        Err(error) => {
            debug!(%error, "rejected client message");
            ServerMessage::Error {
                error: error.to_string(),
                state: state.snapshot().await,
            }
        }
    }
}

/// Serialize and send one server message as a text frame.
async fn send_message(
    socket: &mut WebSocket,
    message: &ServerMessage,
) -> Result<(), axum::Error> {
    let json = match serde_json::to_string(message) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize server message: {e}");
            // Nothing was sent; the connection is still usable.
            return Ok(());
        }
    };
    socket.send(Message::Text(json.into())).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unreachable)]
mod tests {
    use std::sync::Arc;

    use farmstead_core::events::NoOpSink;
    use farmstead_core::seed::starting_farm;
    use farmstead_sim::SimTuning;
    use tokio::sync::RwLock;

    use super::*;

    fn make_state() -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::new(RwLock::new(starting_farm())),
            SimTuning::default(),
            Arc::new(NoOpSink),
        ))
    }

    #[tokio::test]
    async fn get_state_yields_a_state_update() {
        let state = make_state();
        let reply = process_text(&state, r#"{"action":"get_state"}"#).await;
        assert!(matches!(reply, ServerMessage::StateUpdate { .. }));
    }

    #[tokio::test]
    async fn actions_reply_and_broadcast() {
        let state = make_state();
        let mut rx = state.subscribe();

        let reply =
            process_text(&state, r#"{"action":"buy_feed","amount":50}"#).await;

        let ServerMessage::ActionResult {
            status,
            message,
            state: snapshot,
        } = reply
        else {
            unreachable!("expected an action result");
        };
        assert_eq!(status, ActionStatus::Success);
        assert_eq!(message, "Bought 50 feed for $37.50");
        assert_eq!(snapshot.total_days, 0);

        // Every subscriber converges on the same snapshot.
        let broadcast = rx.recv().await.unwrap();
        assert_eq!(broadcast, snapshot);
    }

    #[tokio::test]
    async fn rejected_actions_report_an_error_status() {
        let state = make_state();
        let reply = process_text(
            &state,
            r#"{"action":"sell","item":"eggs","quantity":10}"#,
        )
        .await;

        let ServerMessage::ActionResult {
            status,
            message,
            state: snapshot,
        } = reply
        else {
            unreachable!("expected an action result");
        };
        assert_eq!(status, ActionStatus::Error);
        assert!(message.contains("not enough eggs"));
        // The snapshot is the unchanged world.
        assert_eq!(
            snapshot
                .resources
                .get(&farmstead_types::Resource::Eggs)
                .copied()
                .unwrap(),
            rust_decimal_macros::dec!(5)
        );
    }

    #[tokio::test]
    async fn unknown_actions_yield_an_error_frame() {
        let state = make_state();
        let reply = process_text(&state, r#"{"action":"dance"}"#).await;

        let ServerMessage::Error { error, .. } = reply else {
            unreachable!("expected an error frame");
        };
        assert_eq!(error, "unknown action: dance");
    }

    #[tokio::test]
    async fn malformed_json_yields_an_error_frame() {
        let state = make_state();
        let reply = process_text(&state, "{oops").await;
        assert!(matches!(reply, ServerMessage::Error { .. }));
    }
}
