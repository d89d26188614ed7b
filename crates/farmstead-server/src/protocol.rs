//! Wire protocol for the play socket.
//!
//! Clients send JSON objects tagged by an `action` field; the server
//! replies with JSON objects tagged by a `type` field. Parsing is
//! deterministic: a missing or unrecognized action tag is rejected
//! before any handler runs, and malformed arguments for a known action
//! are reported as such.

use serde::{Deserialize, Serialize};

use farmstead_types::{Action, WorldSnapshot};

/// The `get_state` wire tag (read-only, not a world action).
const GET_STATE: &str = "get_state";

/// A parsed inbound client message.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// The client asked for a fresh snapshot.
    GetState,
    /// The client submitted a world action.
    Act(Action),
}

/// Why an inbound message was rejected before reaching a handler.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The payload was not valid JSON.
    #[error("invalid JSON: {detail}")]
    InvalidJson {
        /// Parser description of the failure.
        detail: String,
    },

    /// The payload had no string `action` field.
    #[error("missing action field")]
    MissingAction,

    /// The action tag is not one the server knows.
    #[error("unknown action: {name}")]
    UnknownAction {
        /// The tag the client sent.
        name: String,
    },

    /// A known action arrived with unusable arguments.
    #[error("invalid arguments for {action}: {detail}")]
    InvalidArguments {
        /// The action tag.
        action: String,
        /// Parser description of the failure.
        detail: String,
    },
}

/// Parse one inbound text frame.
///
/// # Errors
///
/// Returns [`ProtocolError`] when the frame is not a well-formed,
/// recognized message. The caller reports the error back to the client;
/// world state is never touched.
pub fn parse_client_message(text: &str) -> Result<ClientMessage, ProtocolError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|source| ProtocolError::InvalidJson {
            detail: source.to_string(),
        })?;

    let Some(name) = value.get("action").and_then(serde_json::Value::as_str) else {
        return Err(ProtocolError::MissingAction);
    };

    if name == GET_STATE {
        return Ok(ClientMessage::GetState);
    }
    if !Action::NAMES.contains(&name) {
        return Err(ProtocolError::UnknownAction {
            name: name.to_owned(),
        });
    }

    let action_name = name.to_owned();
    serde_json::from_value::<Action>(value)
        .map(ClientMessage::Act)
        .map_err(|source| ProtocolError::InvalidArguments {
            action: action_name,
            detail: source.to_string(),
        })
}

/// Whether an action reply reports success or a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    /// The action applied.
    Success,
    /// The action was rejected; state is unchanged.
    Error,
}

/// An outbound server message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// First message after connecting: the current world.
    InitialState {
        /// The snapshot.
        state: WorldSnapshot,
    },
    /// The world changed (scheduler advance or another player's action).
    StateUpdate {
        /// The snapshot.
        state: WorldSnapshot,
    },
    /// Reply to a submitted action.
    ActionResult {
        /// Success or rejection.
        status: ActionStatus,
        /// Human-readable outcome.
        message: String,
        /// The post-action snapshot (unchanged on rejection).
        state: WorldSnapshot,
    },
    /// The message could not be processed at all.
    Error {
        /// What went wrong.
        error: String,
        /// The current snapshot, so the client stays in sync.
        state: WorldSnapshot,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn get_state_parses() {
        let parsed = parse_client_message(r#"{"action":"get_state"}"#).unwrap();
        assert_eq!(parsed, ClientMessage::GetState);
    }

    #[test]
    fn world_actions_parse() {
        let parsed =
            parse_client_message(r#"{"action":"buy_feed","amount":25}"#).unwrap();
        assert_eq!(parsed, ClientMessage::Act(Action::BuyFeed { amount: 25 }));
    }

    #[test]
    fn garbage_is_invalid_json() {
        let result = parse_client_message("{not json");
        assert!(matches!(result, Err(ProtocolError::InvalidJson { .. })));
    }

    #[test]
    fn objects_without_an_action_are_rejected() {
        let result = parse_client_message(r#"{"amount":5}"#);
        assert!(matches!(result, Err(ProtocolError::MissingAction)));
    }

    #[test]
    fn unknown_actions_are_rejected_by_name() {
        let result = parse_client_message(r#"{"action":"rob_bank"}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::UnknownAction { ref name }) if name == "rob_bank"
        ));
    }

    #[test]
    fn known_action_with_bad_arguments_is_distinguished() {
        let result = parse_client_message(r#"{"action":"sell","quantity":2}"#);
        assert!(matches!(
            result,
            Err(ProtocolError::InvalidArguments { ref action, .. }) if action == "sell"
        ));
    }

    #[test]
    fn server_messages_carry_their_type_tag() {
        let snapshot = farmstead_core::seed::starting_farm().snapshot();
        let message = ServerMessage::ActionResult {
            status: ActionStatus::Success,
            message: String::from("done"),
            state: snapshot,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(value["type"], "action_result");
        assert_eq!(value["status"], "success");
        assert_eq!(value["state"]["total_days"], 0);
    }
}
