//! # Bridge Module
//!
//! Typed messages exchanged with an embedding shell, and the host that
//! dispatches them to a session. Transport is the embedder's business; the
//! host only sees decoded requests or raw JSON strings.

pub mod host;

pub use host::*;

use crate::{Board, GameCompletionState, GameEvent, GameMode, ItemKind, Move, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Requests sent by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeRequest {
    /// Start a new session, replacing any running one
    NewGame {
        mode: GameMode,
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Swap two adjacent cells
    Swap { from: Position, to: Position },
    /// Spend an item on a target cell
    UseItem { item: ItemKind, target: Position },
    /// Ask for a legal swap
    Hint,
    /// Ask for the current board and counters
    Snapshot,
}

/// Responses sent back to the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BridgeResponse {
    /// Current board and session counters
    Board {
        board: Board,
        score: u64,
        moves_remaining: u32,
        items: BTreeMap<ItemKind, u32>,
        completion_state: GameCompletionState,
    },
    /// Events from an action, with the board they settled on
    Events {
        events: Vec<GameEvent>,
        board: Board,
        score: u64,
        moves_remaining: u32,
    },
    /// A suggested swap, if one exists
    Hint { hint: Option<Move> },
    /// The request could not be served
    Error { message: String },
}

impl BridgeResponse {
    /// Builds an error response from anything printable.
    pub fn error(message: impl std::fmt::Display) -> Self {
        BridgeResponse::Error {
            message: message.to_string(),
        }
    }

    /// Whether this is an error response.
    pub fn is_error(&self) -> bool {
        matches!(self, BridgeResponse::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_decoding() {
        let request: BridgeRequest = serde_json::from_str(
            r#"{"type":"Swap","from":{"row":1,"col":2},"to":{"row":1,"col":3}}"#,
        )
        .unwrap();
        assert_eq!(
            request,
            BridgeRequest::Swap {
                from: Position::new(1, 2),
                to: Position::new(1, 3),
            }
        );

        let request: BridgeRequest =
            serde_json::from_str(r#"{"type":"NewGame","mode":"Challenge"}"#).unwrap();
        assert_eq!(
            request,
            BridgeRequest::NewGame {
                mode: GameMode::Challenge,
                seed: None,
            }
        );

        let request: BridgeRequest = serde_json::from_str(r#"{"type":"Hint"}"#).unwrap();
        assert_eq!(request, BridgeRequest::Hint);
    }

    #[test]
    fn test_unknown_request_is_rejected() {
        assert!(serde_json::from_str::<BridgeRequest>(r#"{"type":"Teleport"}"#).is_err());
        assert!(serde_json::from_str::<BridgeRequest>(r#"{"mode":"Casual"}"#).is_err());
    }

    #[test]
    fn test_error_response_encoding() {
        let response = BridgeResponse::error("no session");
        assert!(response.is_error());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"type":"Error","message":"no session"}"#);
    }
}
