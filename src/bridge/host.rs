//! Request dispatch for the bridge.

use super::{BridgeRequest, BridgeResponse};
use crate::{CrushError, CrushResult, EngineConfig, GameEvent, GameSession};
use log::{debug, warn};

/// Owns at most one session and answers bridge requests against it.
#[derive(Debug, Clone)]
pub struct BridgeHost {
    config: EngineConfig,
    session: Option<GameSession>,
}

impl BridgeHost {
    /// Creates a host with no running session.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// The running session, if any.
    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    /// Dispatches one request. Failures become `Error` responses.
    pub fn handle(&mut self, request: BridgeRequest) -> BridgeResponse {
        debug!("bridge request: {:?}", request);
        match self.dispatch(request) {
            Ok(response) => response,
            Err(e) => {
                warn!("bridge request failed: {}", e);
                BridgeResponse::error(e)
            }
        }
    }

    /// Decodes a JSON request, dispatches it and encodes the response.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{BridgeHost, EngineConfig};
    ///
    /// let mut host = BridgeHost::new(EngineConfig::new(7));
    /// let reply = host.handle_json(r#"{"type":"NewGame","mode":"Casual"}"#);
    /// assert!(reply.contains(r#""type":"Board""#));
    /// ```
    pub fn handle_json(&mut self, json: &str) -> String {
        let response = match serde_json::from_str::<BridgeRequest>(json) {
            Ok(request) => self.handle(request),
            Err(e) => BridgeResponse::error(format!("malformed request: {}", e)),
        };
        serde_json::to_string(&response).unwrap_or_else(|e| {
            format!(r#"{{"type":"Error","message":"encoding failed: {}"}}"#, e)
        })
    }

    fn dispatch(&mut self, request: BridgeRequest) -> CrushResult<BridgeResponse> {
        match request {
            BridgeRequest::NewGame { mode, seed } => {
                let mut config = self.config.clone();
                if let Some(seed) = seed {
                    config.seed = seed;
                }
                let session = GameSession::new(config, mode)?;
                let response = board_response(&session);
                self.session = Some(session);
                Ok(response)
            }
            BridgeRequest::Swap { from, to } => {
                let session = self.session_mut()?;
                let events = session.try_swap(from, to)?;
                Ok(events_response(session, events))
            }
            BridgeRequest::UseItem { item, target } => {
                let session = self.session_mut()?;
                let events = session.use_item(item, target)?;
                Ok(events_response(session, events))
            }
            BridgeRequest::Hint => {
                let session = self.session_mut()?;
                Ok(BridgeResponse::Hint {
                    hint: session.hint(),
                })
            }
            BridgeRequest::Snapshot => Ok(board_response(self.session_mut()?)),
        }
    }

    fn session_mut(&mut self) -> CrushResult<&mut GameSession> {
        self.session
            .as_mut()
            .ok_or_else(|| CrushError::InvalidMove("no game in progress".to_string()))
    }
}

fn board_response(session: &GameSession) -> BridgeResponse {
    BridgeResponse::Board {
        board: session.board.clone(),
        score: session.score,
        moves_remaining: session.moves_remaining,
        items: session.items.clone(),
        completion_state: session.completion_state,
    }
}

fn events_response(session: &GameSession, events: Vec<GameEvent>) -> BridgeResponse {
    BridgeResponse::Events {
        events,
        board: session.board.clone(),
        score: session.score,
        moves_remaining: session.moves_remaining,
    }
}
