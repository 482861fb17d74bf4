//! # Game Module
//!
//! Session flow on top of the engine: move budgets, items, scoring, combo
//! counting, deadlock reshuffles and statistics.
//!
//! The engine never sees any of this. A session hands it board snapshots and
//! turns the outcomes into [`GameEvent`]s for whatever is driving the game.

pub mod autoplay;
pub mod state;

pub use autoplay::*;
pub use state::*;

use crate::{config, AreaEffect, EngineConfig, Position};
use serde::{Deserialize, Serialize};

/// Session flavour, which decides the move budget and item charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    Casual,
    Challenge,
}

impl GameMode {
    /// Moves available at the start of a session.
    pub fn move_budget(self, config: &EngineConfig) -> u32 {
        match self {
            GameMode::Casual => config.casual_moves,
            GameMode::Challenge => config.challenge_moves,
        }
    }

    /// Charges of each item available at the start of a session.
    pub fn item_charges(self) -> u32 {
        match self {
            GameMode::Casual => config::CASUAL_ITEM_CHARGES,
            GameMode::Challenge => config::CHALLENGE_ITEM_CHARGES,
        }
    }
}

impl std::str::FromStr for GameMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "casual" => Ok(GameMode::Casual),
            "challenge" => Ok(GameMode::Challenge),
            other => Err(format!("unknown game mode '{}'", other)),
        }
    }
}

/// Items the player can spend instead of a swap.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ItemKind {
    /// Clears one cell
    Hammer,
    /// Clears a whole row
    LineBlast,
    /// Clears a cell and its neighbours
    Bomb,
}

impl ItemKind {
    /// All items in display order.
    pub const ALL: [ItemKind; 3] = [ItemKind::Hammer, ItemKind::LineBlast, ItemKind::Bomb];

    /// The area effect this item triggers.
    pub fn effect(self) -> AreaEffect {
        match self {
            ItemKind::Hammer => AreaEffect::Single,
            ItemKind::LineBlast => AreaEffect::Row,
            ItemKind::Bomb => AreaEffect::Radius,
        }
    }
}

/// Events produced by session actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A legal-looking swap that would not match; costs nothing
    SwapRejected { from: Position, to: Position },
    /// A matching swap was applied and cost a move
    SwapApplied { from: Position, to: Position },
    /// An item was spent on a target
    ItemUsed { item: ItemKind, target: Position },
    /// One cascade step removed cells
    MatchesCleared {
        depth: usize,
        cells: usize,
        points: u64,
    },
    /// The action settled
    CascadeFinished { combo: usize, points: u64 },
    /// The settled board had no legal move and was replaced
    Reshuffled,
    /// No moves are left
    GameOver { final_score: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_budgets() {
        let config = EngineConfig::new(1);
        assert_eq!(GameMode::Casual.move_budget(&config), 30);
        assert_eq!(GameMode::Challenge.move_budget(&config), 20);
        assert!(GameMode::Casual.item_charges() > GameMode::Challenge.item_charges());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("Casual".parse::<GameMode>(), Ok(GameMode::Casual));
        assert_eq!("challenge".parse::<GameMode>(), Ok(GameMode::Challenge));
        assert!("arcade".parse::<GameMode>().is_err());
    }

    #[test]
    fn test_item_effects() {
        assert_eq!(ItemKind::Hammer.effect(), AreaEffect::Single);
        assert_eq!(ItemKind::LineBlast.effect(), AreaEffect::Row);
        assert_eq!(ItemKind::Bomb.effect(), AreaEffect::Radius);
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event = GameEvent::CascadeFinished {
            combo: 2,
            points: 90,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"CascadeFinished""#));
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
