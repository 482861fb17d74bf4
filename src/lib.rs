//! # Tilecrush
//!
//! A match-3 grid engine: board generation, match detection, move validation,
//! gravity/refill cascades and special-tile effects, plus the session layer
//! that turns them into a game.
//!
//! ## Architecture Overview
//!
//! The crate is layered leaf-first:
//!
//! - **Grid**: `Board`, `Cell` and coordinate types
//! - **Matching**: run detection and swap validation
//! - **Generation**: configuration, initial boards and refill cells
//! - **Resolve**: gravity, refill, cascades and area effects
//! - **Engine**: the collaborator facade handed to the game layer
//! - **Game**: sessions, move budgets, scoring and statistics
//! - **Bridge**: tagged request/response messages for an embedding shell
//!
//! Every engine operation takes a board snapshot and returns a new one. Nothing
//! in the engine keeps global state; configuration travels as `EngineConfig`.

pub mod bridge;
pub mod engine;
pub mod game;
pub mod generation;
pub mod grid;
pub mod matching;
pub mod resolve;

// Core module re-exports
pub use bridge::*;
pub use engine::*;
pub use game::*;
pub use generation::*;
pub use grid::*;
pub use matching::*;
pub use resolve::*;

/// Core error type for the Tilecrush engine.
#[derive(thiserror::Error, Debug)]
pub enum CrushError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration values are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Board is not a complete square grid or holds out-of-range cells
    #[error("Invalid board: {0}")]
    InvalidBoard(String),

    /// Swap or effect target cannot be applied
    #[error("Invalid move: {0}")]
    InvalidMove(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Cascade resolution did not settle within the configured depth
    #[error("Cascade did not settle within {0} steps")]
    CascadeLimitExceeded(usize),

    /// The session has no moves left
    #[error("Game is over")]
    GameOver,
}

/// Result type used throughout the Tilecrush codebase.
pub type CrushResult<T> = Result<T, CrushError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration defaults.
pub mod config {
    /// Default board edge length in cells
    pub const GRID_SIZE: usize = 8;

    /// Minimum run length that counts as a match
    pub const MIN_MATCH_COUNT: usize = 3;

    /// Highest tier a cell can reach
    pub const TILE_MAX_TIER: u8 = 3;

    /// Number of tile kinds drawn by the generator
    pub const TILE_KINDS: u8 = 6;

    /// Move budget for casual sessions
    pub const CASUAL_MOVE_BUDGET: u32 = 30;

    /// Move budget for challenge sessions
    pub const CHALLENGE_MOVE_BUDGET: u32 = 20;

    /// Item charges per kind at the start of a casual session
    pub const CASUAL_ITEM_CHARGES: u32 = 3;

    /// Item charges per kind at the start of a challenge session
    pub const CHALLENGE_ITEM_CHARGES: u32 = 1;

    /// Upper bound on cascade steps resolved for a single action
    pub const MAX_CASCADE_DEPTH: usize = 64;

    /// Attempts the generator makes before giving up on a playable board
    pub const MAX_GENERATION_ATTEMPTS: u32 = 100;

    /// Base score for each cleared cell
    pub const POINTS_PER_CELL: u64 = 10;

    /// Row/column offsets of the 8 surrounding cells, clockwise from north-west.
    pub const DIRECTION_OFFSETS: [(i32, i32); 8] = [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
    ];
}
