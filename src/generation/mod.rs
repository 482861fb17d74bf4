//! # Generation Module
//!
//! Engine configuration, initial board generation and the cell factory used
//! by refills.
//!
//! Every random choice in the engine draws from a `StdRng` seeded from
//! [`EngineConfig::seed`], so a seed fully determines a session's boards.

pub mod board;
pub mod refill;

pub use board::*;
pub use refill::*;

use crate::config;
use crate::{CrushError, CrushResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunable engine parameters.
///
/// Missing fields in a serialized config fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Random seed for reproducible boards
    pub seed: u64,
    /// Board edge length
    pub grid_size: usize,
    /// Minimum run length that counts as a match
    pub min_match_count: usize,
    /// How many tile kinds the generator draws from (3 to 6)
    pub tile_kinds: u8,
    /// Highest tier a cell can hold
    pub max_tier: u8,
    /// Cascade steps allowed for one action before giving up
    pub max_cascade_depth: usize,
    /// Boards the generator may throw away before failing
    pub max_generation_attempts: u32,
    /// Move budget for casual sessions
    pub casual_moves: u32,
    /// Move budget for challenge sessions
    pub challenge_moves: u32,
    /// Base score per cleared cell
    pub points_per_cell: u64,
}

impl EngineConfig {
    /// Creates the reference configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::EngineConfig;
    ///
    /// let config = EngineConfig::new(7);
    /// assert_eq!(config.grid_size, 8);
    /// assert_eq!(config.min_match_count, 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            grid_size: config::GRID_SIZE,
            min_match_count: config::MIN_MATCH_COUNT,
            tile_kinds: config::TILE_KINDS,
            max_tier: config::TILE_MAX_TIER,
            max_cascade_depth: config::MAX_CASCADE_DEPTH,
            max_generation_attempts: config::MAX_GENERATION_ATTEMPTS,
            casual_moves: config::CASUAL_MOVE_BUDGET,
            challenge_moves: config::CHALLENGE_MOVE_BUDGET,
            points_per_cell: config::POINTS_PER_CELL,
        }
    }

    /// Creates a configuration for testing: a small board with few kinds, so
    /// matches and cascades happen often.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            grid_size: 6,
            tile_kinds: 4,
            casual_moves: 10,
            challenge_moves: 5,
            ..Self::new(seed)
        }
    }

    /// Checks that every value is in a range the engine can work with.
    pub fn validate(&self) -> CrushResult<()> {
        if self.min_match_count < 3 {
            return Err(CrushError::InvalidConfig(format!(
                "min_match_count must be at least 3, got {}",
                self.min_match_count
            )));
        }
        if self.grid_size < self.min_match_count {
            return Err(CrushError::InvalidConfig(format!(
                "grid_size {} is smaller than min_match_count {}",
                self.grid_size, self.min_match_count
            )));
        }
        if !(3..=crate::TileKind::ALL.len() as u8).contains(&self.tile_kinds) {
            return Err(CrushError::InvalidConfig(format!(
                "tile_kinds must be between 3 and {}, got {}",
                crate::TileKind::ALL.len(),
                self.tile_kinds
            )));
        }
        if !(1..=9).contains(&self.max_tier) {
            return Err(CrushError::InvalidConfig(format!(
                "max_tier must be between 1 and 9, got {}",
                self.max_tier
            )));
        }
        if self.max_cascade_depth == 0 || self.max_generation_attempts == 0 {
            return Err(CrushError::InvalidConfig(
                "cascade depth and generation attempts must be positive".to_string(),
            ));
        }
        if self.casual_moves == 0 || self.challenge_moves == 0 {
            return Err(CrushError::InvalidConfig(
                "move budgets must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json(json: &str) -> CrushResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    pub fn load_from_path(path: impl AsRef<Path>) -> CrushResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> CrushResult<String> {
        serde_json::to_string_pretty(self).map_err(CrushError::from)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// Generators take the configuration and a caller-owned RNG, so the same seed
/// always produces the same content.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &EngineConfig, rng: &mut StdRng) -> CrushResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &EngineConfig) -> CrushResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation.
pub mod utils {
    use super::*;
    use crate::TileKind;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &EngineConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }

    /// Draws a random kind from the configured palette.
    pub fn random_kind(config: &EngineConfig, rng: &mut StdRng) -> TileKind {
        TileKind::palette(config.tile_kinds)
            .choose(rng)
            .copied()
            .unwrap_or(TileKind::Red)
    }
}
