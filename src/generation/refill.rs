//! # Refill Cells
//!
//! Mints the cells that drop in from the top after a collapse.

use crate::{Cell, EngineConfig, TileKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Source of fresh cells for refills.
///
/// Refill cells are tier 1 with a random kind and carry no match-avoidance
/// constraint; any run they form is resolved as the next cascade step. Each
/// fill pass gets its own `created_index` so a renderer can stagger the drops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFactory {
    /// Number of kinds drawn from
    pub tile_kinds: u8,
    /// Index of the current fill pass
    pub pass: u32,
    /// Game turn stamped on new cells
    pub turn: u32,
}

impl CellFactory {
    /// Creates a factory drawing from the configured palette.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            tile_kinds: config.tile_kinds,
            pass: 0,
            turn: 0,
        }
    }

    /// Starts a new fill pass and returns its index.
    pub fn begin_pass(&mut self) -> u32 {
        self.pass += 1;
        self.pass
    }

    /// Sets the turn stamped on subsequent cells.
    pub fn set_turn(&mut self, turn: u32) {
        self.turn = turn;
    }

    /// Creates one fresh tier-1 cell for the current pass.
    pub fn spawn(&self, rng: &mut StdRng) -> Cell {
        let kind = TileKind::palette(self.tile_kinds)
            .choose(rng)
            .copied()
            .unwrap_or(TileKind::Red);
        Cell::new(kind, 1).with_provenance(self.pass, self.turn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils;

    #[test]
    fn test_spawned_cells_carry_provenance() {
        let config = EngineConfig::for_testing(3);
        let mut rng = utils::create_rng(&config);
        let mut factory = CellFactory::new(&config);
        factory.set_turn(5);
        assert_eq!(factory.begin_pass(), 1);
        assert_eq!(factory.begin_pass(), 2);

        let cell = factory.spawn(&mut rng);
        assert_eq!(cell.tier, 1);
        assert_eq!(cell.created_index, 2);
        assert_eq!(cell.turn, 5);
        assert!(!cell.is_matched);
        assert!(TileKind::palette(config.tile_kinds).contains(&cell.kind));
    }

    #[test]
    fn test_spawned_ids_are_fresh() {
        let config = EngineConfig::default();
        let mut rng = utils::create_rng(&config);
        let factory = CellFactory::new(&config);
        let a = factory.spawn(&mut rng);
        let b = factory.spawn(&mut rng);
        assert_ne!(a.id, b.id);
    }
}
