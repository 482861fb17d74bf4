//! # Match Engine
//!
//! The collaborator interface the game layer programs against. A `MatchEngine`
//! bundles a validated configuration, the seeded RNG and the refill factory,
//! and exposes every engine operation as snapshot-in, snapshot-out.

use crate::generation::utils;
use crate::{
    apply_area_effect, collapse_and_refill, enumerate_legal_moves, find_hint, find_matches,
    resolve_cascades, would_match, AreaEffect, Board, BoardGenerator, CascadeOutcome,
    CellFactory, CrushError, CrushResult, EngineConfig, Generator, MatchSet, Move, Position,
};
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Engine service object: configuration plus the state random draws need.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    config: EngineConfig,
    rng: StdRng,
    generator: BoardGenerator,
    factory: CellFactory,
}

impl MatchEngine {
    /// Creates an engine from a configuration, seeding the RNG from it.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{EngineConfig, MatchEngine};
    ///
    /// let mut engine = MatchEngine::new(EngineConfig::new(12345)).unwrap();
    /// let board = engine.generate().unwrap();
    /// assert!(engine.detect_matches(&board).is_empty());
    /// assert!(!engine.enumerate_legal_moves(&board).is_empty());
    /// ```
    pub fn new(config: EngineConfig) -> CrushResult<Self> {
        config.validate()?;
        let rng = utils::create_rng(&config);
        let factory = CellFactory::new(&config);
        Ok(Self {
            config,
            rng,
            generator: BoardGenerator::new(),
            factory,
        })
    }

    /// Creates an engine that continues from an existing factory state.
    pub fn with_factory(config: EngineConfig, factory: CellFactory) -> CrushResult<Self> {
        let mut engine = Self::new(config)?;
        engine.factory = factory;
        Ok(engine)
    }

    /// Restarts the random stream from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// The configuration this engine runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current refill factory state.
    pub fn factory(&self) -> &CellFactory {
        &self.factory
    }

    /// Sets the turn stamped on refill cells.
    pub fn set_turn(&mut self, turn: u32) {
        self.factory.set_turn(turn);
    }

    /// Generates a fresh, match-free, playable board.
    pub fn generate(&mut self) -> CrushResult<Board> {
        let board = self.generator.generate(&self.config, &mut self.rng)?;
        debug!("{} produced a new board", self.generator.generator_type());
        Ok(board)
    }

    /// All positions that are part of a run.
    pub fn detect_matches(&self, board: &Board) -> MatchSet {
        find_matches(board, self.config.min_match_count)
    }

    /// Whether swapping `a` and `b` would produce a match.
    pub fn would_match(&self, board: &Board, a: Position, b: Position) -> bool {
        would_match(board, a, b, self.config.min_match_count)
    }

    /// Every legal swap on the board.
    pub fn enumerate_legal_moves(&self, board: &Board) -> Vec<Move> {
        enumerate_legal_moves(board, self.config.min_match_count)
    }

    /// First legal swap, if any.
    pub fn hint(&self, board: &Board) -> Option<Move> {
        find_hint(board, self.config.min_match_count)
    }

    /// Returns a copy of the board with `a` and `b` exchanged.
    ///
    /// The swap is applied whether or not it matches; only adjacency and
    /// bounds are checked.
    pub fn apply_swap(&self, board: &Board, a: Position, b: Position) -> CrushResult<Board> {
        if !Move::new(a, b).is_valid_on(board) {
            return Err(CrushError::InvalidMove(format!(
                "{} and {} are not adjacent cells on the board",
                a, b
            )));
        }
        let mut swapped = board.clone();
        swapped.swap(a, b);
        Ok(swapped)
    }

    /// One gravity/refill pass over the board's flagged cells.
    pub fn collapse_and_refill(&mut self, board: &Board) -> Board {
        collapse_and_refill(board, &mut self.factory, &mut self.rng)
    }

    /// Returns a copy of the board with the effect's footprint flagged.
    pub fn apply_area_effect(&self, board: &Board, effect: AreaEffect, target: Position) -> Board {
        apply_area_effect(board, effect, target)
    }

    /// Removes matches and refills until the board settles.
    pub fn resolve_cascades(&mut self, board: &Board) -> CrushResult<CascadeOutcome> {
        resolve_cascades(
            board,
            self.config.min_match_count,
            self.config.max_cascade_depth,
            &mut self.factory,
            &mut self.rng,
        )
    }
}
