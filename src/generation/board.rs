//! # Board Generation
//!
//! Builds the initial board of a session.
//!
//! Cells are placed in raster order. A new cell can only complete a run with
//! cells already placed to its left or above it, so a local backward check is
//! enough to guarantee the finished board holds no match. Boards that come out
//! deadlocked (no legal swap) are thrown away and regenerated.

use super::utils;
use crate::{
    completes_run_backward, completes_run_with, find_matches, has_legal_moves, Board, Cell,
    CrushError, CrushResult, EngineConfig, Generator, Position,
};
use log::debug;
use rand::rngs::StdRng;

/// Resample limit for a single cell before the whole board is restarted.
const MAX_CELL_RESAMPLES: u32 = 64;

/// Generator for match-free, playable starting boards.
#[derive(Debug, Clone)]
pub struct BoardGenerator {
    /// Whether to reject boards without any legal move
    pub require_legal_move: bool,
}

impl BoardGenerator {
    /// Creates a generator that only returns playable boards.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{find_matches, generation::utils, BoardGenerator, EngineConfig, Generator};
    ///
    /// let config = EngineConfig::new(12345);
    /// let mut rng = utils::create_rng(&config);
    /// let board = BoardGenerator::new().generate(&config, &mut rng).unwrap();
    /// assert_eq!(board.size(), 8);
    /// assert!(find_matches(&board, 3).is_empty());
    /// ```
    pub fn new() -> Self {
        Self {
            require_legal_move: true,
        }
    }

    /// Creates a generator that skips the deadlock check.
    pub fn without_deadlock_check() -> Self {
        Self {
            require_legal_move: false,
        }
    }

    /// Fills one board in raster order. Returns `None` if some cell could not
    /// find a kind that avoids a run within the resample limit.
    fn fill_board(&self, config: &EngineConfig, rng: &mut StdRng) -> Option<Board> {
        let size = config.grid_size;
        let mut rows: Vec<Vec<Cell>> = Vec::with_capacity(size);

        for row in 0..size {
            rows.push(Vec::with_capacity(size));
            for col in 0..size {
                let pos = Position::new(row as i32, col as i32);
                let cell = self.pick_cell(&rows, pos, config, rng)?;
                rows[row].push(cell);
            }
        }

        Some(Board::from_rows(rows))
    }

    /// Draws a tier-1 cell for `pos` that does not complete a backward run.
    fn pick_cell(
        &self,
        rows: &[Vec<Cell>],
        pos: Position,
        config: &EngineConfig,
        rng: &mut StdRng,
    ) -> Option<Cell> {
        let placed = PartialBoard { rows };
        for _ in 0..MAX_CELL_RESAMPLES {
            let cell = Cell::new(utils::random_kind(config, rng), 1);
            if !placed.completes_run(pos, &cell, config.min_match_count) {
                return Some(cell);
            }
        }
        None
    }
}

impl Default for BoardGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Read view over the rows placed so far, which may be ragged.
struct PartialBoard<'a> {
    rows: &'a [Vec<Cell>],
}

impl PartialBoard<'_> {
    fn get(&self, pos: Position) -> Option<&Cell> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        self.rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
    }

    fn completes_run(&self, pos: Position, cell: &Cell, min_match: usize) -> bool {
        completes_run_with(|p| self.get(p), pos, cell, min_match)
    }
}

impl Generator<Board> for BoardGenerator {
    fn generate(&self, config: &EngineConfig, rng: &mut StdRng) -> CrushResult<Board> {
        config.validate()?;

        for attempt in 1..=config.max_generation_attempts {
            let board = match self.fill_board(config, rng) {
                Some(board) => board,
                None => {
                    debug!("attempt {}: cell resample limit reached", attempt);
                    continue;
                }
            };

            if self.require_legal_move && !has_legal_moves(&board, config.min_match_count) {
                debug!("attempt {}: board is deadlocked, regenerating", attempt);
                continue;
            }

            debug!(
                "generated {}x{} board after {} attempt(s)",
                config.grid_size, config.grid_size, attempt
            );
            return Ok(board);
        }

        Err(CrushError::GenerationFailed(format!(
            "no playable board after {} attempts",
            config.max_generation_attempts
        )))
    }

    fn validate(&self, board: &Board, config: &EngineConfig) -> CrushResult<()> {
        board.validate()?;
        if board.size() != config.grid_size {
            return Err(CrushError::GenerationFailed(format!(
                "board size {} does not match configured {}",
                board.size(),
                config.grid_size
            )));
        }
        if let Some((pos, cell)) = board
            .cells()
            .find(|(_, cell)| cell.tier == 0 || cell.tier > config.max_tier)
        {
            return Err(CrushError::GenerationFailed(format!(
                "cell at {} has tier {} outside 1..={}",
                pos, cell.tier, config.max_tier
            )));
        }
        let matches = find_matches(board, config.min_match_count);
        if !matches.is_empty() {
            return Err(CrushError::GenerationFailed(format!(
                "board starts with {} matched cells",
                matches.len()
            )));
        }
        if self.require_legal_move && !has_legal_moves(board, config.min_match_count) {
            return Err(CrushError::GenerationFailed(
                "board has no legal move".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "BoardGenerator"
    }
}

/// Whether a finished board would have been accepted cell by cell.
///
/// Re-runs the raster-order check against the complete board; useful for
/// asserting that hand-built boards follow the same rule.
pub fn satisfies_raster_rule(board: &Board, min_match: usize) -> bool {
    board
        .cells()
        .all(|(pos, cell)| !completes_run_backward(board, pos, cell, min_match))
}
