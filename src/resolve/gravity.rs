//! # Gravity and Refill
//!
//! Removes matched cells, lets the survivors fall, and tops each column up
//! with fresh cells. [`resolve_cascades`] repeats detect → remove → refill
//! until the board settles.

use crate::{
    find_runs, Board, Cell, CellFactory, CrushError, CrushResult, MatchRun, Position, TileKind,
};
use log::debug;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Removes every `is_matched` cell, compacts each column downward and refills
/// the vacated top slots.
///
/// Survivors keep their relative order. The returned board has no cell
/// flagged as matched; any run the refill happens to form is left for the
/// next detection pass.
pub fn collapse_and_refill(
    board: &Board,
    factory: &mut CellFactory,
    rng: &mut StdRng,
) -> Board {
    let size = board.size();
    let mut rows: Vec<Vec<Cell>> = board.rows().to_vec();
    factory.begin_pass();

    for col in 0..size {
        let survivors: Vec<Cell> = board
            .rows()
            .iter()
            .map(|row| &row[col])
            .filter(|cell| !cell.is_matched)
            .cloned()
            .collect();
        let vacancies = size - survivors.len();

        for (row, cell) in survivors.into_iter().enumerate() {
            rows[vacancies + row][col] = cell;
        }
        for row in rows.iter_mut().take(vacancies) {
            row[col] = factory.spawn(rng);
        }
    }

    Board::from_rows(rows)
}

/// Copy of `board` with every given position flagged as matched.
///
/// Positions off the board are ignored.
pub fn mark_matches<'a>(
    board: &Board,
    positions: impl IntoIterator<Item = &'a Position>,
) -> Board {
    let mut marked = board.clone();
    for pos in positions {
        marked.mark_matched(*pos);
    }
    marked
}

/// A cell removed during one cascade step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearedCell {
    pub position: Position,
    pub kind: TileKind,
    pub tier: u8,
}

/// One detect → remove → refill round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    /// 1-based cascade depth within the action
    pub depth: usize,
    /// Runs found by the detector in this round
    pub runs: Vec<MatchRun>,
    /// Every cell removed, including cells flagged by effects
    pub cleared: Vec<ClearedCell>,
}

/// Result of resolving an action down to a settled board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    /// Settled board with no matches left
    pub board: Board,
    /// Rounds in order; empty if nothing was removed
    pub steps: Vec<CascadeStep>,
}

impl CascadeOutcome {
    /// Number of rounds the action produced.
    pub fn combo(&self) -> usize {
        self.steps.len()
    }

    /// Cells removed across all rounds.
    pub fn total_cleared(&self) -> usize {
        self.steps.iter().map(|step| step.cleared.len()).sum()
    }
}

/// Resolves a board until detection finds nothing.
///
/// Cells already flagged (by an area effect) are removed in the first round
/// together with any runs the detector finds. Fails with
/// [`CrushError::CascadeLimitExceeded`] rather than loop past `max_depth`.
pub fn resolve_cascades(
    board: &Board,
    min_match: usize,
    max_depth: usize,
    factory: &mut CellFactory,
    rng: &mut StdRng,
) -> CrushResult<CascadeOutcome> {
    let mut working = board.clone();
    let mut steps = Vec::new();

    loop {
        let runs = find_runs(&working, min_match);
        let cleared_positions: BTreeSet<Position> = runs
            .iter()
            .flat_map(|run| run.positions())
            .chain(working.matched_positions())
            .collect();

        if cleared_positions.is_empty() {
            break;
        }
        if steps.len() >= max_depth {
            return Err(CrushError::CascadeLimitExceeded(max_depth));
        }

        let marked = mark_matches(&working, &cleared_positions);
        let cleared = cleared_positions
            .iter()
            .filter_map(|pos| {
                marked.get(*pos).map(|cell| ClearedCell {
                    position: *pos,
                    kind: cell.kind,
                    tier: cell.tier,
                })
            })
            .collect::<Vec<_>>();

        debug!(
            "cascade step {}: {} run(s), {} cell(s) cleared",
            steps.len() + 1,
            runs.len(),
            cleared.len()
        );

        working = collapse_and_refill(&marked, factory, rng);
        steps.push(CascadeStep {
            depth: steps.len() + 1,
            runs,
            cleared,
        });
    }

    Ok(CascadeOutcome {
        board: working,
        steps,
    })
}
