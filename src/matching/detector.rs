//! # Match Detection
//!
//! Finds maximal runs of equal `(kind, tier)` cells along rows and columns.
//!
//! Each axis is one linear pass. A run is broken by a change of match key or
//! by a cell already flagged `is_matched`, so cells resolved earlier in a
//! cascade never chain into new runs. Runs of at least the minimum length are
//! emitted whole; the union of both axes is the match set.

use crate::{Board, Cell, Position};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered, duplicate-free set of matched positions (row-major order).
pub type MatchSet = BTreeSet<Position>;

/// Axis a run lies along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A maximal run of matching cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRun {
    /// Direction of the run
    pub axis: Axis,
    /// First cell (leftmost or topmost)
    pub start: Position,
    /// Number of cells in the run
    pub length: usize,
}

impl MatchRun {
    /// Every position covered by the run.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let (d_row, d_col) = match self.axis {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
        };
        (0..self.length as i32).map(move |i| self.start.offset((d_row * i, d_col * i)))
    }
}

/// Finds all positions that belong to a run of at least `min_match` cells.
///
/// # Examples
///
/// ```
/// use tilecrush::{find_matches, Board, Position};
///
/// let board = Board::from_pattern(&["RRRG", "GBYB", "BYGY", "YGBG"]).unwrap();
/// let matches = find_matches(&board, 3);
/// assert_eq!(matches.len(), 3);
/// assert!(!matches.contains(&Position::new(0, 3)));
/// ```
pub fn find_matches(board: &Board, min_match: usize) -> MatchSet {
    find_runs(board, min_match)
        .iter()
        .flat_map(|run| run.positions())
        .collect()
}

/// Whether the board has at least one run of `min_match` cells.
pub fn has_matches(board: &Board, min_match: usize) -> bool {
    !find_runs(board, min_match).is_empty()
}

/// Finds every maximal run of at least `min_match` cells.
///
/// Horizontal runs come first (rows top to bottom), then vertical runs
/// (columns left to right). A cell can appear in one run of each axis.
pub fn find_runs(board: &Board, min_match: usize) -> Vec<MatchRun> {
    let size = board.size() as i32;
    let mut runs = Vec::new();

    for row in 0..size {
        scan_line(
            board,
            (0..size).map(|col| Position::new(row, col)),
            Axis::Horizontal,
            min_match,
            &mut runs,
        );
    }
    for col in 0..size {
        scan_line(
            board,
            (0..size).map(|row| Position::new(row, col)),
            Axis::Vertical,
            min_match,
            &mut runs,
        );
    }

    runs
}

/// Scans one row or column, pushing every run that closes long enough.
fn scan_line(
    board: &Board,
    line: impl Iterator<Item = Position>,
    axis: Axis,
    min_match: usize,
    runs: &mut Vec<MatchRun>,
) {
    let mut current: Option<(Position, &Cell)> = None;
    let mut length = 0usize;

    for pos in line {
        let cell = match board.get(pos) {
            Some(cell) if !cell.is_matched => cell,
            _ => {
                close_run(current.take(), length, axis, min_match, runs);
                length = 0;
                continue;
            }
        };

        match current {
            Some((_, head)) if head.matches(cell) => length += 1,
            _ => {
                close_run(current.take(), length, axis, min_match, runs);
                current = Some((pos, cell));
                length = 1;
            }
        }
    }

    close_run(current, length, axis, min_match, runs);
}

fn close_run(
    run: Option<(Position, &Cell)>,
    length: usize,
    axis: Axis,
    min_match: usize,
    runs: &mut Vec<MatchRun>,
) {
    if let Some((start, _)) = run {
        if length >= min_match {
            runs.push(MatchRun {
                axis,
                start,
                length,
            });
        }
    }
}

/// Whether the cell at `pos` would complete a run with the cells already
/// placed before it in raster order (to its left and above it).
///
/// Used by generation, which fills row-major and so never needs to look right
/// or below.
pub fn completes_run_backward(
    board: &Board,
    pos: Position,
    cell: &Cell,
    min_match: usize,
) -> bool {
    completes_run_with(|p| board.get(p), pos, cell, min_match)
}

/// [`completes_run_backward`] over any cell lookup, so partially filled
/// grids can be checked before they form a complete `Board`.
pub fn completes_run_with<'a>(
    lookup: impl Fn(Position) -> Option<&'a Cell>,
    pos: Position,
    cell: &Cell,
    min_match: usize,
) -> bool {
    let needed = min_match.saturating_sub(1) as i32;
    if needed == 0 {
        return true;
    }
    let trailing = |d_row: i32, d_col: i32| {
        (1..=needed).all(|step| {
            lookup(pos.offset((d_row * step, d_col * step)))
                .map(|other| other.matches(cell))
                .unwrap_or(false)
        })
    };
    trailing(0, -1) || trailing(-1, 0)
}
