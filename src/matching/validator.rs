//! # Move Validation
//!
//! Decides whether a swap produces a match, and enumerates every swap that
//! does. Both use the same simulate-swap / detect / revert probe, run on a
//! scratch copy owned by this module so the caller's board never changes.

use super::detector::has_matches;
use crate::{Board, Direction, Position};
use serde::{Deserialize, Serialize};

/// A candidate swap between two cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Whether both ends are on the board and share an edge.
    pub fn is_valid_on(&self, board: &Board) -> bool {
        board.in_bounds(self.from)
            && board.in_bounds(self.to)
            && self.from.is_orthogonally_adjacent(self.to)
    }
}

/// Whether swapping `from` and `to` would leave at least one match.
///
/// Non-adjacent or out-of-bounds pairs are simply not legal and return
/// `false`. The board passed in is left untouched.
///
/// # Examples
///
/// ```
/// use tilecrush::{would_match, Board, Position};
///
/// let board = Board::from_pattern(&["RRGR", "GBYB", "BYGY", "YGBG"]).unwrap();
/// assert!(would_match(&board, Position::new(0, 2), Position::new(0, 3), 3));
/// assert!(!would_match(&board, Position::new(1, 0), Position::new(1, 1), 3));
/// ```
pub fn would_match(board: &Board, from: Position, to: Position, min_match: usize) -> bool {
    let candidate = Move::new(from, to);
    if !candidate.is_valid_on(board) {
        return false;
    }
    let mut scratch = board.clone();
    probe_swap(&mut scratch, candidate, min_match)
}

/// Every swap on the board that would produce a match, in row-major order.
///
/// Each unordered pair is probed once: every cell is paired with its east and
/// south neighbours only.
pub fn enumerate_legal_moves(board: &Board, min_match: usize) -> Vec<Move> {
    let mut scratch = board.clone();
    candidate_moves(board)
        .filter(|candidate| probe_swap(&mut scratch, *candidate, min_match))
        .collect()
}

/// First legal move in enumeration order, if any.
pub fn find_hint(board: &Board, min_match: usize) -> Option<Move> {
    let mut scratch = board.clone();
    candidate_moves(board).find(|candidate| probe_swap(&mut scratch, *candidate, min_match))
}

/// Whether any legal move exists; `false` means the board is deadlocked.
pub fn has_legal_moves(board: &Board, min_match: usize) -> bool {
    find_hint(board, min_match).is_some()
}

/// All in-bounds east/south neighbour pairs, row-major.
fn candidate_moves(board: &Board) -> impl Iterator<Item = Move> + '_ {
    board.positions().flat_map(move |from| {
        [Direction::East, Direction::South]
            .into_iter()
            .map(move |direction| Move::new(from, from.offset(direction.to_delta())))
            .filter(|candidate| board.in_bounds(candidate.to))
    })
}

/// Swaps, detects and swaps back on a board this module owns.
fn probe_swap(scratch: &mut Board, candidate: Move, min_match: usize) -> bool {
    if !scratch.swap(candidate.from, candidate.to) {
        return false;
    }
    let matched = has_matches(scratch, min_match);
    scratch.swap(candidate.from, candidate.to);
    matched
}
