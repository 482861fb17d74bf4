//! # Area Effects
//!
//! Direct removals used by items. Effects flag cells as matched without going
//! through run detection; gravity removes them like any other match.

use crate::config::DIRECTION_OFFSETS;
use crate::{Board, Position};
use serde::{Deserialize, Serialize};

/// Shape of an area effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaEffect {
    /// Only the target cell
    Single,
    /// The target's whole row
    Row,
    /// The target's whole column
    Column,
    /// The target and its 8 surrounding cells
    Radius,
}

impl AreaEffect {
    /// Positions the effect covers around `target`, clipped to the board.
    ///
    /// An off-board target covers nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{AreaEffect, Board, Position};
    ///
    /// let board = Board::from_pattern(&["RGB", "GBR", "BRG"]).unwrap();
    /// let corner = AreaEffect::Radius.footprint(&board, Position::new(0, 0));
    /// assert_eq!(corner.len(), 4);
    /// ```
    pub fn footprint(self, board: &Board, target: Position) -> Vec<Position> {
        if !board.in_bounds(target) {
            return Vec::new();
        }
        let size = board.size() as i32;
        let mut positions = match self {
            AreaEffect::Single => vec![target],
            AreaEffect::Row => (0..size).map(|col| Position::new(target.row, col)).collect(),
            AreaEffect::Column => (0..size).map(|row| Position::new(row, target.col)).collect(),
            AreaEffect::Radius => std::iter::once(target)
                .chain(DIRECTION_OFFSETS.iter().map(|offset| target.offset(*offset)))
                .filter(|pos| board.in_bounds(*pos))
                .collect(),
        };
        positions.sort();
        positions
    }
}

/// Copy of `board` with the effect's footprint flagged as matched.
pub fn apply_area_effect(board: &Board, effect: AreaEffect, target: Position) -> Board {
    let mut marked = board.clone();
    for pos in effect.footprint(board, target) {
        marked.mark_matched(pos);
    }
    marked
}
