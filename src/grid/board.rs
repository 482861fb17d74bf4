//! # Board
//!
//! The square, row-major grid of cells the whole engine operates on.
//!
//! A board is always complete: every position holds a cell. Engine operations
//! clone the board they are given and return the clone, so a board handed to
//! the engine is never mutated behind its owner's back.

use super::{Cell, Position, TileKind};
use crate::{config, CrushError, CrushResult, EngineConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete `size × size` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: Vec<Vec<Cell>>,
}

/// Unvalidated wire shape of a board.
#[derive(Deserialize)]
struct RawBoard {
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = CrushError;

    fn try_from(raw: RawBoard) -> CrushResult<Self> {
        Board::try_from_rows(raw.rows)
    }
}

impl Board {
    /// Builds a board from complete rows.
    ///
    /// # Panics
    ///
    /// Panics if [`Board::validate`] rejects the rows. A malformed board is a
    /// caller bug; use [`Board::try_from_rows`] for untrusted input.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        match Self::try_from_rows(rows) {
            Ok(board) => board,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a board from rows, rejecting anything [`Board::validate`] does.
    pub fn try_from_rows(rows: Vec<Vec<Cell>>) -> CrushResult<Self> {
        let board = Self { rows };
        board.validate()?;
        Ok(board)
    }

    /// Builds a board from glyph rows, e.g. `["RGB", "GBR", "BRG"]`.
    ///
    /// Rows may also be written as whitespace-separated tokens where a digit
    /// after the glyph sets the tier: `"R R2 G"`. Every cell gets a fresh id.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{Board, Position, TileKind};
    ///
    /// let board = Board::from_pattern(&["RGB", "GBR", "BRG"]).unwrap();
    /// assert_eq!(board.size(), 3);
    /// assert_eq!(board.get(Position::new(1, 0)).unwrap().kind, TileKind::Green);
    /// ```
    pub fn from_pattern(pattern: &[&str]) -> CrushResult<Self> {
        let rows = pattern
            .iter()
            .map(|line| parse_pattern_row(line))
            .collect::<CrushResult<Vec<_>>>()?;
        Self::try_from_rows(rows)
    }

    /// Checks that the board is a square of at least [`MIN_MATCH_COUNT`] cells
    /// a side and that every cell has a tier of at least 1.
    ///
    /// [`MIN_MATCH_COUNT`]: crate::config::MIN_MATCH_COUNT
    pub fn validate(&self) -> CrushResult<()> {
        let size = self.rows.len();
        if size < config::MIN_MATCH_COUNT {
            return Err(CrushError::InvalidBoard(format!(
                "board has {} rows, need at least {}",
                size,
                config::MIN_MATCH_COUNT
            )));
        }
        if let Some((index, row)) = self.rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(CrushError::InvalidBoard(format!(
                "row {} has {} cells, expected {}",
                index,
                row.len(),
                size
            )));
        }
        if let Some((pos, _)) = self.cells().find(|(_, cell)| cell.tier == 0) {
            return Err(CrushError::InvalidBoard(format!("cell at {} has tier 0", pos)));
        }
        Ok(())
    }

    /// Checks the board against an engine configuration: its size must equal
    /// `grid_size` and every tier must lie in `1..=max_tier`.
    pub fn validate_for(&self, engine_config: &EngineConfig) -> CrushResult<()> {
        self.validate()?;
        if self.size() != engine_config.grid_size {
            return Err(CrushError::InvalidBoard(format!(
                "board size {} does not match configured {}",
                self.size(),
                engine_config.grid_size
            )));
        }
        if let Some((pos, cell)) = self
            .cells()
            .find(|(_, cell)| cell.tier > engine_config.max_tier)
        {
            return Err(CrushError::InvalidBoard(format!(
                "cell at {} has tier {}, max is {}",
                pos, cell.tier, engine_config.max_tier
            )));
        }
        Ok(())
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.rows.len()
    }

    /// Whether a position lies on the board.
    pub fn in_bounds(&self, pos: Position) -> bool {
        let size = self.size() as i32;
        pos.row >= 0 && pos.col >= 0 && pos.row < size && pos.col < size
    }

    /// Gets the cell at a position, or `None` off the board.
    pub fn get(&self, pos: Position) -> Option<&Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
    }

    /// Gets the cell at a position mutably, or `None` off the board.
    pub fn get_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.rows
            .get_mut(pos.row as usize)
            .and_then(|row| row.get_mut(pos.col as usize))
    }

    /// Replaces the cell at a position. Returns false off the board.
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match self.get_mut(pos) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Exchanges two cells in place. Returns false if either is off the board.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        if !self.in_bounds(a) || !self.in_bounds(b) {
            return false;
        }
        if a == b {
            return true;
        }
        let (ar, ac, br, bc) = (a.row as usize, a.col as usize, b.row as usize, b.col as usize);
        if ar == br {
            self.rows[ar].swap(ac, bc);
        } else {
            let (low, high) = if ar < br { (ar, br) } else { (br, ar) };
            let (top, bottom) = self.rows.split_at_mut(high);
            let (low_col, high_col) = if ar < br { (ac, bc) } else { (bc, ac) };
            std::mem::swap(&mut top[low][low_col], &mut bottom[0][high_col]);
        }
        true
    }

    /// Rows, top to bottom.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size() as i32;
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// All cells with their positions, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, cell)| (Position::new(r as i32, c as i32), cell))
        })
    }

    /// Flags the cell at a position as matched. Returns false off the board.
    pub fn mark_matched(&mut self, pos: Position) -> bool {
        match self.get_mut(pos) {
            Some(cell) => {
                cell.is_matched = true;
                true
            }
            None => false,
        }
    }

    /// Positions of every cell currently flagged as matched.
    pub fn matched_positions(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, cell)| cell.is_matched)
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Number of cells flagged as matched.
    pub fn matched_count(&self) -> usize {
        self.cells().filter(|(_, cell)| cell.is_matched).count()
    }

    /// Clears every `is_matched` flag.
    pub fn clear_matched(&mut self) {
        for cell in self.rows.iter_mut().flatten() {
            cell.is_matched = false;
        }
    }

    /// Render equality: same shape and the same `render_key` everywhere.
    pub fn render_eq(&self, other: &Board) -> bool {
        self.size() == other.size()
            && self
                .cells()
                .zip(other.cells())
                .all(|((_, a), (_, b))| a.render_key() == b.render_key())
    }

    /// Positions whose `render_key` differs between the two boards.
    ///
    /// Boards of different sizes differ everywhere on `self`.
    pub fn changed_positions(&self, other: &Board) -> Vec<Position> {
        self.cells()
            .filter(|(pos, cell)| {
                other
                    .get(*pos)
                    .map(|theirs| theirs.render_key() != cell.render_key())
                    .unwrap_or(true)
            })
            .map(|(pos, _)| pos)
            .collect()
    }
}

fn parse_pattern_row(line: &str) -> CrushResult<Vec<Cell>> {
    let tokens: Vec<String> = if line.contains(char::is_whitespace) {
        line.split_whitespace().map(str::to_string).collect()
    } else {
        line.chars().map(String::from).collect()
    };

    tokens
        .iter()
        .map(|token| {
            let mut chars = token.chars();
            let glyph = chars.next().ok_or_else(|| {
                CrushError::InvalidBoard("empty token in pattern".to_string())
            })?;
            let kind = TileKind::from_glyph(glyph).ok_or_else(|| {
                CrushError::InvalidBoard(format!("unknown tile glyph '{}'", glyph))
            })?;
            let tier_text: String = chars.collect();
            let tier = if tier_text.is_empty() {
                1
            } else {
                tier_text.parse::<u8>().map_err(|_| {
                    CrushError::InvalidBoard(format!("bad tier in token '{}'", token))
                })?
            };
            Ok(Cell::new(kind, tier))
        })
        .collect()
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line = row
                .iter()
                .map(|cell| {
                    let marker = if cell.is_matched { '*' } else { ' ' };
                    format!("{}{}{}", cell.kind.glyph(), cell.tier, marker)
                })
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
