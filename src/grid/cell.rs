//! # Cells
//!
//! The atomic board unit and its match key.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a cell, stable for the cell's whole lifetime.
pub type CellId = Uuid;

/// Creates a new unique cell ID.
pub fn new_cell_id() -> CellId {
    Uuid::new_v4()
}

/// Colour/symbol class of a tile.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TileKind {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
}

impl TileKind {
    /// All kinds in draw order.
    pub const ALL: [TileKind; 6] = [
        TileKind::Red,
        TileKind::Orange,
        TileKind::Yellow,
        TileKind::Green,
        TileKind::Blue,
        TileKind::Purple,
    ];

    /// The first `count` kinds, clamped to the available variants.
    pub fn palette(count: u8) -> &'static [TileKind] {
        let count = (count as usize).min(Self::ALL.len());
        &Self::ALL[..count]
    }

    /// Single-character glyph used by the text renderer.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Red => 'R',
            TileKind::Orange => 'O',
            TileKind::Yellow => 'Y',
            TileKind::Green => 'G',
            TileKind::Blue => 'B',
            TileKind::Purple => 'P',
        }
    }

    /// Parses a glyph produced by [`TileKind::glyph`].
    pub fn from_glyph(glyph: char) -> Option<TileKind> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.glyph() == glyph.to_ascii_uppercase())
    }
}

/// A single board cell.
///
/// Two cells match when their `(kind, tier)` pairs are equal. `is_matched`,
/// `created_index` and `turn` are transient or provenance data and never take
/// part in matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// Identity, never reused while the cell is alive
    pub id: CellId,
    /// Colour/symbol class
    pub kind: TileKind,
    /// Power level, 1-based
    pub tier: u8,
    /// Marked for removal by the detector or an effect
    #[serde(default)]
    pub is_matched: bool,
    /// Fill pass that created this cell
    #[serde(default)]
    pub created_index: u32,
    /// Game turn that created this cell
    #[serde(default)]
    pub turn: u32,
}

impl Cell {
    /// Creates a fresh, unmatched cell with a new identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush::{Cell, TileKind};
    ///
    /// let cell = Cell::new(TileKind::Blue, 1);
    /// assert_eq!(cell.kind, TileKind::Blue);
    /// assert!(!cell.is_matched);
    /// ```
    pub fn new(kind: TileKind, tier: u8) -> Self {
        Self {
            id: new_cell_id(),
            kind,
            tier,
            is_matched: false,
            created_index: 0,
            turn: 0,
        }
    }

    /// Sets provenance metadata.
    pub fn with_provenance(mut self, created_index: u32, turn: u32) -> Self {
        self.created_index = created_index;
        self.turn = turn;
        self
    }

    /// The `(kind, tier)` pair that decides whether two cells match.
    pub fn match_key(&self) -> (TileKind, u8) {
        (self.kind, self.tier)
    }

    /// Whether two cells carry the same match key.
    pub fn matches(&self, other: &Cell) -> bool {
        self.match_key() == other.match_key()
    }

    /// The tuple compared when diffing boards for rendering.
    pub fn render_key(&self) -> (CellId, TileKind, u8, bool) {
        (self.id, self.kind, self.tier, self.is_matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_ids_are_unique() {
        let a = Cell::new(TileKind::Red, 1);
        let b = Cell::new(TileKind::Red, 1);
        assert_ne!(a.id, b.id);
        assert!(a.matches(&b));
    }

    #[test]
    fn test_tier_is_part_of_match_key() {
        let low = Cell::new(TileKind::Green, 1);
        let high = Cell::new(TileKind::Green, 2);
        assert!(!low.matches(&high));
    }

    #[test]
    fn test_render_key_ignores_provenance() {
        let cell = Cell::new(TileKind::Yellow, 1);
        let moved = cell.clone().with_provenance(4, 9);
        assert_eq!(cell.render_key(), moved.render_key());
        assert_ne!(cell, moved);
    }

    #[test]
    fn test_palette_and_glyphs() {
        assert_eq!(TileKind::palette(3).len(), 3);
        assert_eq!(TileKind::palette(20).len(), 6);
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_glyph(kind.glyph()), Some(kind));
        }
        assert_eq!(TileKind::from_glyph('x'), None);
    }
}
