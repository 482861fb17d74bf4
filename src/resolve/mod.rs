//! # Resolve Module
//!
//! Everything that removes cells from a board: gravity with refill, cascade
//! resolution, and the area effects used by items.

pub mod effects;
pub mod gravity;

pub use effects::*;
pub use gravity::*;
