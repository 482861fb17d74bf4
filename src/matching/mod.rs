//! # Matching Module
//!
//! Run detection over a board and swap validation built on top of it.
//!
//! Both halves are pure with respect to the caller's board: detection only
//! reads, and validation simulates swaps on a scratch copy it owns.

pub mod detector;
pub mod validator;

pub use detector::*;
pub use validator::*;
