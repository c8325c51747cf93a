//! Movement rules over the board.
//!
//! - `movegen`: which moves a piece may make with the current roll
//! - `executor`: carrying a move out, including ties and captures
//!
//! Both extend `Board` directly. The turn structure around them lives in
//! the `game` module.

pub mod movegen;
pub mod executor;

pub use executor::MoveOutcome;
