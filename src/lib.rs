//! # chowka-bhara
//!
//! Rules engine for Chowka Bhara, the cross-and-circle race game played on a
//! 7x7 board by two to four players with six pieces each.
//!
//! ## Design Principles
//!
//! 1. **One path, rotated per seat**: every player races the same 49-cell
//!    spiral from their edge to the central fruit. A cell's number on a
//!    player's path comes from a fixed quarter-turn rotation of the base
//!    numbering, so no per-player tables are stored.
//!
//! 2. **Arena of pieces**: pieces live in one `Vec` owned by the board and
//!    are addressed by `PieceId`. Squares hold ids, never pieces.
//!
//! 3. **Injected randomness**: the kawade throw draws from a `DiceSource`,
//!    seeded in play and scripted in tests.
//!
//! 4. **Validate before mutating**: every `Err` leaves the board unchanged.
//!
//! ## Modules
//!
//! - `core`: players, colors, configuration, errors, events, RNG
//! - `board`: coordinates, pieces, squares, board state
//! - `dice`: the kawade throw and the pending roll
//! - `rules`: legal move generation and move execution
//! - `game`: turn control, finishing order, standings
//!
//! ## Example
//!
//! ```
//! use chowka_bhara::{Game, GameConfig, PieceId};
//!
//! let mut game = Game::new(GameConfig::with_player_count(2).with_seed(7)).unwrap();
//! game.roll().unwrap();
//!
//! let moves = game.legal_moves(PieceId(0)).unwrap();
//! if let Some(&mv) = moves.first() {
//!     game.play(PieceId(0), mv).unwrap();
//! } else {
//!     game.forfeit().ok();
//! }
//! ```

pub mod core;
pub mod board;
pub mod dice;
pub mod rules;
pub mod game;

// Re-export commonly used types
pub use crate::core::{
    Color, ConfigError, EventLog, EventRecord, GameConfig, GameEvent, GameRng, GameRngState,
    PlayerId, PlayerMap, RulesError, Stage,
};

pub use crate::board::{Alias, Board, Cell, Move, PathMap, Piece, PieceId, PieceKind, Square};

pub use crate::dice::{DiceSource, Roll, ScriptedDice, ShellDice};

pub use crate::rules::MoveOutcome;

pub use crate::game::{Game, Standings};
