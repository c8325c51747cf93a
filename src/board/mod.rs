//! Board topology, pieces, squares, and board state.
//!
//! - `coord`: cells, aliases, and the per-player path mapping
//! - `piece`: single and tied pieces, addressed by `PieceId`
//! - `square`: cells holding pieces, with occupancy queries
//! - `moves`: move values
//! - `state`: the `Board` tying them together

pub mod coord;
pub mod piece;
pub mod square;
pub mod moves;
pub mod state;

pub use coord::{
    Alias, Cell, PathMap, BASE_GRID, BASE_PATH, COLS, PLACES_BEFORE_INNER, PLACES_TO_FRUIT,
    PLAYER_OFFSET, ROWS, SAFE_HOUSES, SQUARES,
};
pub use piece::{Piece, PieceId, PieceKind, PIECES_PER_PLAYER};
pub use square::Square;
pub use moves::Move;
pub use state::Board;
