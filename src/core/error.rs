//! Error types for the rules engine and its configuration.

use crate::board::{Alias, Cell, Move, PieceId};

use super::config::Stage;
use super::player::{Color, PlayerId};

/// Conditions raised by board, legality, and turn operations.
///
/// Every condition is detected before any state is touched, so an `Err`
/// always leaves the board exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("alias {0} does not belong to any player's path")]
    InvalidAlias(Alias),

    #[error("cell ({row}, {col}) is outside the board")]
    CellOutOfRange { row: u8, col: u8 },

    #[error("{piece} is not on square {cell}")]
    PieceNotOnSquare { piece: PieceId, cell: Cell },

    #[error("no piece with id {0}")]
    UnknownPiece(PieceId),

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("move {mv} is not legal for {piece}")]
    IllegalMove { piece: PieceId, mv: Move },

    #[error("{piece} does not belong to the active player {player}")]
    NotActivePlayer { piece: PieceId, player: PlayerId },

    #[error("action requires stage {expected:?}, game is in {actual:?}")]
    WrongStage { expected: Stage, actual: Stage },

    #[error("{0} still has legal moves and cannot forfeit the roll")]
    MovesAvailable(PlayerId),

    #[error("the game is over")]
    GameOver,

    #[error("invalid setup: {0}")]
    InvalidSetup(String),
}

/// Errors raised when validating a `GameConfig`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 4, got {0}")]
    PlayerCount(usize),

    #[error("color {0} is seated more than once")]
    DuplicateColor(Color),

    #[error("max_reroll_chain must be at least 1")]
    RerollChain,
}
