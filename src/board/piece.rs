//! Racing pieces: single tokens and tied pairs.
//!
//! Pieces live in an arena owned by the board and are addressed by
//! `PieceId`. A tied piece is a new arena entry that owns the ids of its two
//! single components; while the tie exists the components are inactive.

use serde::{Deserialize, Serialize};

use super::coord::{Alias, PLACES_BEFORE_INNER, PLACES_TO_FRUIT};
use super::moves::Move;
use crate::core::PlayerId;

/// Pieces each player starts with.
pub const PIECES_PER_PLAYER: usize = 6;

/// Handle to a piece in the board's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u16);

impl PieceId {
    /// Position in the arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Piece({})", self.0)
    }
}

/// What a piece is made of.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    /// A single racing token.
    Single,
    /// Two same-owner singles fused into one unit moving at half speed.
    Tied { parts: [PieceId; 2] },
}

/// A piece and its path landmarks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub id: PieceId,
    pub owner: PlayerId,
    pub kind: PieceKind,

    /// Current path position in the owner's numbering.
    pub position: Alias,
    pub home_position: Alias,
    pub final_outer_position: Alias,
    pub fruit_position: Alias,

    /// Candidate moves from the last legality computation.
    pub moves: Vec<Move>,

    /// Set once the piece has left home; cleared when captured.
    pub moved: bool,

    /// A single sharing a cell with an enemy tied piece cannot move.
    pub beside_enemy_tied: bool,

    /// False for singles absorbed into a tie and for dissolved ties.
    pub active: bool,
}

impl Piece {
    /// A single piece at its owner's home.
    #[must_use]
    pub fn single(id: PieceId, owner: PlayerId) -> Self {
        Self::with_kind(id, owner, PieceKind::Single, Alias::home(owner))
    }

    /// A tied piece made of `parts`, placed at `position`.
    #[must_use]
    pub fn tied(id: PieceId, owner: PlayerId, parts: [PieceId; 2], position: Alias) -> Self {
        let mut piece = Self::with_kind(id, owner, PieceKind::Tied { parts }, position);
        piece.moved = true;
        piece
    }

    fn with_kind(id: PieceId, owner: PlayerId, kind: PieceKind, position: Alias) -> Self {
        let home_position = Alias::home(owner);
        Self {
            id,
            owner,
            kind,
            position,
            home_position,
            final_outer_position: home_position.advanced(PLACES_BEFORE_INNER),
            fruit_position: home_position.advanced(PLACES_TO_FRUIT),
            moves: Vec::new(),
            moved: false,
            beside_enemy_tied: false,
            active: true,
        }
    }

    #[must_use]
    pub fn is_single(&self) -> bool {
        matches!(self.kind, PieceKind::Single)
    }

    #[must_use]
    pub fn is_tied(&self) -> bool {
        matches!(self.kind, PieceKind::Tied { .. })
    }

    /// Component ids of a tied piece.
    #[must_use]
    pub fn parts(&self) -> Option<[PieceId; 2]> {
        match self.kind {
            PieceKind::Tied { parts } => Some(parts),
            PieceKind::Single => None,
        }
    }

    /// Pieces of the owner this entry stands for.
    #[must_use]
    pub fn weight(&self) -> usize {
        match self.kind {
            PieceKind::Single => 1,
            PieceKind::Tied { .. } => 2,
        }
    }

    /// Whether advancing `places` stays within the fruit.
    #[must_use]
    pub fn can_move(&self, places: u16) -> bool {
        self.position.advanced(places) <= self.fruit_position
    }

    /// Advance along the path.
    ///
    /// A single refuses to pass its fruit and stays put. A tied piece moves
    /// unconditionally: its destination was validated by the legality engine.
    pub fn advance(&mut self, places: u16) -> bool {
        match self.kind {
            PieceKind::Single if !self.can_move(places) => false,
            _ => {
                self.position = self.position.advanced(places);
                true
            }
        }
    }

    /// Places left before the fruit.
    #[must_use]
    pub fn moves_left(&self) -> u16 {
        self.fruit_position.distance_from(self.position)
    }

    #[must_use]
    pub fn is_fruit(&self) -> bool {
        self.position == self.fruit_position
    }

    #[must_use]
    pub fn is_home(&self) -> bool {
        self.position == self.home_position
    }

    /// On the path: left home and not yet fruited.
    #[must_use]
    pub fn is_out(&self) -> bool {
        !self.is_home() && !self.is_fruit()
    }

    /// Send the piece back to its start. Fruited pieces stay where they are.
    pub fn return_to_home(&mut self) {
        if !self.is_fruit() {
            self.position = self.home_position;
        }
        self.moved = false;
        self.beside_enemy_tied = false;
        self.moves.clear();
    }

    pub fn clear_moves(&mut self) {
        self.moves.clear();
    }

    /// The cached candidate matching `mv`.
    ///
    /// Candidates compare by endpoints only; an exact match on the tying
    /// flag wins over an endpoint-only match.
    #[must_use]
    pub fn find_move(&self, mv: &Move) -> Option<Move> {
        self.moves
            .iter()
            .find(|m| **m == *mv && m.tying == mv.tying)
            .or_else(|| self.moves.iter().find(|m| **m == *mv))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn test_landmarks() {
        let piece = Piece::single(PieceId(6), PlayerId::new(1));
        assert_eq!(piece.home_position, Alias::new(100));
        assert_eq!(piece.final_outer_position, Alias::new(123));
        assert_eq!(piece.fruit_position, Alias::new(148));
        assert!(piece.is_home());
        assert!(!piece.is_out());
        assert_eq!(piece.moves_left(), 48);
    }

    #[test]
    fn test_single_refuses_overshoot() {
        let mut piece = Piece::single(PieceId(0), PlayerId::new(0));
        piece.position = Alias::new(45);

        assert!(!piece.advance(4));
        assert_eq!(piece.position, Alias::new(45));

        assert!(piece.advance(3));
        assert!(piece.is_fruit());
        assert!(!piece.is_out());
    }

    #[test]
    fn test_tied_advances_unconditionally() {
        let mut tied = Piece::tied(PieceId(12), PlayerId::new(0), [PieceId(0), PieceId(1)], Alias::new(30));
        assert!(tied.moved);
        assert_eq!(tied.weight(), 2);
        assert_eq!(tied.parts(), Some([PieceId(0), PieceId(1)]));

        assert!(tied.advance(2));
        assert_eq!(tied.position, Alias::new(32));
    }

    #[test]
    fn test_return_to_home_resets_state() {
        let mut piece = Piece::single(PieceId(0), PlayerId::new(0));
        piece.position = Alias::new(17);
        piece.moved = true;
        piece.beside_enemy_tied = true;
        piece.moves.push(Move::new(Cell::new(0, 0), Cell::new(0, 1)));

        piece.return_to_home();

        assert!(piece.is_home());
        assert!(!piece.moved);
        assert!(!piece.beside_enemy_tied);
        assert!(piece.moves.is_empty());
    }

    #[test]
    fn test_fruited_piece_stays_on_return() {
        let mut piece = Piece::single(PieceId(0), PlayerId::new(0));
        piece.position = piece.fruit_position;
        piece.return_to_home();
        assert!(piece.is_fruit());
    }

    #[test]
    fn test_find_move_prefers_exact_tying_flag() {
        let mut piece = Piece::single(PieceId(0), PlayerId::new(0));
        let plain = Move::new(Cell::new(4, 1), Cell::new(3, 1));
        let tying = Move::tying(Cell::new(4, 1), Cell::new(3, 1));
        piece.moves = vec![plain, tying];

        assert!(piece.find_move(&tying).unwrap().tying);
        assert!(!piece.find_move(&plain).unwrap().tying);
        assert!(piece.find_move(&Move::new(Cell::new(4, 1), Cell::new(2, 1))).is_none());
    }
}
