//! Board squares and occupancy queries.
//!
//! A square stores piece handles only. Queries that need a piece's owner or
//! kind take the board's piece arena as an argument.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::coord::Cell;
use super::piece::{Piece, PieceId};
use crate::core::{PlayerId, RulesError};

/// A board cell and the pieces standing on it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Square {
    pub cell: Cell,
    pieces: SmallVec<[PieceId; 4]>,
}

impl Square {
    #[must_use]
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            pieces: SmallVec::new(),
        }
    }

    /// Handles of the pieces on this square, in arrival order.
    #[must_use]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    #[must_use]
    pub fn contains(&self, piece: PieceId) -> bool {
        self.pieces.contains(&piece)
    }

    #[must_use]
    pub fn is_safe_house(&self) -> bool {
        self.cell.is_safe_house()
    }

    #[must_use]
    pub fn has_pieces(&self) -> bool {
        !self.pieces.is_empty()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    fn resolve<'a>(&'a self, arena: &'a [Piece]) -> impl Iterator<Item = &'a Piece> + 'a {
        self.pieces.iter().map(move |id| &arena[id.index()])
    }

    #[must_use]
    pub fn has_team_piece(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.resolve(arena).any(|p| p.owner == owner)
    }

    /// Whether an untied piece of `owner` is here.
    #[must_use]
    pub fn has_single_team_piece(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.resolve(arena).any(|p| p.owner == owner && p.is_single())
    }

    /// Another single of the same owner as `piece`, the partner for a tie.
    #[must_use]
    pub fn other_single_team_piece(&self, arena: &[Piece], piece: PieceId) -> Option<PieceId> {
        let owner = arena[piece.index()].owner;
        self.resolve(arena)
            .find(|p| p.id != piece && p.owner == owner && p.is_single())
            .map(|p| p.id)
    }

    #[must_use]
    pub fn has_enemy_piece(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.resolve(arena).any(|p| p.owner != owner)
    }

    #[must_use]
    pub fn has_enemy_tied_piece(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.resolve(arena).any(|p| p.owner != owner && p.is_tied())
    }

    /// Whether a tied piece belonging to `owner` is here.
    #[must_use]
    pub fn has_tied_piece_of(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.resolve(arena).any(|p| p.owner == owner && p.is_tied())
    }

    /// Owners of the enemy tied pieces here, each listed once.
    #[must_use]
    pub fn enemy_tie_owners(&self, arena: &[Piece], owner: PlayerId) -> SmallVec<[PlayerId; 4]> {
        let mut owners: SmallVec<[PlayerId; 4]> = SmallVec::new();
        for p in self.resolve(arena).filter(|p| p.owner != owner && p.is_tied()) {
            if !owners.contains(&p.owner) {
                owners.push(p.owner);
            }
        }
        owners
    }

    #[must_use]
    pub fn enemy_pieces(&self, arena: &[Piece], owner: PlayerId) -> SmallVec<[PieceId; 4]> {
        self.resolve(arena)
            .filter(|p| p.owner != owner)
            .map(|p| p.id)
            .collect()
    }

    #[must_use]
    pub fn is_empty_or_enemy(&self, arena: &[Piece], owner: PlayerId) -> bool {
        self.is_empty() || self.has_enemy_piece(arena, owner)
    }

    /// Number of `owner`'s pieces here, a tied piece counting as two.
    #[must_use]
    pub fn team_weight(&self, arena: &[Piece], owner: PlayerId) -> usize {
        self.resolve(arena)
            .filter(|p| p.owner == owner)
            .map(Piece::weight)
            .sum()
    }

    /// Put a piece on this square. Adding a piece already present is a no-op.
    pub fn add_piece(&mut self, piece: PieceId) {
        if !self.contains(piece) {
            self.pieces.push(piece);
        }
    }

    /// Take a piece off this square.
    pub fn remove_piece(&mut self, piece: PieceId) -> Result<(), RulesError> {
        let idx = self
            .pieces
            .iter()
            .position(|&p| p == piece)
            .ok_or(RulesError::PieceNotOnSquare { piece, cell: self.cell })?;
        self.pieces.remove(idx);
        Ok(())
    }
}
