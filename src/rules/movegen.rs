//! Legal move generation.
//!
//! ## Single pieces
//!
//! A single may advance by any value in the roll, subject to:
//! - the capture gate: until its owner has captured, it may not pass the
//!   last cell of the outer ring
//! - blocking: an enemy tied piece on a non-safe cell stops passage unless
//!   one of the mover's singles shares that cell; values at least as large
//!   are blocked too
//! - landing: an outer-ring cell must be empty, hold an enemy, or be a safe
//!   house; inner-arm cells are always open
//!
//! With a 2 in the roll, two singles sharing an inner-arm cell may tie and
//! step one place forward as a tied piece.
//!
//! A single pinned beside an enemy tied piece has no moves.
//!
//! ## Tied pieces
//!
//! A tied piece spends even values only and travels half the value.
//! Occupancy is not checked for tied destinations.

use crate::board::{Board, Cell, Move, Piece, PieceId, PieceKind};
use crate::core::RulesError;

fn push_unique(moves: &mut Vec<Move>, mv: Move) {
    if !moves.iter().any(|m| *m == mv && m.tying == mv.tying) {
        moves.push(mv);
    }
}

impl Board {
    /// Compute and cache the legal moves of a piece.
    ///
    /// Overwrites the piece's previous candidate list.
    pub fn compute_legal_moves(&mut self, id: PieceId) -> Result<Vec<Move>, RulesError> {
        let moves = self.candidate_moves(self.piece(id)?)?;
        self.pieces[id.index()].moves = moves.clone();
        Ok(moves)
    }

    /// Whether `mv` is among the piece's last computed candidates.
    #[must_use]
    pub fn is_legal(&self, id: PieceId, mv: &Move) -> bool {
        self.piece(id)
            .map(|piece| piece.find_move(mv).is_some())
            .unwrap_or(false)
    }

    /// Legal moves of `piece` in the current position, without caching.
    pub(crate) fn candidate_moves(&self, piece: &Piece) -> Result<Vec<Move>, RulesError> {
        let mut moves = Vec::new();
        if !piece.active || piece.is_fruit() {
            return Ok(moves);
        }

        let here = self.paths.cell_of(piece.position)?;
        match piece.kind {
            PieceKind::Single => self.single_moves(piece, here, &mut moves)?,
            PieceKind::Tied { .. } => self.tied_moves(piece, here, &mut moves)?,
        }
        Ok(moves)
    }

    fn single_moves(&self, piece: &Piece, here: Cell, moves: &mut Vec<Move>) -> Result<(), RulesError> {
        if piece.beside_enemy_tied {
            return Ok(());
        }

        let owner = piece.owner;
        let square = self.square(here);
        let can_tie = !square.is_safe_house()
            && square.other_single_team_piece(&self.pieces, piece.id).is_some();
        let ceiling = if self.capture_flags[owner] {
            piece.fruit_position
        } else {
            piece.final_outer_position
        };

        for value in self.roll.sorted() {
            let places = u16::from(value);
            if self.path_blocked(piece, places)? {
                break;
            }

            let target = piece.position.advanced(places);
            if target > ceiling {
                continue;
            }

            let dest = self.paths.cell_of(target)?;
            let dest_square = self.square(dest);
            let open = target.is_inner()
                || dest_square.is_empty_or_enemy(&self.pieces, owner)
                || dest_square.is_safe_house();
            if open {
                push_unique(moves, Move::new(here, dest));
            }
        }

        if can_tie && piece.position.is_inner() && self.roll.contains(2) {
            let target = piece.position.advanced(1);
            if target <= ceiling {
                let dest = self.paths.cell_of(target)?;
                if !dest.is_safe_house() {
                    push_unique(moves, Move::tying(here, dest));
                }
            }
        }

        Ok(())
    }

    /// Whether an enemy tied piece stands strictly between the piece and
    /// `places` ahead.
    fn path_blocked(&self, piece: &Piece, places: u16) -> Result<bool, RulesError> {
        for step in 1..places {
            let pos = piece.position.advanced(step);
            if pos > piece.fruit_position {
                break;
            }

            let square = self.square(self.paths.cell_of(pos)?);
            if !square.is_safe_house()
                && square.has_enemy_tied_piece(&self.pieces, piece.owner)
                && !square.has_single_team_piece(&self.pieces, piece.owner)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn tied_moves(&self, piece: &Piece, here: Cell, moves: &mut Vec<Move>) -> Result<(), RulesError> {
        for value in self.roll.sorted() {
            if value % 2 != 0 {
                continue;
            }

            let target = piece.position.advanced(u16::from(value / 2));
            if target <= piece.fruit_position {
                push_unique(moves, Move::new(here, self.paths.cell_of(target)?));
            }
        }
        Ok(())
    }
}
