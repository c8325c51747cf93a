//! Move execution: relocation, roll consumption, ties, and captures.
//!
//! ## Captures
//!
//! Nothing is captured on a safe house. Elsewhere:
//! - a single sends enemy singles home and coexists with enemy ties
//! - a tied piece sends every enemy piece home; a captured tie is dissolved
//!   and both of its singles go home
//! - a tied piece leaving a non-safe cell exposes the enemy singles it was
//!   sheltering there, and they are sent home too
//!
//! Each capture unlocks the inner arm for the capturer and earns one bonus
//! kawade throw.

use smallvec::SmallVec;

use crate::board::{Alias, Board, Cell, Move, PieceId, PieceKind};
use crate::core::{GameEvent, PlayerId, RulesError};

/// What a successful `apply_move` did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The piece now standing on the destination; the new tied piece for a
    /// tying move.
    pub piece: Option<PieceId>,

    /// Roll value consumed.
    pub consumed: u8,

    /// Enemy pieces sent home.
    pub captured: SmallVec<[PieceId; 4]>,

    /// Values added to the roll by capture rerolls.
    pub bonus_throws: SmallVec<[u8; 4]>,

    /// Whether the mover is now pinned beside an enemy tied piece.
    pub pinned: bool,
}

impl MoveOutcome {
    #[must_use]
    pub fn captured_any(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl Board {
    /// Execute a move from the piece's last computed candidates.
    ///
    /// The move is checked against the cached list and against a fresh
    /// computation before anything changes; a rejected move leaves the board
    /// untouched.
    pub fn apply_move(&mut self, id: PieceId, mv: Move) -> Result<MoveOutcome, RulesError> {
        let (mv, consumed) = self.validate_move(id, mv)?;
        let owner = self.pieces[id.index()].owner;
        let mover_is_tied = self.pieces[id.index()].is_tied();

        let mut outcome = MoveOutcome {
            consumed,
            ..MoveOutcome::default()
        };

        let landed = if mv.tying {
            self.execute_tie(id, mv)?
        } else {
            self.execute_step(id, mv, &mut outcome)?
        };
        self.roll.remove(consumed);
        outcome.piece = Some(landed);

        if !mv.final_cell.is_safe_house() {
            let enemies = self.square(mv.final_cell).enemy_pieces(&self.pieces, owner);
            for enemy in enemies {
                if self.pieces[enemy.index()].is_tied() && !mover_is_tied {
                    continue;
                }
                self.capture(owner, enemy, mv.final_cell, &mut outcome)?;
            }
        }

        if mover_is_tied && !mv.initial.is_safe_house() {
            let stranded: SmallVec<[PieceId; 4]> = self
                .square(mv.initial)
                .enemy_pieces(&self.pieces, owner)
                .into_iter()
                .filter(|p| self.pieces[p.index()].is_single())
                .collect();
            for enemy in stranded {
                self.capture(owner, enemy, mv.initial, &mut outcome)?;
            }
        }

        let piece = &mut self.pieces[landed.index()];
        piece.moved = true;
        piece.clear_moves();

        Ok(outcome)
    }

    /// Resolve `mv` to the cached candidate and the roll value it spends.
    fn validate_move(&self, id: PieceId, mv: Move) -> Result<(Move, u8), RulesError> {
        let illegal = || RulesError::IllegalMove { piece: id, mv };
        let piece = self.piece(id)?;

        let candidate = piece.find_move(&mv).ok_or_else(illegal)?;
        let fresh = self.candidate_moves(piece)?;
        if !fresh.iter().any(|m| *m == candidate && m.tying == candidate.tying) {
            return Err(illegal());
        }

        let consumed = if candidate.tying {
            2
        } else {
            let from = self.paths.alias_of(piece.owner, candidate.initial);
            let to = self.paths.alias_of(piece.owner, candidate.final_cell);
            let length = to.distance_from(from) * piece.weight() as u16;
            u8::try_from(length).map_err(|_| illegal())?
        };

        if !self.roll.contains(consumed) {
            return Err(illegal());
        }
        Ok((candidate, consumed))
    }

    fn execute_step(&mut self, id: PieceId, mv: Move, outcome: &mut MoveOutcome) -> Result<PieceId, RulesError> {
        let owner = self.pieces[id.index()].owner;
        let from = self.paths.alias_of(owner, mv.initial);
        let to = self.paths.alias_of(owner, mv.final_cell);
        let length = to.distance_from(from);

        self.square_mut(mv.initial).remove_piece(id)?;
        self.square_mut(mv.final_cell).add_piece(id);
        self.pieces[id.index()].advance(length);
        self.log.record(GameEvent::Moved {
            piece: id,
            from: mv.initial,
            to: mv.final_cell,
            length: length as u8,
        });

        if self.pieces[id.index()].is_single() {
            self.pin_beside_enemy_ties(id, mv.final_cell, outcome);
        }

        Ok(id)
    }

    fn pin_beside_enemy_ties(&mut self, id: PieceId, cell: Cell, outcome: &mut MoveOutcome) {
        let owner = self.pieces[id.index()].owner;
        let tie_owners = self.square(cell).enemy_tie_owners(&self.pieces, owner);

        for by in tie_owners {
            if self.tied_contacts[by].insert(id) {
                self.log.record(GameEvent::Pinned { piece: id, by });
            }
            self.pieces[id.index()].beside_enemy_tied = true;
            outcome.pinned = true;
        }
    }

    fn execute_tie(&mut self, id: PieceId, mv: Move) -> Result<PieceId, RulesError> {
        let partner = self
            .square(mv.initial)
            .other_single_team_piece(&self.pieces, id)
            .ok_or(RulesError::IllegalMove { piece: id, mv })?;
        let owner = self.pieces[id.index()].owner;
        let at = self.paths.alias_of(owner, mv.final_cell);

        self.square_mut(mv.initial).remove_piece(id)?;
        self.square_mut(mv.initial).remove_piece(partner)?;
        let tied = self.form_tie([id, partner], at);
        self.square_mut(mv.final_cell).add_piece(tied);

        self.log.record(GameEvent::Tied {
            parts: [id, partner],
            tied,
            at: mv.final_cell,
        });
        Ok(tied)
    }

    /// Send an enemy piece home from `at` and award the capture.
    fn capture(&mut self, by: PlayerId, enemy: PieceId, at: Cell, outcome: &mut MoveOutcome) -> Result<(), RulesError> {
        self.square_mut(at).remove_piece(enemy)?;
        let owner = self.pieces[enemy.index()].owner;

        match self.pieces[enemy.index()].kind {
            PieceKind::Tied { parts } => {
                let tie = &mut self.pieces[enemy.index()];
                tie.active = false;
                tie.moved = false;
                tie.clear_moves();
                for part in parts {
                    self.restore_home(part)?;
                }
            }
            PieceKind::Single => self.restore_home(enemy)?,
        }

        self.capture_flags[by] = true;
        self.log.record(GameEvent::Captured {
            by,
            piece: enemy,
            owner,
            at,
        });
        outcome.captured.push(enemy);

        let throws = self.throw(by, true);
        outcome.bonus_throws.extend(throws);
        Ok(())
    }

    /// Put a single back on its home cell as an active, unmoved piece.
    fn restore_home(&mut self, id: PieceId) -> Result<(), RulesError> {
        let home = self.home_cell(self.pieces[id.index()].owner)?;

        let piece = &mut self.pieces[id.index()];
        piece.active = true;
        piece.position = Alias::home(piece.owner);
        piece.return_to_home();

        self.square_mut(home).add_piece(id);
        Ok(())
    }
}
