//! Turn controller: whose turn it is, what they may do, and who has finished.
//!
//! ## Turn structure
//!
//! A turn starts in `Stage::Roll`. Throwing the shells moves it to
//! `Stage::MakeMove`, where the active player spends roll values one move at
//! a time. When the roll is empty the turn passes to the next seat that has
//! not finished. If none of the active player's pieces can use the roll,
//! the player forfeits what is left.
//!
//! ## Finishing
//!
//! A player finishes once all six pieces stand on the fruit. Their leftover
//! roll is discarded and they take no further turns. The game is over when
//! one player remains.

use smallvec::SmallVec;

use super::standings::Standings;
use crate::board::{Board, Move, PieceId};
use crate::core::{ConfigError, GameConfig, GameEvent, PlayerId, RulesError, Stage};
use crate::dice::DiceSource;
use crate::rules::MoveOutcome;

/// A game in progress.
#[derive(Debug)]
pub struct Game {
    config: GameConfig,
    board: Board,
    stage: Stage,
    active: PlayerId,
    finished: Vec<PlayerId>,
}

impl Game {
    /// Start a game with seeded shell dice.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let board = Board::new(&config)?;
        Ok(Self::from_board(config, board))
    }

    /// Start a game drawing throws from `dice`.
    pub fn with_dice(config: GameConfig, dice: Box<dyn DiceSource>) -> Result<Self, ConfigError> {
        let board = Board::with_dice(&config, dice)?;
        Ok(Self::from_board(config, board))
    }

    fn from_board(config: GameConfig, board: Board) -> Self {
        Self {
            config,
            board,
            stage: Stage::Roll,
            active: PlayerId::new(0),
            finished: Vec::new(),
        }
    }

    /// Start over from the configuration with freshly seeded dice.
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        let board = Board::new(&self.config)?;
        self.restart(board);
        Ok(())
    }

    /// Start over from the configuration, drawing throws from `dice`.
    pub fn reset_with_dice(&mut self, dice: Box<dyn DiceSource>) -> Result<(), ConfigError> {
        let board = Board::with_dice(&self.config, dice)?;
        self.restart(board);
        Ok(())
    }

    fn restart(&mut self, board: Board) {
        self.board = board;
        self.stage = Stage::Roll;
        self.active = PlayerId::new(0);
        self.finished.clear();
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for scenario setup.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    /// Players who have finished, in finishing order.
    #[must_use]
    pub fn finished(&self) -> &[PlayerId] {
        &self.finished
    }

    #[must_use]
    pub fn is_finished(&self, player: PlayerId) -> bool {
        self.finished.contains(&player)
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.finished.len() + 1 >= self.board.player_count()
    }

    /// Final ranking, once the game is over.
    #[must_use]
    pub fn standings(&self) -> Option<Standings> {
        if !self.is_over() {
            return None;
        }

        let mut order = self.finished.clone();
        order.extend(PlayerId::all(self.board.player_count()).filter(|p| !self.finished.contains(p)));
        Some(Standings::new(order))
    }

    // === Actions ===

    /// Throw the shells for the active player.
    pub fn roll(&mut self) -> Result<SmallVec<[u8; 4]>, RulesError> {
        self.require(Stage::Roll)?;
        let throws = self.board.roll_dice(self.active);
        self.stage = Stage::MakeMove;
        Ok(throws)
    }

    /// Compute the legal moves of one of the active player's pieces.
    pub fn legal_moves(&mut self, piece: PieceId) -> Result<Vec<Move>, RulesError> {
        self.require(Stage::MakeMove)?;
        self.require_owner(piece)?;
        self.board.compute_legal_moves(piece)
    }

    /// Play a move computed by `legal_moves`.
    ///
    /// Passes the turn when the roll is used up or the player finishes.
    pub fn play(&mut self, piece: PieceId, mv: Move) -> Result<MoveOutcome, RulesError> {
        self.require(Stage::MakeMove)?;
        self.require_owner(piece)?;
        let outcome = self.board.apply_move(piece, mv)?;

        if self.board.has_player_finished(self.active) {
            self.finish(self.active);
            if !self.is_over() {
                self.next_turn()?;
            }
        } else if self.board.remaining_roll().is_empty() {
            self.next_turn()?;
        }

        Ok(outcome)
    }

    /// Whether any of the active player's pieces can use the current roll.
    pub fn has_any_legal_move(&self) -> Result<bool, RulesError> {
        for piece in self.board.player_pieces(self.active) {
            if !self.board.candidate_moves(piece)?.is_empty() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Give up the rest of the roll when no piece can use it.
    pub fn forfeit(&mut self) -> Result<SmallVec<[u8; 4]>, RulesError> {
        self.require(Stage::MakeMove)?;
        if self.has_any_legal_move()? {
            return Err(RulesError::MovesAvailable(self.active));
        }

        let discarded = self.board.discard_roll();
        self.board.log.record(GameEvent::Forfeited {
            player: self.active,
            discarded: discarded.clone(),
        });
        self.next_turn()?;
        Ok(discarded)
    }

    fn require(&self, expected: Stage) -> Result<(), RulesError> {
        if self.is_over() {
            return Err(RulesError::GameOver);
        }
        if self.stage != expected {
            return Err(RulesError::WrongStage {
                expected,
                actual: self.stage,
            });
        }
        Ok(())
    }

    fn require_owner(&self, piece: PieceId) -> Result<(), RulesError> {
        if self.board.piece(piece)?.owner != self.active {
            return Err(RulesError::NotActivePlayer {
                piece,
                player: self.active,
            });
        }
        Ok(())
    }

    fn finish(&mut self, player: PlayerId) {
        self.finished.push(player);
        self.board.discard_roll();
        self.board.log.record(GameEvent::Finished {
            player,
            place: self.finished.len(),
        });
    }

    /// Hand the turn to the next seat still racing.
    fn next_turn(&mut self) -> Result<(), RulesError> {
        let ending = self.active;
        self.board.clear_tied_contacts(ending)?;

        let count = self.board.player_count();
        let mut next = ending.next(count);
        while self.finished.contains(&next) && next != ending {
            next = next.next(count);
        }

        self.board.log.record(GameEvent::TurnPassed { from: ending, to: next });
        self.board.log.advance_turn();
        self.active = next;
        self.stage = Stage::Roll;
        Ok(())
    }
}
