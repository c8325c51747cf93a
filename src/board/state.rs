//! The board: squares, the piece arena, capture flags, and the pending roll.
//!
//! Legal-move computation lives in `rules::movegen` and move execution in
//! `rules::executor`; both are `impl Board` blocks over the state defined
//! here.

use im::Vector;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::coord::{Alias, Cell, PathMap, BASE_PATH, PLACES_TO_FRUIT};
use super::piece::{Piece, PieceId, PIECES_PER_PLAYER};
use super::square::Square;
use crate::core::{
    Color, ConfigError, EventLog, EventRecord, GameConfig, GameEvent, PlayerId, PlayerMap, RulesError,
};
use crate::dice::{kawade, DiceSource, Roll, ShellDice};

/// Complete board state for one game.
#[derive(Debug)]
pub struct Board {
    players: Vec<Color>,
    pub(crate) paths: PathMap,
    squares: Vec<Square>,
    pub(crate) pieces: Vec<Piece>,
    pub(crate) capture_flags: PlayerMap<bool>,
    pub(crate) roll: Roll,
    /// Enemy singles pinned beside each player's tied pieces.
    pub(crate) tied_contacts: PlayerMap<FxHashSet<PieceId>>,
    dice: Box<dyn DiceSource>,
    max_reroll_chain: usize,
    pub(crate) log: EventLog,
}

impl Board {
    /// Create a board with seeded shell dice.
    pub fn new(config: &GameConfig) -> Result<Self, ConfigError> {
        Self::with_dice(config, Box::new(ShellDice::new(config.seed)))
    }

    /// Create a board drawing throws from `dice`.
    pub fn with_dice(config: &GameConfig, dice: Box<dyn DiceSource>) -> Result<Self, ConfigError> {
        config.validate()?;

        let player_count = config.player_count();
        let paths = PathMap::new(player_count);
        let squares = Cell::all().map(Square::new).collect();

        let mut board = Self {
            players: config.players.clone(),
            paths,
            squares,
            pieces: Vec::with_capacity(player_count * PIECES_PER_PLAYER),
            capture_flags: PlayerMap::with_value(player_count, false),
            roll: Roll::new(),
            tied_contacts: PlayerMap::with_default(player_count),
            dice,
            max_reroll_chain: config.max_reroll_chain,
            log: EventLog::new(),
        };

        let homes: Vec<(PlayerId, Cell)> = board.paths.homes().collect();
        for (player, home) in homes {
            for _ in 0..PIECES_PER_PLAYER {
                let id = PieceId(board.pieces.len() as u16);
                board.pieces.push(Piece::single(id, player));
                board.square_mut(home).add_piece(id);
            }
        }

        Ok(board)
    }

    // === Players ===

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    #[must_use]
    pub fn players(&self) -> &[Color] {
        &self.players
    }

    pub fn color(&self, player: PlayerId) -> Result<Color, RulesError> {
        self.players
            .get(player.index())
            .copied()
            .ok_or(RulesError::UnknownPlayer(player))
    }

    fn check_player(&self, player: PlayerId) -> Result<(), RulesError> {
        if player.index() < self.players.len() {
            Ok(())
        } else {
            Err(RulesError::UnknownPlayer(player))
        }
    }

    /// Seat of the player playing `color`.
    #[must_use]
    pub fn player_of(&self, color: Color) -> Option<PlayerId> {
        self.players
            .iter()
            .position(|&c| c == color)
            .map(|i| PlayerId::new(i as u8))
    }

    /// Whether `player` has captured at least once, unlocking the inner arm.
    /// An unseated player never has.
    #[must_use]
    pub fn has_captured(&self, player: PlayerId) -> bool {
        self.check_player(player).is_ok() && self.capture_flags[player]
    }

    pub fn set_capture_flag(&mut self, player: PlayerId) -> Result<(), RulesError> {
        self.check_player(player)?;
        self.capture_flags[player] = true;
        Ok(())
    }

    // === Geometry ===

    #[must_use]
    pub fn paths(&self) -> &PathMap {
        &self.paths
    }

    #[must_use]
    pub fn alias_of(&self, player: PlayerId, cell: Cell) -> Alias {
        self.paths.alias_of(player, cell)
    }

    pub fn cell_of(&self, alias: Alias) -> Result<Cell, RulesError> {
        self.paths.cell_of(alias)
    }

    /// Start cell of `player`'s path.
    pub fn home_cell(&self, player: PlayerId) -> Result<Cell, RulesError> {
        self.paths.cell_of(Alias::home(player))
    }

    /// The shared finish cell. It is the board's centre, so every rotation
    /// maps onto it.
    #[must_use]
    pub fn fruit_cell(&self) -> Cell {
        BASE_PATH[PLACES_TO_FRUIT as usize]
    }

    // === Squares ===

    #[must_use]
    pub fn square(&self, cell: Cell) -> &Square {
        &self.squares[cell.index()]
    }

    pub(crate) fn square_mut(&mut self, cell: Cell) -> &mut Square {
        &mut self.squares[cell.index()]
    }

    /// All squares, row by row.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.squares.iter()
    }

    #[must_use]
    pub fn pieces_at(&self, cell: Cell) -> &[PieceId] {
        self.square(cell).pieces()
    }

    #[must_use]
    pub fn is_safe_house(&self, cell: Cell) -> bool {
        cell.is_safe_house()
    }

    // === Pieces ===

    pub fn piece(&self, id: PieceId) -> Result<&Piece, RulesError> {
        self.pieces.get(id.index()).ok_or(RulesError::UnknownPiece(id))
    }

    /// The whole arena, including inactive entries.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Pieces of `player` currently in play.
    pub fn player_pieces(&self, player: PlayerId) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(move |p| p.active && p.owner == player)
    }

    /// Cell a piece stands on.
    pub fn piece_cell(&self, id: PieceId) -> Result<Cell, RulesError> {
        self.paths.cell_of(self.piece(id)?.position)
    }

    // === Roll ===

    /// Throw the shells for `player`, appending the chain to the roll.
    pub fn roll_dice(&mut self, player: PlayerId) -> SmallVec<[u8; 4]> {
        self.throw(player, false)
    }

    pub(crate) fn throw(&mut self, player: PlayerId, bonus: bool) -> SmallVec<[u8; 4]> {
        let throws = kawade(self.dice.as_mut(), &mut self.roll, self.max_reroll_chain);
        self.log.record(GameEvent::Rolled {
            player,
            throws: throws.clone(),
            bonus,
        });
        throws
    }

    /// Replace the roll with explicit values, bypassing the dice.
    pub fn inject_roll(&mut self, values: &[u8]) {
        self.roll = Roll::from_values(values);
    }

    #[must_use]
    pub fn remaining_roll(&self) -> &Roll {
        &self.roll
    }

    /// Empty the roll, returning what was left.
    pub fn discard_roll(&mut self) -> SmallVec<[u8; 4]> {
        self.roll.take()
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<EventRecord> {
        self.log.records()
    }

    /// Current turn number of the history.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.log.turn()
    }

    // === Finish ===

    /// Whether all of `player`'s pieces stand on the fruit.
    #[must_use]
    pub fn has_player_finished(&self, player: PlayerId) -> bool {
        self.square(self.fruit_cell()).team_weight(&self.pieces, player) == PIECES_PER_PLAYER
    }

    // === Scenario setup ===

    /// Put a piece at `position` on its owner's path.
    ///
    /// Intended for setting up puzzles and test positions; normal play moves
    /// pieces only through `apply_move`.
    pub fn place_piece(&mut self, id: PieceId, position: Alias) -> Result<(), RulesError> {
        let piece = self.piece(id)?;
        if !piece.active {
            return Err(RulesError::InvalidSetup(format!("{} is not in play", id)));
        }
        if position.player_index() != piece.owner.index()
            || position < piece.home_position
            || position > piece.fruit_position
        {
            return Err(RulesError::InvalidSetup(format!(
                "{} is not on the path of {}",
                position, piece.owner
            )));
        }

        let from = self.paths.cell_of(piece.position)?;
        let to = self.paths.cell_of(position)?;
        self.square_mut(from).remove_piece(id)?;
        self.square_mut(to).add_piece(id);

        let piece = &mut self.pieces[id.index()];
        piece.position = position;
        piece.moved = !piece.is_home();
        piece.clear_moves();
        Ok(())
    }

    /// Tie two singles of the same owner standing on the same cell.
    pub fn tie_pieces(&mut self, first: PieceId, second: PieceId) -> Result<PieceId, RulesError> {
        let a = self.piece(first)?;
        let b = self.piece(second)?;
        if first == second
            || !a.active
            || !b.active
            || !a.is_single()
            || !b.is_single()
            || a.owner != b.owner
            || a.position != b.position
        {
            return Err(RulesError::InvalidSetup(format!(
                "{} and {} cannot be tied",
                first, second
            )));
        }

        let position = a.position;
        let cell = self.paths.cell_of(position)?;
        self.square_mut(cell).remove_piece(first)?;
        self.square_mut(cell).remove_piece(second)?;
        let tied = self.form_tie([first, second], position);
        self.square_mut(cell).add_piece(tied);
        Ok(tied)
    }

    /// Retire two singles and create the tied piece standing for them.
    /// The caller keeps the squares in sync.
    pub(crate) fn form_tie(&mut self, parts: [PieceId; 2], position: Alias) -> PieceId {
        let owner = self.pieces[parts[0].index()].owner;
        for part in parts {
            let piece = &mut self.pieces[part.index()];
            piece.active = false;
            piece.beside_enemy_tied = false;
            piece.clear_moves();
        }

        let id = PieceId(self.pieces.len() as u16);
        self.pieces.push(Piece::tied(id, owner, parts, position));
        id
    }

    /// Clear pins held by `tied_owner`'s tied pieces that have since left
    /// or been captured.
    ///
    /// Called when `tied_owner`'s turn ends, so pinned singles are free
    /// again by the time their own owner plays.
    ///
    /// A single still standing beside another player's tie stays pinned and
    /// moves to that player's contacts.
    pub fn clear_tied_contacts(&mut self, tied_owner: PlayerId) -> Result<(), RulesError> {
        self.check_player(tied_owner)?;
        let mut contacts: Vec<PieceId> = self.tied_contacts[tied_owner].iter().copied().collect();
        contacts.sort_unstable();

        for id in contacts {
            let piece = &self.pieces[id.index()];
            let square = self.square(self.paths.cell_of(piece.position)?);
            let pinned = piece.active && piece.beside_enemy_tied;

            if pinned && square.has_tied_piece_of(&self.pieces, tied_owner) {
                continue;
            }

            let holders = square.enemy_tie_owners(&self.pieces, piece.owner);
            self.tied_contacts[tied_owner].remove(&id);

            if !pinned {
                continue;
            }
            if holders.is_empty() {
                self.pieces[id.index()].beside_enemy_tied = false;
                self.log.record(GameEvent::Released { piece: id });
            } else {
                for by in holders {
                    self.tied_contacts[by].insert(id);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedDice;

    fn board(players: usize) -> Board {
        Board::new(&GameConfig::with_player_count(players)).unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let board = board(2);

        assert_eq!(board.pieces().len(), 2 * PIECES_PER_PLAYER);
        assert_eq!(board.pieces_at(Cell::new(6, 3)).len(), PIECES_PER_PLAYER);
        assert_eq!(board.pieces_at(Cell::new(0, 3)).len(), PIECES_PER_PLAYER);
        assert_eq!(board.squares().filter(|s| s.has_pieces()).count(), 2);

        for piece in board.player_pieces(PlayerId::new(1)) {
            assert_eq!(piece.position, Alias::new(100));
            assert!(piece.is_home());
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = GameConfig::new(vec![Color::Red, Color::Red]);
        assert_eq!(
            Board::new(&config).unwrap_err(),
            ConfigError::DuplicateColor(Color::Red)
        );
    }

    #[test]
    fn test_player_lookup() {
        let config = GameConfig::new(vec![Color::Yellow, Color::Blue, Color::Red]);
        let board = Board::new(&config).unwrap();

        assert_eq!(board.player_of(Color::Blue), Some(PlayerId::new(1)));
        assert_eq!(board.player_of(Color::Green), None);
        assert_eq!(board.color(PlayerId::new(2)), Ok(Color::Red));
        assert_eq!(board.home_cell(PlayerId::new(1)), Ok(Cell::new(3, 6)));
    }

    #[test]
    fn test_unseated_player_is_rejected() {
        let mut board = board(3);
        let absent = PlayerId::new(3);

        assert_eq!(board.color(absent), Err(RulesError::UnknownPlayer(absent)));
        assert_eq!(board.home_cell(absent), Err(RulesError::InvalidAlias(Alias::new(300))));
        assert_eq!(board.set_capture_flag(absent), Err(RulesError::UnknownPlayer(absent)));
        assert_eq!(board.clear_tied_contacts(absent), Err(RulesError::UnknownPlayer(absent)));
        assert!(!board.has_captured(absent));
    }

    #[test]
    fn test_fruit_cell_is_centre() {
        for players in 2..=4 {
            assert_eq!(board(players).fruit_cell(), Cell::new(3, 3));
        }
    }

    #[test]
    fn test_unknown_piece() {
        let board = board(2);
        assert_eq!(board.piece(PieceId(99)).unwrap_err(), RulesError::UnknownPiece(PieceId(99)));
    }

    #[test]
    fn test_roll_dice_records_chain() {
        let config = GameConfig::default();
        let mut board = Board::with_dice(&config, Box::new(ScriptedDice::new(vec![6, 2]))).unwrap();

        let throws = board.roll_dice(PlayerId::new(0));

        assert_eq!(throws.as_slice(), &[6, 2]);
        assert_eq!(board.remaining_roll().values(), &[6, 2]);
        assert!(matches!(
            board.history().back().map(|r| &r.event),
            Some(GameEvent::Rolled { bonus: false, .. })
        ));
    }

    #[test]
    fn test_inject_and_discard_roll() {
        let mut board = board(2);
        board.inject_roll(&[12, 4, 4, 2]);
        assert_eq!(board.remaining_roll().len(), 4);

        let left = board.discard_roll();
        assert_eq!(left.as_slice(), &[12, 4, 4, 2]);
        assert!(board.remaining_roll().is_empty());
    }

    #[test]
    fn test_place_piece() {
        let mut board = board(2);
        board.place_piece(PieceId(0), Alias::new(5)).unwrap();

        assert_eq!(board.piece_cell(PieceId(0)).unwrap(), Cell::new(4, 6));
        assert_eq!(board.pieces_at(Cell::new(4, 6)), &[PieceId(0)]);
        assert_eq!(board.pieces_at(Cell::new(6, 3)).len(), PIECES_PER_PLAYER - 1);
        assert!(board.piece(PieceId(0)).unwrap().moved);
    }

    #[test]
    fn test_place_piece_rejects_foreign_alias() {
        let mut board = board(2);
        assert!(matches!(
            board.place_piece(PieceId(0), Alias::new(105)),
            Err(RulesError::InvalidSetup(_))
        ));
        assert!(matches!(
            board.place_piece(PieceId(0), Alias::new(49)),
            Err(RulesError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_tie_pieces() {
        let mut board = board(2);
        board.place_piece(PieceId(0), Alias::new(30)).unwrap();
        board.place_piece(PieceId(1), Alias::new(30)).unwrap();

        let tied = board.tie_pieces(PieceId(0), PieceId(1)).unwrap();
        let cell = board.cell_of(Alias::new(30)).unwrap();

        assert_eq!(board.pieces_at(cell), &[tied]);
        assert!(board.piece(tied).unwrap().is_tied());
        assert!(!board.piece(PieceId(0)).unwrap().active);
        assert_eq!(board.player_pieces(PlayerId::new(0)).count(), PIECES_PER_PLAYER - 1);
    }

    #[test]
    fn test_tie_pieces_requires_same_cell() {
        let mut board = board(2);
        board.place_piece(PieceId(0), Alias::new(30)).unwrap();
        assert!(matches!(
            board.tie_pieces(PieceId(0), PieceId(1)),
            Err(RulesError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_has_player_finished_counts_tied_as_two() {
        let mut board = board(2);
        let red = PlayerId::new(0);
        let fruit = Alias::new(PLACES_TO_FRUIT);

        for id in 0..PIECES_PER_PLAYER as u16 {
            board.place_piece(PieceId(id), fruit).unwrap();
        }
        board.tie_pieces(PieceId(0), PieceId(1)).unwrap();

        assert!(board.has_player_finished(red));
        assert!(!board.has_player_finished(PlayerId::new(1)));
    }

    #[test]
    fn test_not_finished_with_five_pieces() {
        let mut board = board(3);
        for id in 0..(PIECES_PER_PLAYER - 1) as u16 {
            board.place_piece(PieceId(id), Alias::new(PLACES_TO_FRUIT)).unwrap();
        }
        assert!(!board.has_player_finished(PlayerId::new(0)));
    }
}
