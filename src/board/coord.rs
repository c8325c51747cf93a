//! Board geometry and per-player path numbering.
//!
//! ## Base path
//!
//! `BASE_GRID` numbers the 49 cells along the route of the player seated at
//! index 0: alias 0 is the start cell (bottom middle), aliases 0-23 walk the
//! outer ring counter-clockwise, 24-47 spiral through the inner arm, and 48
//! is the fruit at the center.
//!
//! ## Player paths
//!
//! Player `i` sees the base grid rotated counter-clockwise by `i` quarter
//! turns (two quarter turns per seat in a 2-player game, so opponents start
//! across the board), with `i * PLAYER_OFFSET` added to every number. The
//! mapping is computed with direct coordinate transforms; no rotated grid is
//! ever materialized.
//!
//! ```
//! use chowka_bhara::board::{Alias, Cell, PathMap};
//! use chowka_bhara::core::PlayerId;
//!
//! let paths = PathMap::new(2);
//! assert_eq!(paths.alias_of(PlayerId::new(0), Cell::new(6, 3)), Alias::new(0));
//! assert_eq!(paths.alias_of(PlayerId::new(1), Cell::new(0, 3)), Alias::new(100));
//! assert_eq!(paths.cell_of(Alias::new(148)).unwrap(), Cell::new(3, 3));
//! ```

use serde::{Deserialize, Serialize};

use crate::core::{PlayerId, RulesError};

/// Rows on the board.
pub const ROWS: u8 = 7;

/// Columns on the board.
pub const COLS: u8 = 7;

/// Number of cells on the board.
pub const SQUARES: usize = ROWS as usize * COLS as usize;

/// Alias distance between consecutive players' numberings.
pub const PLAYER_OFFSET: u16 = 100;

/// Last path offset of the outer ring.
pub const PLACES_BEFORE_INNER: u16 = 23;

/// Path offset of the fruit (finish) cell.
pub const PLACES_TO_FRUIT: u16 = 48;

/// Path numbering for player 0.
pub const BASE_GRID: [[u8; COLS as usize]; ROWS as usize] = [
    [15, 14, 13, 12, 11, 10, 9],
    [16, 28, 29, 30, 31, 32, 8],
    [17, 27, 42, 43, 44, 33, 7],
    [18, 26, 41, 48, 45, 34, 6],
    [19, 25, 40, 47, 46, 35, 5],
    [20, 24, 39, 38, 37, 36, 4],
    [21, 22, 23, 0, 1, 2, 3],
];

/// Cell of each base path offset: `BASE_PATH[offset]` is the cell numbered
/// `offset` in `BASE_GRID`.
pub const BASE_PATH: [Cell; SQUARES] = invert_base_grid();

/// Cells where pieces cannot be captured.
pub const SAFE_HOUSES: [Cell; 13] = [
    Cell::new(0, 0),
    Cell::new(0, 3),
    Cell::new(0, 6),
    Cell::new(1, 1),
    Cell::new(1, 5),
    Cell::new(3, 0),
    Cell::new(3, 3),
    Cell::new(3, 6),
    Cell::new(5, 1),
    Cell::new(5, 5),
    Cell::new(6, 0),
    Cell::new(6, 3),
    Cell::new(6, 6),
];

const fn invert_base_grid() -> [Cell; SQUARES] {
    let mut path = [Cell::new(0, 0); SQUARES];
    let mut row = 0;
    while row < ROWS as usize {
        let mut col = 0;
        while col < COLS as usize {
            path[BASE_GRID[row][col] as usize] = Cell::new(row as u8, col as u8);
            col += 1;
        }
        row += 1;
    }
    path
}

/// A physical board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

impl Cell {
    /// Create a cell without range checking.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Create a cell, failing if it lies outside the board.
    pub fn try_new(row: u8, col: u8) -> Result<Self, RulesError> {
        if row < ROWS && col < COLS {
            Ok(Self::new(row, col))
        } else {
            Err(RulesError::CellOutOfRange { row, col })
        }
    }

    /// Iterate over every cell, row by row.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Cell::new(row, col)))
    }

    /// Whether this cell is one of the capture-immune safe houses.
    #[must_use]
    pub fn is_safe_house(self) -> bool {
        SAFE_HOUSES.contains(&self)
    }

    /// Index into a row-major cell array.
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * COLS as usize + self.col as usize
    }

    /// Column letter used in cell notation (`a` for column 0).
    #[must_use]
    pub const fn file(self) -> char {
        (b'a' + self.col) as char
    }

    /// Row number used in cell notation (1 for the bottom row).
    #[must_use]
    pub const fn rank(self) -> u8 {
        ROWS - self.row
    }

    /// The cell this one came from after rotating the board
    /// counter-clockwise by `quarter_turns`.
    const fn rotated_source(self, quarter_turns: u8) -> Cell {
        let last = ROWS - 1;
        match quarter_turns % 4 {
            0 => self,
            1 => Cell::new(self.col, last - self.row),
            2 => Cell::new(last - self.row, last - self.col),
            _ => Cell::new(last - self.col, self.row),
        }
    }

    /// Where this cell ends up after rotating the board counter-clockwise by
    /// `quarter_turns`. Inverse of `rotated_source`.
    const fn rotated_target(self, quarter_turns: u8) -> Cell {
        let last = ROWS - 1;
        match quarter_turns % 4 {
            0 => self,
            1 => Cell::new(last - self.col, self.row),
            2 => Cell::new(last - self.row, last - self.col),
            _ => Cell::new(self.col, last - self.row),
        }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// A player-relative path position.
///
/// `alias / PLAYER_OFFSET` is the owning player's index and
/// `alias % PLAYER_OFFSET` the offset along that player's path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Alias(pub u16);

impl Alias {
    /// Create an alias from its raw value.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Alias at `offset` along `player`'s path.
    #[must_use]
    pub const fn for_player(player: PlayerId, offset: u16) -> Self {
        Self(player.0 as u16 * PLAYER_OFFSET + offset)
    }

    /// Start of `player`'s path.
    #[must_use]
    pub const fn home(player: PlayerId) -> Self {
        Self::for_player(player, 0)
    }

    /// Raw value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Offset along the owning player's path.
    #[must_use]
    pub const fn offset(self) -> u16 {
        self.0 % PLAYER_OFFSET
    }

    /// Index of the player whose numbering this alias belongs to.
    #[must_use]
    pub const fn player_index(self) -> usize {
        (self.0 / PLAYER_OFFSET) as usize
    }

    /// Whether the position lies past the outer ring.
    #[must_use]
    pub const fn is_inner(self) -> bool {
        self.offset() > PLACES_BEFORE_INNER
    }

    /// The alias `places` further along the same path.
    #[must_use]
    pub const fn advanced(self, places: u16) -> Self {
        Self(self.0 + places)
    }

    /// Number of places from `earlier` to `self`.
    #[must_use]
    pub const fn distance_from(self, earlier: Alias) -> u16 {
        self.0.saturating_sub(earlier.0)
    }
}

impl std::fmt::Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Bidirectional mapping between cells and every player's aliases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathMap {
    player_count: usize,
    turns_per_seat: u8,
}

impl PathMap {
    /// Build the mapping for `player_count` players.
    ///
    /// Panics if `player_count` is not between 1 and 4.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        assert!((1..=4).contains(&player_count), "Path mapping supports 1-4 players");

        Self {
            player_count,
            turns_per_seat: if player_count == 2 { 2 } else { 1 },
        }
    }

    /// Number of players mapped.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    fn quarter_turns(&self, player: PlayerId) -> u8 {
        (player.0 * self.turns_per_seat) % 4
    }

    /// Alias of `cell` in `player`'s numbering.
    #[must_use]
    pub fn alias_of(&self, player: PlayerId, cell: Cell) -> Alias {
        let source = cell.rotated_source(self.quarter_turns(player));
        let base = BASE_GRID[source.row as usize][source.col as usize];
        Alias::for_player(player, u16::from(base))
    }

    /// Cell named by `alias` in its owner's numbering.
    pub fn cell_of(&self, alias: Alias) -> Result<Cell, RulesError> {
        let player_index = alias.player_index();
        if player_index >= self.player_count || alias.offset() > PLACES_TO_FRUIT {
            return Err(RulesError::InvalidAlias(alias));
        }

        let player = PlayerId::new(player_index as u8);
        let base = BASE_PATH[alias.offset() as usize];
        Ok(base.rotated_target(self.quarter_turns(player)))
    }

    /// Start cell of every mapped player, in seat order.
    pub fn homes(&self) -> impl Iterator<Item = (PlayerId, Cell)> + '_ {
        PlayerId::all(self.player_count)
            .map(move |player| (player, BASE_PATH[0].rotated_target(self.quarter_turns(player))))
    }

    /// Whether `alias` belongs to one of the mapped players.
    #[must_use]
    pub fn is_valid(&self, alias: Alias) -> bool {
        self.cell_of(alias).is_ok()
    }
}
