//! Player identification, seat colors, and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index in the ordered player list (0-based). The index drives the
//! board rotation and the alias offset of every piece the player owns.
//!
//! ## Color
//!
//! The seat color chosen for a player. Colors are labels only: all rules
//! are expressed in terms of `PlayerId`.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Minimum number of players at the table.
pub const MIN_PLAYERS: usize = 2;

/// Maximum number of players at the table.
pub const MAX_PLAYERS: usize = 4;

/// Player identifier: the seat index in the ordered player list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use chowka_bhara::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }

    /// The seat after this one, wrapping around the table.
    #[must_use]
    pub const fn next(self, player_count: usize) -> Self {
        Self(((self.0 as usize + 1) % player_count) as u8)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Seat color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    /// All colors in seating order.
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// The first `count` colors in seating order.
    ///
    /// Panics if `count` exceeds the number of colors.
    #[must_use]
    pub fn first(count: usize) -> Vec<Color> {
        assert!(count <= Self::ALL.len(), "At most {} colors available", Self::ALL.len());
        Self::ALL[..count].to_vec()
    }

    /// Lowercase name, used for asset and display lookups.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use chowka_bhara::core::{PlayerId, PlayerMap};
///
/// let mut captured: PlayerMap<bool> = PlayerMap::with_value(2, false);
/// captured[PlayerId::new(1)] = true;
/// assert!(!captured[PlayerId::new(0)]);
/// assert!(captured[PlayerId::new(1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Create a new PlayerMap with default values.
    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.index(), 0);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p0), "Player 0");
    }

    #[test]
    fn test_player_id_next_wraps() {
        assert_eq!(PlayerId::new(0).next(2), PlayerId::new(1));
        assert_eq!(PlayerId::new(1).next(2), PlayerId::new(0));
        assert_eq!(PlayerId::new(3).next(4), PlayerId::new(0));
    }

    #[test]
    fn test_color_first() {
        assert_eq!(Color::first(2), vec![Color::Red, Color::Green]);
        assert_eq!(Color::first(4).len(), 4);
        assert_eq!(Color::Blue.to_string(), "blue");
    }

    #[test]
    #[should_panic(expected = "At most 4 colors available")]
    fn test_color_first_too_many() {
        let _ = Color::first(5);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<u16> = PlayerMap::new(4, |p| p.index() as u16 * 100);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(3)], 300);
        assert_eq!(map.player_count(), 4);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<bool> = PlayerMap::with_value(3, false);
        map[PlayerId::new(2)] = true;

        let flagged: Vec<_> = map.iter().filter(|(_, v)| **v).map(|(p, _)| p).collect();
        assert_eq!(flagged, vec![PlayerId::new(2)]);
    }

    #[test]
    fn test_player_map_serialization() {
        let map: PlayerMap<i32> = PlayerMap::new(2, |p| p.index() as i32 + 1);
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: PlayerMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::with_value(0, 0);
    }
}
