//! Game configuration types.
//!
//! A game is configured once at startup:
//! - the ordered seat colors (2-4 distinct colors; the order fixes each
//!   player's index, board rotation, and alias offset)
//! - the dice seed
//! - the reroll chain cap

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::player::{Color, MAX_PLAYERS, MIN_PLAYERS};

/// Default seed for the dice stream.
pub const DEFAULT_SEED: u64 = 42;

/// Default cap on draws in a single reroll chain.
pub const DEFAULT_MAX_REROLL_CHAIN: usize = 64;

/// Turn stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The active player must throw the shells.
    #[default]
    Roll,
    /// The active player spends the values in the roll.
    MakeMove,
}

/// Complete game configuration.
///
/// ```
/// use chowka_bhara::core::{Color, GameConfig};
///
/// let config = GameConfig::new(vec![Color::Red, Color::Blue]).with_seed(7);
/// assert_eq!(config.player_count(), 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seat colors in turn order.
    pub players: Vec<Color>,

    /// Seed for the dice stream.
    /// Same seed produces the same throws.
    pub seed: u64,

    /// Maximum draws in one reroll chain.
    pub max_reroll_chain: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::with_player_count(2)
    }
}

impl GameConfig {
    /// Create a configuration for the given seats.
    pub fn new(players: Vec<Color>) -> Self {
        Self {
            players,
            seed: DEFAULT_SEED,
            max_reroll_chain: DEFAULT_MAX_REROLL_CHAIN,
        }
    }

    /// Create a configuration seating the first `count` colors.
    pub fn with_player_count(count: usize) -> Self {
        Self::new(Color::first(count.min(Color::ALL.len())))
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reroll chain cap.
    #[must_use]
    pub fn with_max_reroll_chain(mut self, max: usize) -> Self {
        self.max_reroll_chain = max;
        self
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Check player count, color uniqueness, and the chain cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(ConfigError::PlayerCount(count));
        }

        for (i, color) in self.players.iter().enumerate() {
            if self.players[..i].contains(color) {
                return Err(ConfigError::DuplicateColor(*color));
            }
        }

        if self.max_reroll_chain == 0 {
            return Err(ConfigError::RerollChain);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.players, vec![Color::Red, Color::Green]);
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.max_reroll_chain, DEFAULT_MAX_REROLL_CHAIN);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GameConfig::with_player_count(4)
            .with_seed(99)
            .with_max_reroll_chain(8);

        assert_eq!(config.player_count(), 4);
        assert_eq!(config.seed, 99);
        assert_eq!(config.max_reroll_chain, 8);
    }

    #[test]
    fn test_validate_player_count() {
        let one = GameConfig::new(vec![Color::Red]);
        assert_eq!(one.validate(), Err(ConfigError::PlayerCount(1)));

        let five = GameConfig::new(vec![
            Color::Red,
            Color::Green,
            Color::Blue,
            Color::Yellow,
            Color::Red,
        ]);
        assert_eq!(five.validate(), Err(ConfigError::PlayerCount(5)));
    }

    #[test]
    fn test_validate_duplicate_color() {
        let config = GameConfig::new(vec![Color::Blue, Color::Red, Color::Blue]);
        assert_eq!(config.validate(), Err(ConfigError::DuplicateColor(Color::Blue)));
    }

    #[test]
    fn test_validate_chain_cap() {
        let config = GameConfig::default().with_max_reroll_chain(0);
        assert_eq!(config.validate(), Err(ConfigError::RerollChain));
    }

    #[test]
    fn test_config_serde() {
        let config = GameConfig::with_player_count(3).with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_stage_default() {
        assert_eq!(Stage::default(), Stage::Roll);
    }
}
