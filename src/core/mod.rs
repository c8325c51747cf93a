//! Core engine types: players, configuration, errors, events, RNG.
//!
//! These are the building blocks shared by the board, the dice, the rules,
//! and the turn controller.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod event;

pub use player::{Color, PlayerId, PlayerMap, MAX_PLAYERS, MIN_PLAYERS};
pub use rng::{GameRng, GameRngState};
pub use config::{GameConfig, Stage, DEFAULT_MAX_REROLL_CHAIN, DEFAULT_SEED};
pub use error::{ConfigError, RulesError};
pub use event::{EventLog, EventRecord, GameEvent};
