//! Turn control and final ranking.
//!
//! `Game` wraps a `Board` with the turn structure: rolling, moving,
//! forfeiting, passing the turn, and tracking finishers. `Standings` is the
//! ranking of a completed game.

pub mod controller;
pub mod standings;

pub use controller::Game;
pub use standings::Standings;
