//! Dice: the kawade throw, the reroll chain, and the pending roll.
//!
//! Randomness enters only through `DiceSource`. `ShellDice` is the seeded
//! production source; `ScriptedDice` replays a fixed sequence so tests and
//! puzzles are reproducible.

pub mod roll;
pub mod kawade;

pub use roll::Roll;
pub use kawade::{
    grants_reroll, kawade, DiceSource, ScriptedDice, ShellDice, FACES, FACE_WEIGHTS, REROLL_FACES,
    WEIGHT_TOTAL,
};
