//! Shell throws ("kawade") and the reroll chain.
//!
//! Four cowrie shells are thrown; the number landing mouth-up gives the
//! value, with none up scoring 12. The face weights below are the binomial
//! counts of the sixteen equally likely outcomes scaled to 64.
//!
//! Throwing 4, 6, or 12 earns another throw, so one kawade can add several
//! values to the roll.

use smallvec::SmallVec;

use super::roll::Roll;
use crate::core::{GameRng, GameRngState};

/// Possible throw values.
pub const FACES: [u8; 7] = [1, 2, 3, 4, 5, 6, 12];

/// Weight of each face, out of `WEIGHT_TOTAL`.
pub const FACE_WEIGHTS: [u32; 7] = [6, 15, 20, 15, 6, 1, 1];

/// Sum of `FACE_WEIGHTS`.
pub const WEIGHT_TOTAL: u32 = 64;

/// Values that grant another throw.
pub const REROLL_FACES: [u8; 3] = [4, 6, 12];

/// Whether `value` grants another throw.
#[must_use]
pub fn grants_reroll(value: u8) -> bool {
    REROLL_FACES.contains(&value)
}

/// A source of single shell throws.
pub trait DiceSource: std::fmt::Debug {
    /// Throw once, returning one of `FACES`.
    fn draw(&mut self) -> u8;
}

/// Weighted throws from a seeded ChaCha stream.
#[derive(Clone, Debug)]
pub struct ShellDice {
    rng: GameRng,
}

impl ShellDice {
    /// Dice seeded for the "kawade" stream of `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("kawade"),
        }
    }

    /// Capture the stream position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume from a captured stream position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self {
            rng: GameRng::from_state(state),
        }
    }
}

impl DiceSource for ShellDice {
    fn draw(&mut self) -> u8 {
        // Weights are non-zero, so an index is always drawn.
        let idx = self.rng.gen_weighted(&FACE_WEIGHTS).unwrap_or(0);
        FACES[idx]
    }
}

/// Throws replayed from a fixed script, cycling when exhausted.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: Vec<u8>,
    next: usize,
}

impl ScriptedDice {
    /// Replay `script` in order.
    ///
    /// Panics if the script is empty.
    #[must_use]
    pub fn new(script: Vec<u8>) -> Self {
        assert!(!script.is_empty(), "Dice script must not be empty");
        Self { script, next: 0 }
    }

    /// Throws handed out so far.
    #[must_use]
    pub fn drawn(&self) -> usize {
        self.next
    }
}

impl DiceSource for ScriptedDice {
    fn draw(&mut self) -> u8 {
        let value = self.script[self.next % self.script.len()];
        self.next += 1;
        value
    }
}

/// Throw once and keep throwing while the last value grants a reroll.
///
/// Every value is appended to `roll` and also returned. At most `max_chain`
/// values are drawn.
pub fn kawade(source: &mut dyn DiceSource, roll: &mut Roll, max_chain: usize) -> SmallVec<[u8; 4]> {
    let mut throws = SmallVec::new();

    while throws.len() < max_chain {
        let value = source.draw();
        roll.push(value);
        throws.push(value);
        if !grants_reroll(value) {
            break;
        }
    }

    throws
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_total() {
        assert_eq!(FACE_WEIGHTS.iter().sum::<u32>(), WEIGHT_TOTAL);
        assert_eq!(FACES.len(), FACE_WEIGHTS.len());
    }

    #[test]
    fn test_shell_dice_is_deterministic() {
        let mut a = ShellDice::new(11);
        let mut b = ShellDice::new(11);
        for _ in 0..200 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_shell_dice_state_roundtrip() {
        let mut dice = ShellDice::new(5);
        for _ in 0..10 {
            dice.draw();
        }
        let state = dice.state();
        let expected: Vec<_> = (0..20).map(|_| dice.draw()).collect();

        let mut resumed = ShellDice::from_state(&state);
        let actual: Vec<_> = (0..20).map(|_| resumed.draw()).collect();
        assert_eq!(expected, actual);
    }

    #[test]
    fn test_shell_dice_frequencies() {
        let mut dice = ShellDice::new(2024);
        let samples = 64_000;
        let mut counts = [0u32; 7];

        for _ in 0..samples {
            let value = dice.draw();
            let idx = FACES.iter().position(|&f| f == value).unwrap();
            counts[idx] += 1;
        }

        for (idx, &count) in counts.iter().enumerate() {
            let expected = samples as f64 * FACE_WEIGHTS[idx] as f64 / WEIGHT_TOTAL as f64;
            let tolerance = 5.0 * expected.sqrt() + 10.0;
            assert!(
                (count as f64 - expected).abs() < tolerance,
                "face {} drawn {} times, expected about {}",
                FACES[idx],
                count,
                expected
            );
        }
    }

    #[test]
    fn test_chain_stops_on_plain_value() {
        let mut dice = ScriptedDice::new(vec![4, 6, 12, 3, 5]);
        let mut roll = Roll::new();

        let throws = kawade(&mut dice, &mut roll, 64);

        assert_eq!(throws.as_slice(), &[4, 6, 12, 3]);
        assert_eq!(roll.values(), &[4, 6, 12, 3]);
        assert_eq!(dice.drawn(), 4);
    }

    #[test]
    fn test_chain_appends_to_existing_roll() {
        let mut dice = ScriptedDice::new(vec![2]);
        let mut roll = Roll::from_values(&[5]);

        kawade(&mut dice, &mut roll, 64);

        assert_eq!(roll.values(), &[5, 2]);
    }

    #[test]
    fn test_chain_is_capped() {
        let mut dice = ScriptedDice::new(vec![12]);
        let mut roll = Roll::new();

        let throws = kawade(&mut dice, &mut roll, 5);

        assert_eq!(throws.len(), 5);
        assert!(roll.values().iter().all(|&v| v == 12));
    }

    #[test]
    fn test_scripted_dice_cycles() {
        let mut dice = ScriptedDice::new(vec![1, 2]);
        let drawn: Vec<_> = (0..5).map(|_| dice.draw()).collect();
        assert_eq!(drawn, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    #[should_panic(expected = "Dice script must not be empty")]
    fn test_scripted_dice_empty() {
        let _ = ScriptedDice::new(Vec::new());
    }
}
