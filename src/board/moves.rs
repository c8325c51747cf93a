//! Move values.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

use super::coord::Cell;

/// A move from one cell to another.
///
/// Equality and hashing look at the endpoints only, never at the tying
/// flag: an input layer that knows just where a drag started and ended can
/// match it against the computed candidates.
///
/// ```
/// use chowka_bhara::board::{Cell, Move};
///
/// let plain = Move::new(Cell::new(4, 1), Cell::new(3, 1));
/// let tying = Move::tying(Cell::new(4, 1), Cell::new(3, 1));
/// assert_eq!(plain, tying);
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Move {
    pub initial: Cell,
    pub final_cell: Cell,
    pub tying: bool,
}

impl Move {
    /// A plain move.
    #[must_use]
    pub const fn new(initial: Cell, final_cell: Cell) -> Self {
        Self {
            initial,
            final_cell,
            tying: false,
        }
    }

    /// A move that ties two singles on `initial` into one piece on `final_cell`.
    #[must_use]
    pub const fn tying(initial: Cell, final_cell: Cell) -> Self {
        Self {
            initial,
            final_cell,
            tying: true,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.initial == other.initial && self.final_cell == other.final_cell
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.initial.hash(state);
        self.final_cell.hash(state);
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.initial, self.final_cell)?;
        if self.tying {
            f.write_str(" (tie)")?;
        }
        Ok(())
    }
}
