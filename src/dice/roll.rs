//! The pending roll: a multiset of move lengths.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Move lengths the active player still has to spend.
///
/// Duplicates are separate tokens: a roll of `[2, 2]` allows two moves of 2.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roll {
    values: SmallVec<[u8; 8]>,
}

impl Roll {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_values(values: &[u8]) -> Self {
        Self {
            values: SmallVec::from_slice(values),
        }
    }

    pub fn push(&mut self, value: u8) {
        self.values.push(value);
    }

    /// Consume one token equal to `value`. Returns false if none is left.
    pub fn remove(&mut self, value: u8) -> bool {
        match self.values.iter().position(|&v| v == value) {
            Some(idx) => {
                self.values.remove(idx);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn contains(&self, value: u8) -> bool {
        self.values.contains(&value)
    }

    /// Values in the order they were drawn.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Values ascending, duplicates kept.
    #[must_use]
    pub fn sorted(&self) -> SmallVec<[u8; 8]> {
        let mut sorted = self.values.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Last value drawn.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.values.last().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Empty the roll, returning what was left.
    pub fn take(&mut self) -> SmallVec<[u8; 4]> {
        self.values.drain(..).collect()
    }
}

impl std::fmt::Display for Roll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.values.iter().map(u8::to_string).collect();
        f.write_str(&parts.join(","))
    }
}
