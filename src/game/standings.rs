//! Final ranking of a completed game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Players in the order they finished. The last entry is the player left on
/// the board when everyone else had finished.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    order: Vec<PlayerId>,
}

impl Standings {
    pub(crate) fn new(order: Vec<PlayerId>) -> Self {
        Self { order }
    }

    /// First player to finish.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.order.first().copied()
    }

    /// The player who did not finish.
    #[must_use]
    pub fn last(&self) -> Option<PlayerId> {
        self.order.last().copied()
    }

    /// 1-based finishing place of `player`.
    #[must_use]
    pub fn place_of(&self, player: PlayerId) -> Option<usize> {
        self.order.iter().position(|&p| p == player).map(|i| i + 1)
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    /// All players, best first.
    #[must_use]
    pub fn order(&self) -> &[PlayerId] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standings_queries() {
        let standings = Standings::new(vec![PlayerId::new(2), PlayerId::new(0), PlayerId::new(1)]);

        assert_eq!(standings.winner(), Some(PlayerId::new(2)));
        assert_eq!(standings.last(), Some(PlayerId::new(1)));
        assert_eq!(standings.place_of(PlayerId::new(0)), Some(2));
        assert_eq!(standings.place_of(PlayerId::new(3)), None);
        assert!(standings.is_winner(PlayerId::new(2)));
        assert!(!standings.is_winner(PlayerId::new(0)));
    }
}
