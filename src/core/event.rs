//! Game events and the recorded history.
//!
//! Every state change made by the board or the turn controller is recorded
//! as a `GameEvent` wrapped in an `EventRecord` carrying the turn number and
//! a sequence number within the turn. The history is kept in a persistent
//! `im::Vector` so snapshots of it are O(1) to clone.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Cell, PieceId};

use super::player::PlayerId;

/// Something that happened during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A kawade chain was thrown. `bonus` is set for capture rerolls.
    Rolled {
        player: PlayerId,
        throws: SmallVec<[u8; 4]>,
        bonus: bool,
    },
    /// A piece moved `length` places along its owner's path.
    Moved {
        piece: PieceId,
        from: Cell,
        to: Cell,
        length: u8,
    },
    /// Two singles were tied into one piece.
    Tied {
        parts: [PieceId; 2],
        tied: PieceId,
        at: Cell,
    },
    /// An enemy piece was sent home.
    Captured {
        by: PlayerId,
        piece: PieceId,
        owner: PlayerId,
        at: Cell,
    },
    /// A single landed beside an enemy tied piece and is immobilized.
    Pinned { piece: PieceId, by: PlayerId },
    /// A previously pinned single may move again.
    Released { piece: PieceId },
    /// A player brought all their pieces to the fruit.
    Finished { player: PlayerId, place: usize },
    /// The rest of a roll was discarded.
    Forfeited {
        player: PlayerId,
        discarded: SmallVec<[u8; 4]>,
    },
    /// The turn passed from one player to the next.
    TurnPassed { from: PlayerId, to: PlayerId },
}

/// A recorded event with ordering metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Turn number when the event happened (starts at 1).
    pub turn: u32,

    /// Sequence number within the turn.
    pub sequence: u32,

    /// The event.
    pub event: GameEvent,
}

/// Append-only event history with turn bookkeeping.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventLog {
    turn: u32,
    sequence: u32,
    records: Vector<EventRecord>,
}

impl Default for EventLog {
    fn default() -> Self {
        Self {
            turn: 1,
            sequence: 0,
            records: Vector::new(),
        }
    }
}

impl EventLog {
    /// Create an empty log at turn 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event in the current turn.
    pub fn record(&mut self, event: GameEvent) {
        self.records.push_back(EventRecord {
            turn: self.turn,
            sequence: self.sequence,
            event,
        });
        self.sequence += 1;
    }

    /// Start the next turn.
    pub fn advance_turn(&mut self) {
        self.turn += 1;
        self.sequence = 0;
    }

    /// Current turn number.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> &Vector<EventRecord> {
        &self.records
    }

    /// Records belonging to a given turn.
    pub fn turn_records(&self, turn: u32) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| r.turn == turn)
    }
}
