//! The per-room session: phase, round, turn pointer, public area.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::PlayerId;
use crate::settle::Piece;

/// Room lifecycle phase. `Finished` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Players are joining and deploying boards.
    Waiting,
    /// The game is running; actions are accepted.
    Playing,
    /// A winner was found; no further actions are accepted.
    Finished,
}

/// Authoritative per-room game session.
///
/// Turn order is fixed once at game start and immutable thereafter; the
/// turn pointer indexes into it and wraps modulo the player count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSession {
    /// Current lifecycle phase.
    pub phase: Phase,
    /// Monotonic round counter, 1-based once playing.
    pub current_round: u32,
    /// 0-based index into `turn_order`.
    pub current_turn: usize,
    /// Shuffled permutation of the participating players.
    pub turn_order: Vec<PlayerId>,
    /// Shared pieces awaiting settlement, in arrival order.
    pub public_area: Vector<Piece>,
    /// Bonus-action eligibility from the last settlement's sole survivor.
    /// Recorded for callers; turn advancement ignores it.
    pub pending_extra_action: Option<PlayerId>,
}

impl RoomSession {
    /// Create a waiting session with no turn order yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: Phase::Waiting,
            current_round: 1,
            current_turn: 0,
            turn_order: Vec::new(),
            public_area: Vector::new(),
            pending_extra_action: None,
        }
    }

    /// Enter the playing phase with the given (already shuffled) order.
    pub(crate) fn begin(&mut self, turn_order: Vec<PlayerId>) {
        debug_assert!(turn_order.len() >= 2);
        self.phase = Phase::Playing;
        self.current_round = 1;
        self.current_turn = 0;
        self.turn_order = turn_order;
        self.public_area = Vector::new();
        self.pending_extra_action = None;
    }

    /// Number of players in the turn order.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.turn_order.len()
    }

    /// The player whose turn it is, if the game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        if self.phase != Phase::Playing {
            return None;
        }
        self.turn_order.get(self.current_turn).copied()
    }
}

impl Default for RoomSession {
    fn default() -> Self {
        Self::new()
    }
}
