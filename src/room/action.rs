//! Player actions and the audit trail.
//!
//! One action per turn, always attributed to the player at the current
//! turn pointer. The serde representation tags the kind so stored audit
//! records and transport payloads read as
//! `{"kind": "forward", "cell": "1A"}`.

use serde::{Deserialize, Serialize};

use crate::board::CellId;
use crate::core::PlayerId;

/// A single game action.
///
/// An unknown kind cannot be constructed: it is rejected at the serde
/// boundary as a deserialization error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Action {
    /// Advance the piece on `cell` one row, or into the public area from
    /// the front row.
    Forward {
        /// The caller's cell holding the piece to move.
        cell: CellId,
    },
    /// Force an opposing piece into the public area and settle immediately.
    Challenge {
        /// The challenged player.
        target: PlayerId,
        /// The challenged player's occupied cell.
        cell: CellId,
    },
    /// Pull one of the caller's own public-area pieces back onto the board.
    Recycle {
        /// Index among the caller's own pieces in the public area.
        piece_index: usize,
        /// An empty cell on the caller's board.
        cell: CellId,
    },
    /// Do nothing; only advances the turn.
    Pass,
}

impl Action {
    /// The action kind as a stable string, for logs and audit records.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Forward { .. } => "forward",
            Action::Challenge { .. } => "challenge",
            Action::Recycle { .. } => "recycle",
            Action::Pass => "pass",
        }
    }
}

/// An applied action with attribution, for the audit trail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub actor: PlayerId,
    /// The action taken.
    pub action: Action,
    /// Round in which the action was taken.
    pub round: u32,
    /// Turn pointer at the time of the action.
    pub turn: usize,
}

impl ActionRecord {
    /// Create a record.
    #[must_use]
    pub fn new(actor: PlayerId, action: Action, round: u32, turn: usize) -> Self {
        Self {
            actor,
            action,
            round,
            turn,
        }
    }
}
