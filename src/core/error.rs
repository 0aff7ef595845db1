//! Caller-visible engine errors.
//!
//! Every variant except [`GameError::ContractViolation`] is an ordinary,
//! non-retryable rule violation, suitable for echoing back to the acting
//! player. `ContractViolation` marks a defensive invariant breach (e.g. a
//! turn order referencing an unknown player); callers should alert on it
//! rather than display it as a game message.

use crate::board::CellId;
use crate::core::PlayerId;

/// Errors produced by the game engine, room registry, and store.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// No room exists under the given code.
    #[error("room {0} not found")]
    RoomNotFound(String),

    /// An action was submitted while the room was not in the playing phase.
    #[error("game is not in progress")]
    GameNotInProgress,

    /// The game has already left the waiting phase.
    #[error("game has already started")]
    GameAlreadyStarted,

    /// The acting player is not the player at the current turn pointer.
    #[error("not your turn")]
    NotYourTurn,

    /// A move named a cell with no piece on it.
    #[error("no piece at cell {cell}")]
    EmptyCell { cell: CellId },

    /// The cell ahead of the moving piece is occupied.
    #[error("cell {cell} is occupied")]
    Blocked { cell: CellId },

    /// A challenge or recycle named a nonexistent or wrongly-occupied cell.
    #[error("invalid target cell {cell}")]
    InvalidTargetCell { cell: CellId },

    /// A recycle named a public-area piece index out of range.
    #[error("piece index {index} out of range ({available} available)")]
    InvalidPieceIndex { index: usize, available: usize },

    /// The player is not seated in the room.
    #[error("{player} is not in this room")]
    UnknownPlayer { player: PlayerId },

    /// The room is at its seat limit.
    #[error("room is full ({max} players)")]
    RoomFull { max: usize },

    /// A room was configured outside the 2-5 player range.
    #[error("player count must be 2-5, got {requested}")]
    InvalidPlayerCount { requested: usize },

    /// The game cannot start with fewer than two seated players.
    #[error("need at least 2 players, have {seated}")]
    NotEnoughPlayers { seated: usize },

    /// A deployed board did not hold exactly ten pieces.
    #[error("board must have exactly 10 pieces placed, got {placed}")]
    IncompleteDeployment { placed: usize },

    /// Defensive invariant breach; alert, do not display as a game message.
    #[error("engine contract violated: {0}")]
    ContractViolation(String),
}

impl GameError {
    /// True for defensive breaches, false for ordinary rule violations.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, GameError::ContractViolation(_))
    }
}
