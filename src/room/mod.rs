//! Room-scoped game state: actions, session, turn engine, win detection.

mod action;
mod engine;
mod session;
mod winner;

pub use action::{Action, ActionRecord};
pub use engine::{
    BoardView, GameRoom, PlayerBoardView, PlayerRecord, RoomView, Step, TurnOutcome, MAX_PLAYERS,
    MIN_PLAYERS,
};
pub use session::{Phase, RoomSession};
pub use winner::detect_winner;
