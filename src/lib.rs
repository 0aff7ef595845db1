//! # digit-duel
//!
//! Engine for a simultaneous-deployment, turn-based elimination board
//! game for 2-5 players. Each player secretly places ten digit pieces on
//! a personal 3×6 board, then advances them toward a shared public area
//! where pieces from different players resolve through pairwise duels
//! under a non-transitive ranking. The last player with pieces on their
//! board wins.
//!
//! ## Design Principles
//!
//! 1. **Snapshot semantics**: applying an action never mutates the
//!    current room; the engine returns a complete successor state the
//!    caller can persist transactionally. `im` collections keep clones
//!    cheap.
//!
//! 2. **Single-writer rooms**: the registry serializes all actions for
//!    one room behind a per-room lock; distinct rooms are independent.
//!
//! 3. **Thin boundary**: identity, transport, and durable storage live
//!    outside the crate. The engine consumes plain data records and
//!    trusts the supplied actor identity; persistence goes through the
//!    [`store::RoomStore`] trait.
//!
//! ## Modules
//!
//! - `core`: player/room ids, digits, errors, RNG
//! - `board`: the 3×6 grid, movement legality, redacted views
//! - `duel`: the pure pairwise duel resolver
//! - `settle`: the public-area settlement cascade
//! - `room`: actions, session, turn engine, win detection
//! - `store`: persistence boundary trait and the in-memory store
//! - `registry`: per-room serialized access to live rooms

pub mod board;
pub mod core;
pub mod duel;
pub mod registry;
pub mod room;
pub mod settle;
pub mod store;

// Re-export commonly used types
pub use crate::core::{Digit, GameError, GameRng, GameRngState, PlayerId, RoomId};

pub use crate::board::{Advance, Board, BoardOccupancy, CellId, Column};

pub use crate::duel::{resolve, DuelOutcome};

pub use crate::settle::{settle, Piece, Settlement};

pub use crate::room::{
    detect_winner, Action, ActionRecord, BoardView, GameRoom, Phase, PlayerBoardView,
    PlayerRecord, RoomSession, RoomView, Step, TurnOutcome,
};

pub use crate::store::{MemoryStore, RoomStore};

pub use crate::registry::RoomRegistry;
