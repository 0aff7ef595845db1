//! Core identifiers, digits, errors, and RNG.

mod digit;
mod error;
mod player;
mod rng;

pub use digit::{Digit, DigitOutOfRange};
pub use error::GameError;
pub use player::{PlayerId, RoomId};
pub use rng::{GameRng, GameRngState};
