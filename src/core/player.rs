//! Player and room identification.
//!
//! The engine never allocates player identities. The surrounding
//! identity/session layer resolves "who is making this call" and hands the
//! engine an opaque `PlayerId`; the engine trusts it.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a player, assigned by the identity layer.
///
/// Unlike a seat index, `PlayerId` values carry no ordering meaning.
/// Turn order is a separate permutation of the participating ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a player ID from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for PlayerId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player({})", self.0)
    }
}

/// Identifier for a room: the short join code players type in.
///
/// Codes are generated by the registry (see [`crate::core::GameRng::room_code`]);
/// the engine treats them as opaque keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoomId(pub String);

impl RoomId {
    /// Wrap an existing code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoomId {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p = PlayerId::new(7);
        assert_eq!(p.raw(), 7);
        assert_eq!(format!("{}", p), "Player(7)");
        assert_eq!(PlayerId::from(7), p);
    }

    #[test]
    fn test_room_id_display() {
        let room = RoomId::from("aB3x");
        assert_eq!(room.as_str(), "aB3x");
        assert_eq!(format!("{}", room), "aB3x");
    }

    #[test]
    fn test_player_id_serialization() {
        let p = PlayerId::new(42);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "42");
        let back: PlayerId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
