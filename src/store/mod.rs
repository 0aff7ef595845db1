//! Persistence collaborator.
//!
//! The engine produces a complete state snapshot per action; durably
//! writing it is the caller's concern. [`RoomStore`] is the boundary
//! contract: fetch a room, fetch its players in seat order, persist a
//! player record or a session, and append an audit record. The engine is
//! agnostic to how a store is backed.
//!
//! [`MemoryStore`] is the in-process implementation used by tests and
//! single-node deployments. It keeps bincode-encoded payloads behind a
//! mutex-guarded table, which doubles as a check that every persisted type
//! survives a byte-level round trip.

use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::core::{GameError, PlayerId, RoomId};
use crate::room::{ActionRecord, PlayerRecord, RoomSession};

/// Boundary contract for the player/room store.
pub trait RoomStore: Send + Sync {
    /// Fetch a room's session by id.
    fn fetch_room(&self, room: &RoomId) -> Result<RoomSession, GameError>;

    /// Fetch the room's player records in seat order.
    fn fetch_players(&self, room: &RoomId) -> Result<Vec<(PlayerId, PlayerRecord)>, GameError>;

    /// Persist a room's session.
    fn persist_room(&self, room: &RoomId, session: &RoomSession) -> Result<(), GameError>;

    /// Persist one player's board and eliminated list.
    fn persist_player(
        &self,
        room: &RoomId,
        player: PlayerId,
        record: &PlayerRecord,
    ) -> Result<(), GameError>;

    /// Append an audit record of an action taken.
    fn append_action(&self, room: &RoomId, record: &ActionRecord) -> Result<(), GameError>;

    /// Read back the audit trail, oldest first.
    fn fetch_actions(&self, room: &RoomId) -> Result<Vec<ActionRecord>, GameError>;
}

#[derive(Default)]
struct StoredRoom {
    session: Vec<u8>,
    players: Vec<(PlayerId, Vec<u8>)>,
    audit: Vec<Vec<u8>>,
}

/// In-memory, bincode-backed store.
#[derive(Default)]
pub struct MemoryStore {
    rooms: Mutex<FxHashMap<RoomId, StoredRoom>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the store holds the given room.
    #[must_use]
    pub fn contains(&self, room: &RoomId) -> bool {
        self.rooms.lock().unwrap().contains_key(room)
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, GameError> {
    bincode::serialize(value)
        .map_err(|e| GameError::ContractViolation(format!("store encode failed: {}", e)))
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T, GameError> {
    bincode::deserialize(bytes)
        .map_err(|e| GameError::ContractViolation(format!("store decode failed: {}", e)))
}

impl RoomStore for MemoryStore {
    fn fetch_room(&self, room: &RoomId) -> Result<RoomSession, GameError> {
        let rooms = self.rooms.lock().unwrap();
        let stored = rooms
            .get(room)
            .ok_or_else(|| GameError::RoomNotFound(room.to_string()))?;
        decode(&stored.session)
    }

    fn fetch_players(&self, room: &RoomId) -> Result<Vec<(PlayerId, PlayerRecord)>, GameError> {
        let rooms = self.rooms.lock().unwrap();
        let stored = rooms
            .get(room)
            .ok_or_else(|| GameError::RoomNotFound(room.to_string()))?;
        stored
            .players
            .iter()
            .map(|(player, bytes)| Ok((*player, decode(bytes)?)))
            .collect()
    }

    fn persist_room(&self, room: &RoomId, session: &RoomSession) -> Result<(), GameError> {
        let bytes = encode(session)?;
        let mut rooms = self.rooms.lock().unwrap();
        rooms.entry(room.clone()).or_default().session = bytes;
        Ok(())
    }

    fn persist_player(
        &self,
        room: &RoomId,
        player: PlayerId,
        record: &PlayerRecord,
    ) -> Result<(), GameError> {
        let bytes = encode(record)?;
        let mut rooms = self.rooms.lock().unwrap();
        let stored = rooms.entry(room.clone()).or_default();
        match stored.players.iter_mut().find(|(p, _)| *p == player) {
            Some((_, slot)) => *slot = bytes,
            None => stored.players.push((player, bytes)),
        }
        Ok(())
    }

    fn append_action(&self, room: &RoomId, record: &ActionRecord) -> Result<(), GameError> {
        let bytes = encode(record)?;
        let mut rooms = self.rooms.lock().unwrap();
        rooms.entry(room.clone()).or_default().audit.push(bytes);
        Ok(())
    }

    fn fetch_actions(&self, room: &RoomId) -> Result<Vec<ActionRecord>, GameError> {
        let rooms = self.rooms.lock().unwrap();
        let stored = rooms
            .get(room)
            .ok_or_else(|| GameError::RoomNotFound(room.to_string()))?;
        stored.audit.iter().map(|bytes| decode(bytes)).collect()
    }
}
