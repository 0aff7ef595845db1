//! Room registry: the single source of truth for live rooms.
//!
//! Each room is a single-writer domain. The registry keys one mutex per
//! room id: submitting an action locks only that room, applies the engine,
//! and swaps in the returned snapshot, so concurrent submissions for one
//! room serialize while distinct rooms proceed in parallel. There is no
//! secondary cache to reconcile; the registry's copy is authoritative and
//! callers persist snapshots through a [`crate::store::RoomStore`] as they
//! see fit.

use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;
use tracing::{debug, info, instrument, warn};

use crate::board::Board;
use crate::core::{GameError, GameRng, PlayerId, RoomId};
use crate::room::{Action, GameRoom, TurnOutcome};

/// Length of generated room join codes.
const ROOM_CODE_LEN: usize = 4;

/// Attempts at generating an unused code before giving up.
const CODE_ATTEMPTS: usize = 100;

/// Registry of live rooms, shareable across threads.
#[derive(Clone)]
pub struct RoomRegistry {
    rooms: Arc<RwLock<FxHashMap<RoomId, Arc<Mutex<GameRoom>>>>>,
    rng: Arc<Mutex<GameRng>>,
}

impl RoomRegistry {
    /// Create a registry with a seeded RNG (deterministic codes and
    /// turn orders; use [`RoomRegistry::from_entropy`] in production).
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_rng(GameRng::new(seed))
    }

    /// Create a registry seeded from the operating system.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::with_rng(GameRng::from_entropy())
    }

    /// Create a registry around an existing RNG.
    #[must_use]
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(FxHashMap::default())),
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Number of live rooms.
    #[must_use]
    pub fn room_count(&self) -> usize {
        self.rooms.read().unwrap().len()
    }

    /// Create a room and return its join code.
    #[instrument(skip(self))]
    pub fn create(&self, max_players: usize) -> Result<RoomId, GameError> {
        let room = GameRoom::new(max_players)?;
        let mut rooms = self.rooms.write().unwrap();

        let mut rng = self.rng.lock().unwrap();
        for _ in 0..CODE_ATTEMPTS {
            let id = RoomId::new(rng.room_code(ROOM_CODE_LEN));
            if rooms.contains_key(&id) {
                continue;
            }
            info!(room = %id, max_players, "room created");
            rooms.insert(id.clone(), Arc::new(Mutex::new(room)));
            return Ok(id);
        }
        warn!("room code space exhausted after {} attempts", CODE_ATTEMPTS);
        Err(GameError::ContractViolation(
            "failed to generate an unused room code".to_string(),
        ))
    }

    /// Drop a room from the registry.
    pub fn remove(&self, room: &RoomId) -> Result<(), GameError> {
        let mut rooms = self.rooms.write().unwrap();
        rooms
            .remove(room)
            .map(|_| ())
            .ok_or_else(|| GameError::RoomNotFound(room.to_string()))
    }

    /// Clone the room's current snapshot, e.g. to render a view.
    pub fn snapshot(&self, room: &RoomId) -> Result<GameRoom, GameError> {
        let handle = self.handle(room)?;
        let guard = handle.lock().unwrap();
        Ok(guard.clone())
    }

    /// Seat a player in a waiting room.
    #[instrument(skip(self))]
    pub fn join(&self, room: &RoomId, player: PlayerId) -> Result<(), GameError> {
        self.with_room(room, |r| r.join(player))
    }

    /// Unseat a player from a waiting room.
    #[instrument(skip(self))]
    pub fn leave(&self, room: &RoomId, player: PlayerId) -> Result<(), GameError> {
        self.with_room(room, |r| r.leave(player))
    }

    /// Accept a player's deployed board.
    #[instrument(skip(self, board))]
    pub fn deploy(&self, room: &RoomId, player: PlayerId, board: Board) -> Result<(), GameError> {
        self.with_room(room, |r| r.deploy(player, board))
    }

    /// Start the game in a waiting room.
    #[instrument(skip(self))]
    pub fn start(&self, room: &RoomId) -> Result<(), GameError> {
        let handle = self.handle(room)?;
        let mut guard = handle.lock().unwrap();
        let mut rng = self.rng.lock().unwrap();
        guard.start(&mut rng)
    }

    /// Apply one game action under the room's lock.
    ///
    /// The engine produces a successor snapshot; on success it replaces
    /// the registry's copy atomically.
    #[instrument(skip(self, action), fields(kind = action.kind()))]
    pub fn submit(
        &self,
        room: &RoomId,
        actor: PlayerId,
        action: &Action,
    ) -> Result<TurnOutcome, GameError> {
        let handle = self.handle(room)?;
        let mut guard = handle.lock().unwrap();

        let step = guard.apply(actor, action).map_err(|err| {
            if err.is_contract_violation() {
                warn!(room = %room, %actor, error = %err, "action failed");
            } else {
                debug!(room = %room, %actor, error = %err, "action rejected");
            }
            err
        })?;

        *guard = step.room;
        debug!(
            room = %room,
            round = step.outcome.round,
            turn = step.outcome.turn,
            "snapshot swapped"
        );
        Ok(step.outcome)
    }

    fn with_room<T>(
        &self,
        room: &RoomId,
        f: impl FnOnce(&mut GameRoom) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let handle = self.handle(room)?;
        let mut guard = handle.lock().unwrap();
        f(&mut guard)
    }

    fn handle(&self, room: &RoomId) -> Result<Arc<Mutex<GameRoom>>, GameError> {
        let rooms = self.rooms.read().unwrap();
        rooms
            .get(room)
            .cloned()
            .ok_or_else(|| GameError::RoomNotFound(room.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellId;
    use crate::core::Digit;

    fn deployed_board() -> Board {
        let mut board = Board::new();
        for (i, c) in CellId::row_cells(3).enumerate() {
            board.place(c, Digit::new(i as u8)).unwrap();
        }
        for (i, c) in CellId::row_cells(2).take(4).enumerate() {
            board.place(c, Digit::new(6 + i as u8)).unwrap();
        }
        board
    }

    fn started_room(registry: &RoomRegistry) -> RoomId {
        let room = registry.create(2).unwrap();
        registry.join(&room, PlayerId::new(1)).unwrap();
        registry.join(&room, PlayerId::new(2)).unwrap();
        registry
            .deploy(&room, PlayerId::new(1), deployed_board())
            .unwrap();
        registry
            .deploy(&room, PlayerId::new(2), deployed_board())
            .unwrap();
        registry.start(&room).unwrap();
        room
    }

    #[test]
    fn test_create_generates_unique_codes() {
        let registry = RoomRegistry::new(42);
        let a = registry.create(2).unwrap();
        let b = registry.create(3).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 4);
        assert_eq!(registry.room_count(), 2);
    }

    #[test]
    fn test_missing_room_errors() {
        let registry = RoomRegistry::new(1);
        let ghost = RoomId::from("none");
        assert!(matches!(
            registry.join(&ghost, PlayerId::new(1)),
            Err(GameError::RoomNotFound(_))
        ));
        assert!(matches!(
            registry.submit(&ghost, PlayerId::new(1), &Action::Pass),
            Err(GameError::RoomNotFound(_))
        ));
        assert!(matches!(
            registry.remove(&ghost),
            Err(GameError::RoomNotFound(_))
        ));
    }

    #[test]
    fn test_submit_swaps_the_snapshot() {
        let registry = RoomRegistry::new(9);
        let room = started_room(&registry);

        let actor = registry.snapshot(&room).unwrap().current_player().unwrap();
        let outcome = registry.submit(&room, actor, &Action::Pass).unwrap();
        assert_eq!(outcome.turn, 1);

        let snapshot = registry.snapshot(&room).unwrap();
        assert_eq!(snapshot.session().current_turn, 1);
    }

    #[test]
    fn test_rejected_action_leaves_snapshot_unchanged() {
        let registry = RoomRegistry::new(9);
        let room = started_room(&registry);

        let order = registry.snapshot(&room).unwrap().session().turn_order.clone();
        let wrong_actor = order[1];
        assert_eq!(
            registry.submit(&room, wrong_actor, &Action::Pass),
            Err(GameError::NotYourTurn)
        );
        assert_eq!(registry.snapshot(&room).unwrap().session().current_turn, 0);
    }

    #[test]
    fn test_rooms_are_independent() {
        let registry = RoomRegistry::new(3);
        let a = started_room(&registry);
        let b = started_room(&registry);

        let actor = registry.snapshot(&a).unwrap().current_player().unwrap();
        registry.submit(&a, actor, &Action::Pass).unwrap();

        assert_eq!(registry.snapshot(&a).unwrap().session().current_turn, 1);
        assert_eq!(registry.snapshot(&b).unwrap().session().current_turn, 0);
    }

    #[test]
    fn test_parallel_submissions_across_rooms() {
        let registry = RoomRegistry::new(5);
        let rooms: Vec<RoomId> = (0..4).map(|_| started_room(&registry)).collect();

        let handles: Vec<_> = rooms
            .iter()
            .map(|room| {
                let registry = registry.clone();
                let room = room.clone();
                std::thread::spawn(move || {
                    // One full round per room: both players pass.
                    for _ in 0..2 {
                        let actor = registry
                            .snapshot(&room)
                            .unwrap()
                            .current_player()
                            .unwrap();
                        registry.submit(&room, actor, &Action::Pass).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for room in &rooms {
            assert_eq!(registry.snapshot(room).unwrap().session().current_round, 2);
        }
    }
}
