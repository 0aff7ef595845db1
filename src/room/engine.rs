//! The per-room turn engine.
//!
//! `GameRoom` owns the authoritative state for one room: the session plus
//! every seated player's board and eliminated list. Applying an action is
//! snapshot-in/snapshot-out: [`GameRoom::apply`] never mutates the current
//! room, it returns a [`Step`] holding the complete successor state so the
//! caller can persist it transactionally. `im` collections keep those
//! clones cheap.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Advance, Board, BoardOccupancy, CellId};
use crate::core::{Digit, GameError, GameRng, PlayerId};
use crate::room::action::{Action, ActionRecord};
use crate::room::session::{Phase, RoomSession};
use crate::room::winner::detect_winner;
use crate::settle::{settle, Piece};

/// Minimum players per room.
pub const MIN_PLAYERS: usize = 2;
/// Maximum players per room.
pub const MAX_PLAYERS: usize = 5;

/// One player's game-lifetime record: board plus eliminated digits.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// The player's board.
    pub board: Board,
    /// Digits removed from this player's pieces, append-only.
    pub eliminated: Vector<Digit>,
}

/// Authoritative state for one room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRoom {
    session: RoomSession,
    players: FxHashMap<PlayerId, PlayerRecord>,
    /// Join order; the shuffled turn order is drawn from this at start.
    seats: Vec<PlayerId>,
    max_players: usize,
}

/// The successor state produced by applying one action.
#[derive(Clone, Debug)]
pub struct Step {
    /// Complete new room snapshot; persist and swap in atomically.
    pub room: GameRoom,
    /// What happened during the step.
    pub outcome: TurnOutcome,
}

/// Caller-visible summary of an applied action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Audit record of the action, stamped with pre-advance round/turn.
    pub record: ActionRecord,
    /// Pieces eliminated during this step (challenge and/or rollover).
    pub eliminated: Vec<Piece>,
    /// Round counter after the step.
    pub round: u32,
    /// Turn pointer after the step.
    pub turn: usize,
    /// Set when the win detector found a sole survivor.
    pub winner: Option<PlayerId>,
}

impl GameRoom {
    /// Create an empty waiting room for 2-5 players.
    pub fn new(max_players: usize) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
            return Err(GameError::InvalidPlayerCount {
                requested: max_players,
            });
        }
        Ok(Self {
            session: RoomSession::new(),
            players: FxHashMap::default(),
            seats: Vec::new(),
            max_players,
        })
    }

    /// Rebuild a room from persisted parts: a session plus player records
    /// in seat order. This is how a service layer rehydrates a room
    /// fetched through a [`crate::store::RoomStore`].
    ///
    /// Fails with `ContractViolation` if the session's turn order names a
    /// player without a record.
    pub fn from_parts(
        session: RoomSession,
        players: Vec<(PlayerId, PlayerRecord)>,
        max_players: usize,
    ) -> Result<Self, GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&max_players) {
            return Err(GameError::InvalidPlayerCount {
                requested: max_players,
            });
        }
        let seats: Vec<PlayerId> = players.iter().map(|(p, _)| *p).collect();
        for player in &session.turn_order {
            if !seats.contains(player) {
                return Err(contract_breach("turn order references unseated player"));
            }
        }
        Ok(Self {
            session,
            players: players.into_iter().collect(),
            seats,
            max_players,
        })
    }

    /// The room session.
    #[must_use]
    pub fn session(&self) -> &RoomSession {
        &self.session
    }

    /// Seated players in join order.
    #[must_use]
    pub fn seats(&self) -> &[PlayerId] {
        &self.seats
    }

    /// Seat limit for this room.
    #[must_use]
    pub fn max_players(&self) -> usize {
        self.max_players
    }

    /// A seated player's record.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerRecord> {
        self.players.get(&player)
    }

    /// All player records in seat order, e.g. for persistence.
    pub fn players(&self) -> impl Iterator<Item = (PlayerId, &PlayerRecord)> {
        self.seats.iter().map(move |&p| (p, &self.players[&p]))
    }

    /// The player whose turn it is, if the game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.session.current_player()
    }

    // === Waiting phase ===

    /// Seat a player. Idempotent for players already seated.
    pub fn join(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.session.phase != Phase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.seats.contains(&player) {
            return Ok(());
        }
        if self.seats.len() >= self.max_players {
            return Err(GameError::RoomFull {
                max: self.max_players,
            });
        }
        self.seats.push(player);
        self.players.insert(player, PlayerRecord::default());
        Ok(())
    }

    /// Unseat a player before the game starts.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), GameError> {
        if self.session.phase != Phase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        if !self.seats.contains(&player) {
            return Err(GameError::UnknownPlayer { player });
        }
        self.seats.retain(|&p| p != player);
        self.players.remove(&player);
        Ok(())
    }

    /// Accept a player's deployed board.
    ///
    /// Validation is the piece count only: exactly ten placed digits.
    /// Digit uniqueness is deliberately not enforced.
    pub fn deploy(&mut self, player: PlayerId, board: Board) -> Result<(), GameError> {
        if self.session.phase != Phase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        let record = self
            .players
            .get_mut(&player)
            .ok_or(GameError::UnknownPlayer { player })?;
        if !board.is_deployment_complete() {
            return Err(GameError::IncompleteDeployment {
                placed: board.occupied_count(),
            });
        }
        record.board = board;
        record.eliminated = Vector::new();
        Ok(())
    }

    /// Start the game: shuffle the turn order and enter `Playing`.
    ///
    /// Requires at least two seated players, all with deployed boards.
    pub fn start(&mut self, rng: &mut GameRng) -> Result<(), GameError> {
        if self.session.phase != Phase::Waiting {
            return Err(GameError::GameAlreadyStarted);
        }
        if self.seats.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                seated: self.seats.len(),
            });
        }
        for &player in &self.seats {
            let record = &self.players[&player];
            if !record.board.is_deployment_complete() {
                return Err(GameError::IncompleteDeployment {
                    placed: record.board.occupied_count(),
                });
            }
        }

        let mut turn_order = self.seats.clone();
        rng.shuffle(&mut turn_order);
        info!(players = turn_order.len(), "game started");
        self.session.begin(turn_order);
        Ok(())
    }

    // === Playing phase ===

    /// Apply one action for `actor`, producing the successor snapshot.
    ///
    /// Fails with `GameNotInProgress` outside the playing phase and
    /// `NotYourTurn` unless `actor` is the player at the turn pointer.
    /// After the action the turn pointer advances; when a full round has
    /// elapsed the engine settles the public area, returns leftovers to
    /// their owners' back rows, and runs the win detector.
    pub fn apply(&self, actor: PlayerId, action: &Action) -> Result<Step, GameError> {
        if self.session.phase != Phase::Playing {
            return Err(GameError::GameNotInProgress);
        }
        let expected = self
            .session
            .turn_order
            .get(self.session.current_turn)
            .copied()
            .ok_or_else(|| contract_breach("turn pointer outside turn order"))?;
        if expected != actor {
            return Err(GameError::NotYourTurn);
        }

        let record = ActionRecord::new(
            actor,
            action.clone(),
            self.session.current_round,
            self.session.current_turn,
        );

        let mut next = self.clone();
        // Bonus-action eligibility lasts until the next applied action.
        next.session.pending_extra_action = None;

        let mut eliminated = Vec::new();
        match action {
            Action::Forward { cell } => next.forward(actor, *cell)?,
            Action::Challenge { target, cell } => {
                next.challenge(actor, *target, *cell, &mut eliminated)?;
            }
            Action::Recycle { piece_index, cell } => {
                next.recycle(actor, *piece_index, *cell)?;
            }
            Action::Pass => {}
        }
        debug!(%actor, kind = action.kind(), "action applied");

        let player_count = next.session.player_count();
        let next_turn = (next.session.current_turn + 1) % player_count;

        let mut winner = None;
        if next_turn == 0 {
            next.session.current_round += 1;
            next.round_rollover(&mut eliminated)?;

            winner = detect_winner(
                next.seats
                    .iter()
                    .map(|&p| (p, &next.players[&p].board)),
            );
            if let Some(w) = winner {
                info!(winner = %w, "game finished");
                next.session.phase = Phase::Finished;
            }
        }
        if winner.is_none() {
            next.session.current_turn = next_turn;
        }

        let outcome = TurnOutcome {
            record,
            eliminated,
            round: next.session.current_round,
            turn: next.session.current_turn,
            winner,
        };
        Ok(Step {
            room: next,
            outcome,
        })
    }

    fn forward(&mut self, actor: PlayerId, cell: CellId) -> Result<(), GameError> {
        let record = self
            .players
            .get_mut(&actor)
            .ok_or_else(|| contract_breach("turn order references unseated player"))?;
        let (digit, dest) = record.board.advance(cell)?;
        if dest == Advance::Public {
            self.session.public_area.push_back(Piece::new(digit, actor));
        }
        Ok(())
    }

    fn challenge(
        &mut self,
        actor: PlayerId,
        target: PlayerId,
        cell: CellId,
        eliminated: &mut Vec<Piece>,
    ) -> Result<(), GameError> {
        if target == actor {
            return Err(GameError::InvalidTargetCell { cell });
        }
        let record = self
            .players
            .get_mut(&target)
            .ok_or(GameError::UnknownPlayer { player: target })?;
        let digit = record
            .board
            .take(cell)
            .ok_or(GameError::InvalidTargetCell { cell })?;
        self.session.public_area.push_back(Piece::new(digit, target));

        // Settlement runs immediately over the whole area; leftovers stay
        // in the public area until the round rollover.
        let pieces: Vec<Piece> = self.session.public_area.iter().copied().collect();
        let result = settle(&pieces, &self.session.turn_order);
        self.apply_eliminations(&result.eliminated, eliminated)?;
        self.session.public_area = result.leftover.into_iter().collect();
        if result.sole_survivor.is_some() {
            self.session.pending_extra_action = result.sole_survivor;
        }
        Ok(())
    }

    fn recycle(
        &mut self,
        actor: PlayerId,
        piece_index: usize,
        cell: CellId,
    ) -> Result<(), GameError> {
        let own_indices: Vec<usize> = self
            .session
            .public_area
            .iter()
            .enumerate()
            .filter(|(_, piece)| piece.owner == actor)
            .map(|(i, _)| i)
            .collect();
        if piece_index >= own_indices.len() {
            return Err(GameError::InvalidPieceIndex {
                index: piece_index,
                available: own_indices.len(),
            });
        }
        let area_index = own_indices[piece_index];
        let piece = self.session.public_area.remove(area_index);

        let record = self
            .players
            .get_mut(&actor)
            .ok_or_else(|| contract_breach("turn order references unseated player"))?;
        if let Err(err) = record.board.place(cell, piece.digit) {
            // Undo the removal so a failed recycle leaves state untouched.
            self.session.public_area.insert(area_index, piece);
            return Err(err);
        }
        Ok(())
    }

    /// Mandatory end-of-round settlement: resolve the area, append
    /// eliminations, return leftovers to their owners' boards, clear.
    fn round_rollover(&mut self, eliminated: &mut Vec<Piece>) -> Result<(), GameError> {
        let pieces: Vec<Piece> = self.session.public_area.iter().copied().collect();
        if !pieces.is_empty() {
            info!(
                round = self.session.current_round,
                pieces = pieces.len(),
                "round rollover settlement"
            );
        }
        let result = settle(&pieces, &self.session.turn_order);
        self.apply_eliminations(&result.eliminated, eliminated)?;

        for piece in result.leftover {
            let record = self
                .players
                .get_mut(&piece.owner)
                .ok_or_else(|| contract_breach("leftover piece owned by unseated player"))?;
            let cell = record.board.return_cell().ok_or_else(|| {
                contract_breach("no empty cell to return a leftover piece")
            })?;
            record.board.place(cell, piece.digit)?;
        }
        self.session.public_area = Vector::new();
        if result.sole_survivor.is_some() {
            self.session.pending_extra_action = result.sole_survivor;
        }
        Ok(())
    }

    fn apply_eliminations(
        &mut self,
        pieces: &[Piece],
        log: &mut Vec<Piece>,
    ) -> Result<(), GameError> {
        for piece in pieces {
            let record = self
                .players
                .get_mut(&piece.owner)
                .ok_or_else(|| contract_breach("eliminated piece owned by unseated player"))?;
            record.eliminated.push_back(piece.digit);
            log.push(*piece);
        }
        Ok(())
    }

    // === Views ===

    /// What `viewer` may see: their own board in full, opponents' boards
    /// redacted to occupancy. Eliminated lists are public knowledge.
    #[must_use]
    pub fn view_for(&self, viewer: PlayerId) -> RoomView {
        let boards = self
            .seats
            .iter()
            .map(|&player| {
                let record = &self.players[&player];
                let board = if player == viewer {
                    BoardView::Full(record.board)
                } else {
                    BoardView::Redacted(record.board.occupancy())
                };
                PlayerBoardView {
                    player,
                    board,
                    eliminated: record.eliminated.iter().copied().collect(),
                }
            })
            .collect();

        RoomView {
            phase: self.session.phase,
            current_round: self.session.current_round,
            current_turn: self.session.current_turn,
            turn_order: self.session.turn_order.clone(),
            public_area: self.session.public_area.iter().copied().collect(),
            your_turn: self.current_player() == Some(viewer),
            boards,
        }
    }
}

/// One player's board as seen by a particular viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "visibility", content = "cells", rename_all = "lowercase")]
pub enum BoardView {
    /// The viewer's own board, digits included.
    Full(Board),
    /// An opponent's board, occupancy only.
    Redacted(BoardOccupancy),
}

/// A seated player's state as seen by a particular viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerBoardView {
    /// The seated player.
    pub player: PlayerId,
    /// Their board, possibly redacted.
    pub board: BoardView,
    /// Their eliminated digits (public).
    pub eliminated: Vec<Digit>,
}

/// Snapshot of a room rendered for one viewer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomView {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Current round.
    pub current_round: u32,
    /// Current turn pointer.
    pub current_turn: usize,
    /// The fixed turn order.
    pub turn_order: Vec<PlayerId>,
    /// Pieces currently in the public area.
    pub public_area: Vec<Piece>,
    /// Whether it is the viewer's turn.
    pub your_turn: bool,
    /// Every seated player's visible state, in join order.
    pub boards: Vec<PlayerBoardView>,
}

fn contract_breach(message: &str) -> GameError {
    warn!(message, "engine contract violated");
    GameError::ContractViolation(message.to_string())
}
