//! The 3×6 board grid.
//!
//! Exactly 18 cells always exist; a cell holds at most one digit. A
//! completed deployment places exactly ten digits (uniqueness across the
//! ten is deliberately not enforced).
//!
//! Boards serialize as a fixed 18-entry map keyed by cell id (`"1A"` ..
//! `"3F"`), the shape recommended for persistence and used by the store.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::board::cell::{Advance, CellId, ROWS};
use crate::core::{Digit, GameError};

/// Number of pieces a completed deployment places.
pub const DEPLOYED_PIECES: usize = 10;

/// A single player's board: 18 cells, each holding an optional digit.
///
/// ```
/// use digit_duel::board::{Advance, Board};
/// use digit_duel::core::Digit;
///
/// let mut board = Board::new();
/// let cell = "2B".parse().unwrap();
/// board.place(cell, Digit::new(5)).unwrap();
///
/// assert_eq!(board.can_advance(cell), Ok(Advance::Cell("1B".parse().unwrap())));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Board {
    cells: [Option<Digit>; 18],
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from `(cell, digit)` pairs.
    ///
    /// Panics on duplicate cells; intended for tests and fixtures.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (CellId, Digit)>) -> Self {
        let mut board = Self::new();
        for (cell, digit) in pairs {
            board
                .place(cell, digit)
                .unwrap_or_else(|_| panic!("duplicate cell {} in board fixture", cell));
        }
        board
    }

    /// The digit on a cell, if any.
    #[must_use]
    pub fn get(&self, cell: CellId) -> Option<Digit> {
        self.cells[cell.index()]
    }

    /// Place a digit on an empty cell.
    ///
    /// Fails with `InvalidTargetCell` if the cell is occupied.
    pub fn place(&mut self, cell: CellId, digit: Digit) -> Result<(), GameError> {
        let slot = &mut self.cells[cell.index()];
        if slot.is_some() {
            return Err(GameError::InvalidTargetCell { cell });
        }
        *slot = Some(digit);
        Ok(())
    }

    /// Remove and return the digit on a cell, if any.
    pub fn take(&mut self, cell: CellId) -> Option<Digit> {
        self.cells[cell.index()].take()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Whether no cell holds a piece. A player with an empty board is out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Whether deployment is complete: exactly ten cells occupied.
    ///
    /// Digit uniqueness across the ten is not checked by design.
    #[must_use]
    pub fn is_deployment_complete(&self) -> bool {
        self.occupied_count() == DEPLOYED_PIECES
    }

    /// Check whether the piece on `cell` may advance, and where to.
    ///
    /// Fails with `EmptyCell` if no piece occupies `cell`. Advancing into
    /// the public area is always permitted; advancing onto an occupied
    /// cell fails with `Blocked` naming the destination.
    pub fn can_advance(&self, cell: CellId) -> Result<Advance, GameError> {
        if self.get(cell).is_none() {
            return Err(GameError::EmptyCell { cell });
        }
        match cell.front() {
            Advance::Public => Ok(Advance::Public),
            Advance::Cell(dest) => {
                if self.get(dest).is_some() {
                    Err(GameError::Blocked { cell: dest })
                } else {
                    Ok(Advance::Cell(dest))
                }
            }
        }
    }

    /// Move the piece on `cell` forward, returning the digit and where it
    /// went. On `Advance::Cell` the piece now sits on the destination; on
    /// `Advance::Public` it has left the board and the caller owns it.
    pub fn advance(&mut self, cell: CellId) -> Result<(Digit, Advance), GameError> {
        let dest = self.can_advance(cell)?;
        let digit = self.take(cell).ok_or(GameError::EmptyCell { cell })?;
        if let Advance::Cell(to) = dest {
            self.place(to, digit)?;
        }
        Ok((digit, dest))
    }

    /// Digits not yet placed on this board, ascending.
    ///
    /// Deployment UIs use this while a player lays out their ten pieces.
    #[must_use]
    pub fn available_digits(&self) -> Vec<Digit> {
        Digit::all()
            .filter(|d| !self.cells.iter().flatten().any(|placed| placed == d))
            .collect()
    }

    /// The cell a returning public-area piece should land on: the first
    /// empty cell scanning the back row A→F, then rows 2 and 1 as a
    /// deterministic fallback. `None` only if the board is completely
    /// full, which cannot happen with at most ten pieces per player.
    #[must_use]
    pub fn return_cell(&self) -> Option<CellId> {
        (1..=ROWS)
            .rev()
            .flat_map(CellId::row_cells)
            .find(|&cell| self.get(cell).is_none())
    }

    /// Iterate over occupied cells and their digits, front row first.
    pub fn pieces(&self) -> impl Iterator<Item = (CellId, Digit)> + '_ {
        CellId::all().filter_map(|cell| self.get(cell).map(|digit| (cell, digit)))
    }

    /// Redacted view exposing only per-cell occupancy.
    ///
    /// Used to render opponents' boards without revealing digits.
    #[must_use]
    pub fn occupancy(&self) -> BoardOccupancy {
        let mut occupied = [false; 18];
        for (i, cell) in self.cells.iter().enumerate() {
            occupied[i] = cell.is_some();
        }
        BoardOccupancy { occupied }
    }
}

/// Occupancy-only view of a board; digits are hidden.
///
/// Serializes as the same 18-entry cell map as [`Board`], with booleans in
/// place of digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardOccupancy {
    occupied: [bool; 18],
}

impl BoardOccupancy {
    /// Whether the given cell holds a piece.
    #[must_use]
    pub fn is_occupied(&self, cell: CellId) -> bool {
        self.occupied[cell.index()]
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(18))?;
        for cell in CellId::all() {
            map.serialize_entry(&cell, &self.get(cell))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BoardVisitor;

        impl<'de> Visitor<'de> for BoardVisitor {
            type Value = Board;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of cell ids (\"1A\"..\"3F\") to optional digits")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Board, A::Error> {
                let mut board = Board::new();
                while let Some((cell, digit)) = access.next_entry::<CellId, Option<Digit>>()? {
                    if let Some(digit) = digit {
                        board.place(cell, digit).map_err(|_| {
                            serde::de::Error::custom(format!("duplicate cell {}", cell))
                        })?;
                    }
                }
                Ok(board)
            }
        }

        deserializer.deserialize_map(BoardVisitor)
    }
}

impl Serialize for BoardOccupancy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(18))?;
        for cell in CellId::all() {
            map.serialize_entry(&cell, &self.is_occupied(cell))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BoardOccupancy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OccupancyVisitor;

        impl<'de> Visitor<'de> for OccupancyVisitor {
            type Value = BoardOccupancy;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of cell ids to booleans")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BoardOccupancy, A::Error> {
                let mut occupied = [false; 18];
                while let Some((cell, flag)) = access.next_entry::<CellId, bool>()? {
                    occupied[cell.index()] = flag;
                }
                Ok(BoardOccupancy { occupied })
            }
        }

        deserializer.deserialize_map(OccupancyVisitor)
    }
}
