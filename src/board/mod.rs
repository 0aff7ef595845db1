//! Board model: cells, adjacency, movement legality, redacted views.

mod cell;
mod grid;

pub use cell::{Advance, CellId, Column, ParseCellError, COLS, ROWS};
pub use grid::{Board, BoardOccupancy, DEPLOYED_PIECES};
