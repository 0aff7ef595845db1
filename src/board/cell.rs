//! Cell identifiers and forward adjacency.
//!
//! A board is 3 rows by 6 columns. Row 1 is the front row, closest to the
//! shared public area; row 3 is the back row. Cells are written
//! `"<row><column>"`, e.g. `"1A"` or `"3F"`, matching the persisted board
//! format.

use serde::{Deserialize, Serialize};

/// Number of rows on a board.
pub const ROWS: u8 = 3;

/// Number of columns on a board.
pub const COLS: u8 = 6;

/// A board column, `A` through `F`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Column {
    /// All columns in fixed A→F order.
    pub const ALL: [Column; 6] = [
        Column::A,
        Column::B,
        Column::C,
        Column::D,
        Column::E,
        Column::F,
    ];

    /// Zero-based column index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The column letter.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Column::A => 'A',
            Column::B => 'B',
            Column::C => 'C',
            Column::D => 'D',
            Column::E => 'E',
            Column::F => 'F',
        }
    }

    fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' => Some(Column::A),
            'B' => Some(Column::B),
            'C' => Some(Column::C),
            'D' => Some(Column::D),
            'E' => Some(Column::E),
            'F' => Some(Column::F),
            _ => None,
        }
    }
}

/// Identifier for one of the 18 board cells.
///
/// ```
/// use digit_duel::board::{Advance, CellId};
///
/// let cell: CellId = "2C".parse().unwrap();
/// assert_eq!(cell.to_string(), "2C");
/// assert_eq!(cell.front(), Advance::Cell("1C".parse().unwrap()));
///
/// let front: CellId = "1C".parse().unwrap();
/// assert_eq!(front.front(), Advance::Public);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellId {
    row: u8,
    col: Column,
}

/// Destination of a forward move: another cell, or the public area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Move onto this cell.
    Cell(CellId),
    /// Leave the board into the shared public area.
    Public,
}

/// Error parsing a cell id string.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell id {0:?} (expected e.g. \"1A\".. \"3F\")")]
pub struct ParseCellError(pub String);

impl CellId {
    /// Create a cell id. Rows are 1-based; returns `None` outside 1..=3.
    #[must_use]
    pub fn new(row: u8, col: Column) -> Option<Self> {
        if (1..=ROWS).contains(&row) {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// The 1-based row (1 = front, 3 = back).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// The column.
    #[must_use]
    pub const fn col(self) -> Column {
        self.col
    }

    /// Dense index in 0..18, row-major from the front row.
    #[must_use]
    pub const fn index(self) -> usize {
        (self.row as usize - 1) * COLS as usize + self.col.index()
    }

    /// Whether this cell sits on the front row.
    #[must_use]
    pub const fn is_front_row(self) -> bool {
        self.row == 1
    }

    /// Whether this cell sits on the back row.
    #[must_use]
    pub const fn is_back_row(self) -> bool {
        self.row == ROWS
    }

    /// The cell one row closer to the public area, or `Advance::Public`
    /// from the front row. Column-preserving row decrement.
    #[must_use]
    pub fn front(self) -> Advance {
        match self.row {
            1 => Advance::Public,
            r => Advance::Cell(Self {
                row: r - 1,
                col: self.col,
            }),
        }
    }

    /// Iterate over all 18 cells, front row first, columns A→F.
    pub fn all() -> impl Iterator<Item = CellId> {
        (1..=ROWS).flat_map(|row| Column::ALL.into_iter().map(move |col| CellId { row, col }))
    }

    /// Iterate over a single row's cells in A→F order.
    pub fn row_cells(row: u8) -> impl Iterator<Item = CellId> {
        assert!((1..=ROWS).contains(&row), "row must be 1-3, got {}", row);
        Column::ALL.into_iter().map(move |col| CellId { row, col })
    }
}

impl std::str::FromStr for CellId {
    type Err = ParseCellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(row_ch), Some(col_ch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(ParseCellError(s.to_string()));
        };
        let row = row_ch.to_digit(10).ok_or_else(|| ParseCellError(s.to_string()))? as u8;
        let col = Column::from_letter(col_ch).ok_or_else(|| ParseCellError(s.to_string()))?;
        CellId::new(row, col).ok_or_else(|| ParseCellError(s.to_string()))
    }
}

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.row, self.col.letter())
    }
}

impl TryFrom<String> for CellId {
    type Error = ParseCellError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<CellId> for String {
    fn from(cell: CellId) -> String {
        cell.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> CellId {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(cell("1A").to_string(), "1A");
        assert_eq!(cell("3F").to_string(), "3F");
        assert_eq!(cell("2C").row(), 2);
        assert_eq!(cell("2C").col(), Column::C);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "1", "4A", "0A", "1G", "11A", "A1"] {
            assert!(bad.parse::<CellId>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_front_adjacency() {
        assert_eq!(cell("3D").front(), Advance::Cell(cell("2D")));
        assert_eq!(cell("2D").front(), Advance::Cell(cell("1D")));
        assert_eq!(cell("1D").front(), Advance::Public);
    }

    #[test]
    fn test_index_covers_all_18_cells() {
        let mut seen = [false; 18];
        for c in CellId::all() {
            assert!(!seen[c.index()], "duplicate index for {}", c);
            seen[c.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_row_cells_order() {
        let back: Vec<String> = CellId::row_cells(3).map(|c| c.to_string()).collect();
        assert_eq!(back, ["3A", "3B", "3C", "3D", "3E", "3F"]);
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&cell("2E")).unwrap();
        assert_eq!(json, "\"2E\"");
        let back: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell("2E"));
        assert!(serde_json::from_str::<CellId>("\"9Z\"").is_err());
    }
}
