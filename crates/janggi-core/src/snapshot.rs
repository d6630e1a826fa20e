use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{COLUMNS, EMPTY_CODE, OPENING_LAYOUT, ROWS};
use crate::types::{Piece, Square};

type Cells = [[char; COLUMNS as usize]; ROWS as usize];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("expected {expected} rows, received {0}", expected = ROWS)]
    RowCount(usize),
    #[error("row {row} must have {expected} squares, received {len}", expected = COLUMNS)]
    RowLength { row: usize, len: usize },
    #[error("unknown piece code {code:?} at {square}")]
    UnknownPiece { code: char, square: Square },
}

/// Board contents as ten rows of nine characters, row 1 first.
///
/// `k g h e r c s` name the seven kinds, upper case for the first player and
/// lower case for the second; a space is an empty square.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Snapshot {
    cells: Cells,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self {
            cells: [[EMPTY_CODE; COLUMNS as usize]; ROWS as usize],
        }
    }

    pub fn opening() -> Self {
        let mut snapshot = Self::empty();
        for (row, text) in OPENING_LAYOUT.iter().enumerate() {
            for (column, code) in text.chars().enumerate() {
                snapshot.cells[row][column] = code;
            }
        }
        snapshot
    }

    pub fn parse<S: AsRef<str>>(rows: &[S]) -> Result<Self, SnapshotError> {
        if rows.len() != usize::from(ROWS) {
            return Err(SnapshotError::RowCount(rows.len()));
        }

        let mut snapshot = Self::empty();
        for (row, text) in rows.iter().enumerate() {
            let text = text.as_ref();
            let len = text.chars().count();
            if len != usize::from(COLUMNS) {
                return Err(SnapshotError::RowLength { row: row + 1, len });
            }
            for (column, code) in text.chars().enumerate() {
                if code != EMPTY_CODE && Piece::from_code(code).is_none() {
                    return Err(SnapshotError::UnknownPiece {
                        code,
                        square: Square::new_unchecked(column as u8, row as u8),
                    });
                }
                snapshot.cells[row][column] = code;
            }
        }
        Ok(snapshot)
    }

    pub fn piece(&self, square: Square) -> Option<Piece> {
        Piece::from_code(self.code(square))
    }

    pub fn code(&self, square: Square) -> char {
        self.cells[usize::from(square.row())][usize::from(square.column())]
    }

    pub(crate) fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[usize::from(square.row())][usize::from(square.column())] =
            piece.map_or(EMPTY_CODE, Piece::code);
    }

    pub fn to_rows(&self) -> Vec<String> {
        self.cells.iter().map(|row| row.iter().collect()).collect()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::opening()
    }
}

impl TryFrom<Vec<String>> for Snapshot {
    type Error = SnapshotError;

    fn try_from(rows: Vec<String>) -> Result<Self, SnapshotError> {
        Self::parse(&rows)
    }
}

impl From<Snapshot> for Vec<String> {
    fn from(snapshot: Snapshot) -> Self {
        snapshot.to_rows()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}
