//! Back-rank arrangements chosen before play.
//!
//! Each side keeps its Chariots on the outer files and its Guards on the
//! palace files, but may swap the Horse and Elephant on either flank.

use std::fmt;

use thiserror::Error;

use crate::constants::{COLUMNS, EMPTY_CODE};
use crate::snapshot::Snapshot;
use crate::types::{Owner, Piece, PieceKind, Square};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("back rank must be exactly {expected} characters, received {0}", expected = COLUMNS)]
    Length(usize),
    #[error("back rank must start and end with chariots (r)")]
    Chariots,
    #[error("middle pieces must be a guard, no piece, and then a guard (g g)")]
    Guards,
    #[error("there must be exactly one horse on each side of the general (h)")]
    Horses,
    #[error("there must be exactly one elephant on each side of the general (e)")]
    Elephants,
}

const LEFT_FLANK: [usize; 2] = [1, 2];
const RIGHT_FLANK: [usize; 2] = [6, 7];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackRank {
    owner: Owner,
    cells: [Option<Piece>; COLUMNS as usize],
}

impl BackRank {
    pub fn parse(text: &str, owner: Owner) -> Result<Self, SetupError> {
        let codes: Vec<char> = text.chars().map(|c| c.to_ascii_lowercase()).collect();
        if codes.len() != usize::from(COLUMNS) {
            return Err(SetupError::Length(codes.len()));
        }

        let kind_at = |index: usize| PieceKind::from_code(codes[index]);
        let flank_count = |flank: [usize; 2], kind: PieceKind| {
            flank.iter().filter(|&&index| kind_at(index) == Some(kind)).count()
        };

        if kind_at(0) != Some(PieceKind::Chariot) || kind_at(8) != Some(PieceKind::Chariot) {
            return Err(SetupError::Chariots);
        }
        if kind_at(3) != Some(PieceKind::Guard)
            || codes[4] != EMPTY_CODE
            || kind_at(5) != Some(PieceKind::Guard)
        {
            return Err(SetupError::Guards);
        }
        if flank_count(LEFT_FLANK, PieceKind::Horse) != 1
            || flank_count(RIGHT_FLANK, PieceKind::Horse) != 1
        {
            return Err(SetupError::Horses);
        }
        if flank_count(LEFT_FLANK, PieceKind::Elephant) != 1
            || flank_count(RIGHT_FLANK, PieceKind::Elephant) != 1
        {
            return Err(SetupError::Elephants);
        }

        let mut cells = [None; COLUMNS as usize];
        for (cell, &code) in cells.iter_mut().zip(&codes) {
            *cell = PieceKind::from_code(code).map(|kind| Piece::new(kind, owner));
        }
        Ok(Self { owner, cells })
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    pub const fn row(owner: Owner) -> u8 {
        match owner {
            Owner::First => 9,
            Owner::Second => 0,
        }
    }
}

impl fmt::Display for BackRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in self.cells {
            write!(f, "{}", cell.map_or(EMPTY_CODE, Piece::code))?;
        }
        Ok(())
    }
}

pub fn layout(second: &BackRank, first: &BackRank) -> Snapshot {
    let mut snapshot = Snapshot::opening();
    for rank in [second, first] {
        let row = BackRank::row(rank.owner);
        for (column, &cell) in rank.cells.iter().enumerate() {
            snapshot.set(Square::new_unchecked(column as u8, row), cell);
        }
    }
    snapshot
}
