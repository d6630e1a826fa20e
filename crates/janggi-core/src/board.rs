use std::ops::Deref;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::constants::{palace_rows, COLUMNS, PALACE_COLUMNS, ROWS, SQUARES, SQUARE_COUNT};
use crate::snapshot::Snapshot;
use crate::types::{Owner, Piece, PieceKind, Placed, Square};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("{0} general is missing from its palace")]
    MissingGeneral(Owner),
}

pub type PlacedList = ArrayVec<Placed, SQUARE_COUNT>;

type Cells = [[Option<Piece>; COLUMNS as usize]; ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: Cells,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; COLUMNS as usize]; ROWS as usize],
        }
    }

    pub fn opening() -> Self {
        Self::from_snapshot(&Snapshot::opening())
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut board = Self::empty();
        board.load(snapshot);
        board
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[usize::from(square.row())][usize::from(square.column())]
    }

    pub fn occupied(&self, square: Square) -> bool {
        self.get(square).is_some()
    }

    pub fn piece_at(&self, label: &str) -> Option<Placed> {
        let square = Square::parse(label)?;
        self.placed(square)
    }

    pub fn placed(&self, square: Square) -> Option<Placed> {
        self.get(square).map(|piece| Placed { piece, square })
    }

    pub fn put(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.cell_mut(square).replace(piece)
    }

    pub fn clear(&mut self, square: Square) -> Option<Piece> {
        self.cell_mut(square).take()
    }

    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Option<Piece>, BoardError> {
        let piece = self.clear(from).ok_or(BoardError::EmptySquare(from))?;
        Ok(self.put(to, piece))
    }

    pub fn occupants(&self) -> impl Iterator<Item = Placed> + '_ {
        SQUARES.iter().filter_map(|&square| self.placed(square))
    }

    pub fn pieces_of(&self, owner: Owner) -> PlacedList {
        self.occupants()
            .filter(|placed| placed.piece.owner == owner)
            .collect()
    }

    pub fn general_of(&self, owner: Owner) -> Result<Square, BoardError> {
        let general = Piece::new(PieceKind::General, owner);
        palace_rows(owner)
            .into_iter()
            .flat_map(|row| {
                PALACE_COLUMNS
                    .into_iter()
                    .map(move |column| Square::new_unchecked(column, row))
            })
            .find(|&square| self.get(square) == Some(general))
            .ok_or(BoardError::MissingGeneral(owner))
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::empty();
        for placed in self.occupants() {
            snapshot.set(placed.square, Some(placed.piece));
        }
        snapshot
    }

    pub fn load(&mut self, snapshot: &Snapshot) {
        for square in SQUARES {
            *self.cell_mut(square) = snapshot.piece(square);
        }
    }

    /// Relocates `from` to `to` until the returned guard is dropped.
    ///
    /// The guard restores both cells on drop unless [`Trial::commit`] is
    /// called, so an early return leaves the board as it was.
    pub fn trial(&mut self, from: Square, to: Square) -> Result<Trial<'_>, BoardError> {
        let mut undo = ArrayVec::new();
        undo.push((from, self.get(from)));
        undo.push((to, self.get(to)));
        let captured = self.relocate(from, to)?;
        Ok(Trial {
            board: self,
            undo,
            captured,
        })
    }

    fn cell_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.cells[usize::from(square.row())][usize::from(square.column())]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::opening()
    }
}

/// A reversible relocation on a borrowed board.
#[derive(Debug)]
pub struct Trial<'a> {
    board: &'a mut Board,
    undo: ArrayVec<(Square, Option<Piece>), 2>,
    captured: Option<Piece>,
}

impl Trial<'_> {
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    pub fn commit(mut self) -> Option<Piece> {
        self.undo.clear();
        self.captured
    }

    /// Nested trials must restore themselves before this one is dropped.
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        self.board
    }
}

impl Deref for Trial<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        while let Some((square, previous)) = self.undo.pop() {
            *self.board.cell_mut(square) = previous;
        }
    }
}
