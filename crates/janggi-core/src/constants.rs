use crate::types::{Owner, Square};

pub const COLUMNS: u8 = 9;
pub const ROWS: u8 = 10;
pub const SQUARE_COUNT: usize = COLUMNS as usize * ROWS as usize;

pub const COLUMN_LABELS: [char; COLUMNS as usize] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i'];

pub const EMPTY_CODE: char = ' ';

pub const OPENING_LAYOUT: [&str; ROWS as usize] = [
    "rehg gehr",
    "    k    ",
    " c     c ",
    "s s s s s",
    "         ",
    "         ",
    "S S S S S",
    " C     C ",
    "    K    ",
    "REHG GEHR",
];

pub const SQUARES: [Square; SQUARE_COUNT] = build_squares();

const fn build_squares() -> [Square; SQUARE_COUNT] {
    let mut squares = [Square::new_unchecked(0, 0); SQUARE_COUNT];
    let mut index = 0;
    while index < SQUARE_COUNT {
        squares[index] = Square::new_unchecked(
            (index % COLUMNS as usize) as u8,
            (index / COLUMNS as usize) as u8,
        );
        index += 1;
    }
    squares
}

pub const PALACE_COLUMNS: [u8; 3] = [3, 4, 5];

pub const fn palace_rows(owner: Owner) -> [u8; 3] {
    match owner {
        Owner::First => [7, 8, 9],
        Owner::Second => [0, 1, 2],
    }
}

pub const fn in_palace(square: Square) -> bool {
    let column = square.column();
    let row = square.row();
    column >= 3 && column <= 5 && (row <= 2 || row >= 7)
}

const fn sq(column: u8, row: u8) -> Square {
    Square::new_unchecked(column, row)
}

/// Junction squares on the palace diagonals and their one-step diagonal neighbours.
pub const PALACE_DIAGONALS: [(Square, &[Square]); 10] = [
    (sq(3, 0), &[sq(4, 1)]),
    (sq(5, 0), &[sq(4, 1)]),
    (sq(4, 1), &[sq(3, 0), sq(5, 0), sq(3, 2), sq(5, 2)]),
    (sq(3, 2), &[sq(4, 1)]),
    (sq(5, 2), &[sq(4, 1)]),
    (sq(3, 7), &[sq(4, 8)]),
    (sq(5, 7), &[sq(4, 8)]),
    (sq(4, 8), &[sq(3, 7), sq(5, 7), sq(3, 9), sq(5, 9)]),
    (sq(3, 9), &[sq(4, 8)]),
    (sq(5, 9), &[sq(4, 8)]),
];

pub fn palace_diagonal_neighbors(square: Square) -> &'static [Square] {
    PALACE_DIAGONALS
        .iter()
        .find(|(junction, _)| *junction == square)
        .map(|(_, neighbors)| *neighbors)
        .unwrap_or(&[])
}

pub fn palace_corner_center(square: Square) -> Option<Square> {
    match palace_diagonal_neighbors(square) {
        [center] => Some(*center),
        _ => None,
    }
}
