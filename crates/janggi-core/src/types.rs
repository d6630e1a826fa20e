use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::constants::{COLUMNS, COLUMN_LABELS, ROWS, SQUARE_COUNT};

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    First = 0,
    Second = 1,
}

impl Owner {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    pub const fn opponent(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }

    pub const fn color_name(self) -> &'static str {
        match self {
            Self::First => "blue",
            Self::Second => "red",
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.color_name())
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General = 0,
    Guard = 1,
    Horse = 2,
    Elephant = 3,
    Chariot = 4,
    Cannon = 5,
    Soldier = 6,
}

impl PieceKind {
    pub const ALL: [Self; 7] = [
        Self::General,
        Self::Guard,
        Self::Horse,
        Self::Elephant,
        Self::Chariot,
        Self::Cannon,
        Self::Soldier,
    ];

    pub const fn code(self) -> char {
        match self {
            Self::General => 'k',
            Self::Guard => 'g',
            Self::Horse => 'h',
            Self::Elephant => 'e',
            Self::Chariot => 'r',
            Self::Cannon => 'c',
            Self::Soldier => 's',
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        match code {
            'k' => Some(Self::General),
            'g' => Some(Self::Guard),
            'h' => Some(Self::Horse),
            'e' => Some(Self::Elephant),
            'r' => Some(Self::Chariot),
            'c' => Some(Self::Cannon),
            's' => Some(Self::Soldier),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Guard => "Guard",
            Self::Horse => "Horse",
            Self::Elephant => "Elephant",
            Self::Chariot => "Chariot",
            Self::Cannon => "Cannon",
            Self::Soldier => "Soldier",
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: Owner,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Owner) -> Self {
        Self { kind, owner }
    }

    pub const fn code(self) -> char {
        let code = self.kind.code();
        match self.owner {
            Owner::First => code.to_ascii_uppercase(),
            Owner::Second => code,
        }
    }

    pub const fn from_code(code: char) -> Option<Self> {
        let owner = if code.is_ascii_uppercase() {
            Owner::First
        } else {
            Owner::Second
        };
        match PieceKind::from_code(code.to_ascii_lowercase()) {
            Some(kind) => Some(Self { kind, owner }),
            None => None,
        }
    }
}

/// A board cell, columns a-i as 0-8 and rows 1-10 as 0-9.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: u8,
    column: u8,
}

impl Square {
    pub const fn new(column: u8, row: u8) -> Option<Self> {
        if column < COLUMNS && row < ROWS {
            Some(Self { row, column })
        } else {
            None
        }
    }

    pub const fn new_unchecked(column: u8, row: u8) -> Self {
        Self { row, column }
    }

    pub const fn column(self) -> u8 {
        self.column
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn index(self) -> usize {
        self.row as usize * COLUMNS as usize + self.column as usize
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= SQUARE_COUNT {
            return None;
        }
        Some(Self {
            row: (index / COLUMNS as usize) as u8,
            column: (index % COLUMNS as usize) as u8,
        })
    }

    pub fn offset(self, columns: i8, rows: i8) -> Option<Self> {
        let column = self.column as i8 + columns;
        let row = self.row as i8 + rows;
        if !(0..COLUMNS as i8).contains(&column) || !(0..ROWS as i8).contains(&row) {
            return None;
        }
        Some(Self::new_unchecked(column as u8, row as u8))
    }

    /// Parses a label such as `a1` or `i10`.
    ///
    /// Accepts two or three ASCII alphanumerics: a column letter `a`-`i`
    /// followed by a decimal row number in `1..=10`. Anything else is `None`.
    pub fn parse(label: &str) -> Option<Self> {
        let bytes = label.as_bytes();
        if !(2..=3).contains(&bytes.len()) || !bytes.iter().all(u8::is_ascii_alphanumeric) {
            return None;
        }
        let column = COLUMN_LABELS.iter().position(|&c| c as u8 == bytes[0])?;
        let digits = &label[1..];
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let row = digits.parse::<u8>().ok()?;
        if !(1..=ROWS).contains(&row) {
            return None;
        }
        Self::new(column as u8, row - 1)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            COLUMN_LABELS[usize::from(self.column)],
            self.row + 1
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placed {
    pub piece: Piece,
    pub square: Square,
}

#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u128);

impl SquareSet {
    pub const EMPTY: Self = Self(0);

    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1u128 << square.index()) != 0
    }

    pub fn insert(&mut self, square: Square) {
        self.0 |= 1u128 << square.index();
    }

    pub fn remove(&mut self, square: Square) {
        self.0 &= !(1u128 << square.index());
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }

    pub fn labels(self) -> Vec<String> {
        self.iter().map(|square| square.to_string()).collect()
    }
}

impl BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SquareSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        set.extend(iter);
        set
    }
}

impl Extend<Square> for SquareSet {
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        for square in iter {
            self.insert(square);
        }
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> SquareSetIter {
        self.iter()
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{square}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SquareSetIter(u128);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Square::from_index(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameState {
    #[default]
    InProgress,
    FirstWins,
    SecondWins,
}

impl GameState {
    pub const fn win_for(owner: Owner) -> Self {
        match owner {
            Owner::First => Self::FirstWins,
            Owner::Second => Self::SecondWins,
        }
    }

    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }

    pub const fn winner(self) -> Option<Owner> {
        match self {
            Self::InProgress => None,
            Self::FirstWins => Some(Owner::First),
            Self::SecondWins => Some(Owner::Second),
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner() {
            Some(owner) => write!(f, "{owner} won"),
            None => f.write_str("in progress"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_code_round_trip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_code(kind.code()), Some(kind));
            for owner in Owner::ALL {
                let piece = Piece::new(kind, owner);
                assert_eq!(Piece::from_code(piece.code()), Some(piece));
            }
        }
        assert_eq!(Piece::from_code('x'), None);
        assert_eq!(Piece::from_code(' '), None);
    }

    #[test]
    fn parse_square() {
        assert_eq!(Square::parse("a1"), Some(Square::new_unchecked(0, 0)));
        assert_eq!(Square::parse("i10"), Some(Square::new_unchecked(8, 9)));
        assert_eq!(Square::parse("e9"), Some(Square::new_unchecked(4, 8)));
        assert_eq!(Square::parse("a01"), Square::parse("a1"));
        assert_eq!(Square::parse("a0"), None);
        assert_eq!(Square::parse("a11"), None);
        assert_eq!(Square::parse("j1"), None);
        assert_eq!(Square::parse("A1"), None);
        assert_eq!(Square::parse("a"), None);
        assert_eq!(Square::parse("a100"), None);
        assert_eq!(Square::parse("1a"), None);
        assert_eq!(Square::parse("a-1"), None);
        assert_eq!(Square::parse("a+1"), None);
        assert_eq!(Square::parse("é1"), None);
        assert_eq!(Square::parse(""), None);
    }

    #[test]
    fn square_label_round_trip() {
        for index in 0..SQUARE_COUNT {
            let square = Square::from_index(index).expect("in range");
            assert_eq!(square.index(), index);
            assert_eq!(Square::parse(&square.to_string()), Some(square));
        }
        assert_eq!(Square::from_index(SQUARE_COUNT), None);
    }

    #[test]
    fn square_offset_stays_on_board() {
        let corner = Square::new_unchecked(0, 0);
        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(0, -1), None);
        assert_eq!(corner.offset(8, 9), Some(Square::new_unchecked(8, 9)));
        assert_eq!(corner.offset(9, 0), None);
        assert_eq!(corner.offset(0, 10), None);
    }

    #[test]
    fn square_set_operations() {
        let a1 = Square::new_unchecked(0, 0);
        let i10 = Square::new_unchecked(8, 9);
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());

        set.insert(i10);
        set.insert(a1);
        set.insert(a1);
        assert_eq!(set.len(), 2);
        assert!(set.contains(a1));
        assert_eq!(set.labels(), vec!["a1".to_string(), "i10".to_string()]);
        assert_eq!(set.to_string(), "a1, i10");

        set.remove(a1);
        assert!(!set.contains(a1));

        let union = set | [a1].into_iter().collect::<SquareSet>();
        assert_eq!(union.len(), 2);
    }

    #[test]
    fn piece_and_square_are_two_bytes() {
        assert_eq!(core::mem::size_of::<Piece>(), 2);
        assert_eq!(core::mem::size_of::<Square>(), 2);
    }

    #[test]
    fn game_state_winner() {
        assert_eq!(GameState::win_for(Owner::First), GameState::FirstWins);
        assert_eq!(GameState::SecondWins.winner(), Some(Owner::Second));
        assert!(!GameState::InProgress.is_terminal());
        assert_eq!(GameState::FirstWins.to_string(), "blue won");
    }
}
