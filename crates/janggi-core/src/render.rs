use std::fmt;

use crate::board::Board;
use crate::constants::{COLUMNS, COLUMN_LABELS, EMPTY_CODE, ROWS};
use crate::types::{Owner, Piece, Square, SquareSet};

pub const MARKER: char = 'x';

const PLAIN_LINKS: &str = "   |   |   |   |   |   |   |   |   |";
const FALLING_LINKS: &str = "   |   |   |   | \\ | / |   |   |   |";
const RISING_LINKS: &str = "   |   |   |   | / | \\ |   |   |   |";

/// Text picture of a board: one line per row joined by `-`, the connecting
/// lines between rows with the palace diagonals, and column letters at the
/// bottom. Marked squares print as `x`.
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    board: &'a Board,
    markers: SquareSet,
    colored: bool,
}

impl<'a> BoardView<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            markers: SquareSet::EMPTY,
            colored: false,
        }
    }

    pub fn markers(mut self, markers: SquareSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    fn write_cell(&self, f: &mut fmt::Formatter<'_>, square: Square) -> fmt::Result {
        if self.markers.contains(square) {
            return write!(f, "{MARKER}");
        }
        match self.board.get(square) {
            None => write!(f, "{EMPTY_CODE}"),
            Some(piece) if self.colored => write!(f, "{}", paint(piece)),
            Some(piece) => write!(f, "{}", piece.code()),
        }
    }
}

fn paint(piece: Piece) -> String {
    let color = match piece.owner {
        Owner::First => 34,
        Owner::Second => 31,
    };
    format!("\x1b[{color}m{}\x1b[0m", piece.code())
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..ROWS {
            write!(f, "{:<3}", row + 1)?;
            for column in 0..COLUMNS {
                if column > 0 {
                    f.write_str(" - ")?;
                }
                self.write_cell(f, Square::new_unchecked(column, row))?;
            }
            writeln!(f)?;

            let links = match row {
                0 | 7 => FALLING_LINKS,
                1 | 8 => RISING_LINKS,
                9 => continue,
                _ => PLAIN_LINKS,
            };
            writeln!(f, "{links}")?;
        }

        f.write_str("  ")?;
        for label in COLUMN_LABELS {
            write!(f, " {label}  ")?;
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_opening_layout() {
        let text = BoardView::new(&Board::opening()).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 20);
        assert_eq!(lines[0], "1  r - e - h - g -   - g - e - h - r");
        assert_eq!(lines[1], FALLING_LINKS);
        assert_eq!(lines[3], RISING_LINKS);
        assert_eq!(lines[18], "10 R - E - H - G -   - G - E - H - R");
        assert_eq!(lines[19].trim_end(), "   a   b   c   d   e   f   g   h   i");
    }

    #[test]
    fn markers_replace_cells() {
        let board = Board::opening();
        let markers = [Square::parse("a6").expect("valid")].into_iter().collect();
        let text = BoardView::new(&board).markers(markers).to_string();
        let row6 = text.lines().nth(10).expect("row 6");
        assert!(row6.starts_with("6  x - "));
    }

    #[test]
    fn colored_output_wraps_pieces() {
        let text = BoardView::new(&Board::opening()).colored(true).to_string();
        assert!(text.contains("\x1b[31mr\x1b[0m"));
        assert!(text.contains("\x1b[34mK\x1b[0m"));
    }
}
