use crate::board::{Board, BoardError};
use crate::movegen::destinations;
use crate::types::{Owner, Square, SquareSet};

pub fn attacked_squares(board: &Board, by: Owner) -> SquareSet {
    board
        .occupants()
        .filter(|placed| placed.piece.owner == by)
        .map(|placed| destinations(board, placed.square))
        .fold(SquareSet::EMPTY, |acc, set| acc | set)
}

pub fn is_square_attacked(board: &Board, square: Square, by: Owner) -> bool {
    board
        .occupants()
        .filter(|placed| placed.piece.owner == by)
        .any(|placed| destinations(board, placed.square).contains(square))
}

pub fn is_in_check(board: &Board, owner: Owner) -> Result<bool, BoardError> {
    let general = board.general_of(owner)?;
    Ok(is_square_attacked(board, general, owner.opponent()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Piece, PieceKind};

    fn sq(label: &str) -> Square {
        Square::parse(label).expect("valid square")
    }

    #[test]
    fn opening_is_quiet() {
        let board = Board::opening();
        assert_eq!(is_in_check(&board, Owner::First), Ok(false));
        assert_eq!(is_in_check(&board, Owner::Second), Ok(false));
        assert!(attacked_squares(&board, Owner::First).contains(sq("a6")));
    }

    #[test]
    fn chariot_on_open_file_gives_check() {
        let mut board = Board::empty();
        board.put(sq("e2"), Piece::new(PieceKind::General, Owner::Second));
        board.put(sq("e9"), Piece::new(PieceKind::General, Owner::First));
        board.put(sq("e5"), Piece::new(PieceKind::Chariot, Owner::First));
        assert_eq!(is_in_check(&board, Owner::Second), Ok(true));

        board.put(sq("e4"), Piece::new(PieceKind::Soldier, Owner::Second));
        assert_eq!(is_in_check(&board, Owner::Second), Ok(false));
    }

    #[test]
    fn missing_general_is_an_error() {
        let board = Board::empty();
        assert_eq!(
            is_in_check(&board, Owner::First),
            Err(BoardError::MissingGeneral(Owner::First))
        );
    }
}
