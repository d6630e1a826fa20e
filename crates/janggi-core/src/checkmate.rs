use log::trace;

use crate::board::{Board, BoardError};
use crate::check::{attacked_squares, is_in_check};
use crate::movegen::destinations;
use crate::types::Owner;

/// Whether `owner` is in check with no escape.
///
/// The General escapes if one of its destinations lies outside the set the
/// opponent attacks on the current board; that set is not recomputed after
/// the General steps, so a retreat along the checking line counts as an
/// escape. Otherwise every relocation of every friendly piece is tried on
/// the board and rolled back before the next one.
pub fn is_checkmate(board: &mut Board, owner: Owner) -> Result<bool, BoardError> {
    if !is_in_check(board, owner)? {
        return Ok(false);
    }

    let general = board.general_of(owner)?;
    let attacked = attacked_squares(board, owner.opponent());
    if let Some(escape) = destinations(board, general)
        .iter()
        .find(|&square| !attacked.contains(square))
    {
        trace!("{owner} general escapes {general} -> {escape}");
        return Ok(false);
    }

    for placed in board.pieces_of(owner) {
        for to in destinations(board, placed.square) {
            let trial = board.trial(placed.square, to)?;
            if !is_in_check(&trial, owner)? {
                trace!("{owner} escapes check with {} -> {to}", placed.square);
                return Ok(false);
            }
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use crate::types::{Piece, PieceKind, Square};

    fn sq(label: &str) -> Square {
        Square::parse(label).expect("valid square")
    }

    fn cornered_general() -> Board {
        let mut board = Board::empty();
        board.put(sq("d1"), Piece::new(PieceKind::General, Owner::Second));
        board.put(sq("a1"), Piece::new(PieceKind::Chariot, Owner::First));
        board.put(sq("i2"), Piece::new(PieceKind::Chariot, Owner::First));
        board.put(sq("e5"), Piece::new(PieceKind::Chariot, Owner::First));
        board.put(sq("e9"), Piece::new(PieceKind::General, Owner::First));
        board
    }

    #[test]
    fn no_check_is_no_mate() {
        let mut board = Board::opening();
        assert_eq!(is_checkmate(&mut board, Owner::First), Ok(false));
    }

    #[test]
    fn covered_general_is_mated() {
        let mut board = cornered_general();
        let before = board;
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(true));
        assert_eq!(board, before);
    }

    #[test]
    fn blocking_piece_prevents_mate() {
        let mut board = cornered_general();
        board.put(sq("b5"), Piece::new(PieceKind::Chariot, Owner::Second));
        let before = board;
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(false));
        assert_eq!(board, before);
    }

    #[test]
    fn capturing_the_checker_prevents_mate() {
        let mut board = cornered_general();
        board.put(sq("a3"), Piece::new(PieceKind::Chariot, Owner::Second));
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(false));
    }

    #[test]
    fn general_step_out_of_attack_prevents_mate() {
        let mut board = cornered_general();
        board.clear(sq("i2"));
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(false));
    }

    #[test]
    fn retreat_along_checking_line_counts_as_escape() {
        let mut board = cornered_general();
        board.clear(sq("e5"));
        assert_eq!(is_in_check(&board, Owner::Second), Ok(true));
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(false));
    }

    #[test]
    fn each_trial_starts_from_the_original_position() {
        let snapshot = Snapshot::parse(&[
            " S  k    ",
            "         ",
            "    E E E",
            "    C    ",
            "     h  r",
            "     Cr  ",
            "S  h     ",
            "E   sC   ",
            "   G     ",
            "    Kg   ",
        ])
        .expect("valid rows");
        let mut board = Board::from_snapshot(&snapshot);
        assert_eq!(is_checkmate(&mut board, Owner::Second), Ok(true));
        assert_eq!(board.snapshot(), snapshot);
    }
}
