use std::mem::size_of;

use janggi_core::board::{Board, BoardError};
use janggi_core::snapshot::Snapshot;
use janggi_core::types::{Owner, Piece, PieceKind, Placed, Square};
use janggi_core::OPENING_LAYOUT;

fn sq(label: &str) -> Square {
    Square::parse(label).expect("valid square")
}

#[test]
fn board_is_small_enough_to_copy() {
    assert!(
        size_of::<Board>() <= 200,
        "board too large: {}",
        size_of::<Board>()
    );
}

#[test]
fn opening_board_places_both_sides() {
    let board = Board::opening();

    assert_eq!(
        board.piece_at("e9"),
        Some(Placed {
            piece: Piece::new(PieceKind::General, Owner::First),
            square: sq("e9"),
        })
    );
    assert_eq!(
        board.get(sq("b3")),
        Some(Piece::new(PieceKind::Cannon, Owner::Second))
    );
    assert_eq!(
        board.get(sq("h8")),
        Some(Piece::new(PieceKind::Cannon, Owner::First))
    );
    assert_eq!(board.pieces_of(Owner::First).len(), 16);
    assert_eq!(board.pieces_of(Owner::Second).len(), 16);
    assert_eq!(board.general_of(Owner::Second), Ok(sq("e2")));
}

#[test]
fn piece_at_ignores_bad_labels() {
    let board = Board::opening();
    assert_eq!(board.piece_at("z9"), None);
    assert_eq!(board.piece_at("A1"), None);
    assert_eq!(board.piece_at(""), None);
    assert_eq!(board.piece_at("e5"), None);
}

#[test]
fn relocate_captures_and_reports_empty_origin() {
    let mut board = Board::opening();
    assert_eq!(
        board.relocate(sq("a10"), sq("a1")),
        Ok(Some(Piece::new(PieceKind::Chariot, Owner::Second)))
    );
    assert_eq!(board.get(sq("a10")), None);
    assert_eq!(
        board.get(sq("a1")),
        Some(Piece::new(PieceKind::Chariot, Owner::First))
    );
    assert_eq!(
        board.relocate(sq("e5"), sq("e6")),
        Err(BoardError::EmptySquare(sq("e5")))
    );
}

#[test]
fn snapshot_round_trip_reproduces_board() {
    let mut board = Board::opening();
    board.relocate(sq("c7"), sq("d7")).expect("occupied");
    board.clear(sq("b3"));

    let snapshot = board.snapshot();
    let mut reloaded = Board::empty();
    reloaded.load(&snapshot);
    assert_eq!(reloaded, board);
    assert_eq!(reloaded.snapshot(), snapshot);
}

#[test]
fn load_replaces_every_cell() {
    let mut board = Board::opening();
    board.load(&Snapshot::empty());
    assert_eq!(board.occupants().count(), 0);

    board.load(&Snapshot::parse(&OPENING_LAYOUT).expect("valid layout"));
    assert_eq!(board, Board::opening());
}

#[test]
fn general_outside_own_palace_is_missing() {
    let rows = [
        "         ",
        "    k    ",
        "         ",
        "         ",
        "    K    ",
        "         ",
        "         ",
        "         ",
        "         ",
        "         ",
    ];
    let board = Board::from_snapshot(&Snapshot::parse(&rows).expect("valid rows"));
    assert_eq!(board.general_of(Owner::Second), Ok(sq("e2")));
    assert_eq!(
        board.general_of(Owner::First),
        Err(BoardError::MissingGeneral(Owner::First))
    );
}

#[test]
fn failed_trial_inside_early_return_restores_board() {
    fn try_relocations(board: &mut Board) -> Result<(), BoardError> {
        let trial = board.trial(sq("e7"), sq("e6"))?;
        trial.general_of(Owner::First)?;
        board_error_after(&trial)?;
        Ok(())
    }

    fn board_error_after(board: &Board) -> Result<(), BoardError> {
        board.general_of(Owner::Second).map(|_| ())?;
        Err(BoardError::EmptySquare(sq("e5")))
    }

    let mut board = Board::opening();
    let before = board;
    assert_eq!(try_relocations(&mut board), Err(BoardError::EmptySquare(sq("e5"))));
    assert_eq!(board, before);
}
