use crate::board::Board;
use crate::catalog::{is_leaper, profile, MovementProfile, Vector, ORTHOGONAL};
use crate::constants::{in_palace, palace_corner_center, palace_diagonal_neighbors};
use crate::types::{Piece, PieceKind, Square, SquareSet};

/// Squares the piece on `origin` may move to, ignoring whether the move
/// exposes its own General. Empty when `origin` is empty.
pub fn destinations(board: &Board, origin: Square) -> SquareSet {
    let Some(piece) = board.get(origin) else {
        return SquareSet::EMPTY;
    };

    if piece.kind == PieceKind::Cannon {
        return cannon_destinations(board, origin, piece);
    }

    let profile = profile(piece.kind, piece.owner);
    let mut result = SquareSet::EMPTY;
    for &vector in profile.vectors {
        if is_leaper(piece.kind) && leg_blocked(board, origin, vector) {
            continue;
        }
        walk(board, origin, piece, vector, profile, &mut result);
    }

    if profile.palace_diagonals {
        palace_diagonal_destinations(board, origin, piece, profile, &mut result);
    }

    if profile.confined {
        result = result.iter().filter(|&square| in_palace(square)).collect();
    }
    result
}

/// Walks one vector up to the profile's range. Friendly pieces stop the walk
/// before their square, enemy pieces after it.
fn walk(
    board: &Board,
    origin: Square,
    piece: Piece,
    (columns, rows): Vector,
    profile: MovementProfile,
    out: &mut SquareSet,
) {
    let mut current = origin;
    let mut steps = 1u8;
    while profile.range.allows(steps) {
        let Some(next) = current.offset(columns, rows) else {
            break;
        };
        if !visit(board, piece, next, out) {
            break;
        }
        current = next;
        steps = steps.saturating_add(1);
    }
}

fn visit(board: &Board, piece: Piece, square: Square, out: &mut SquareSet) -> bool {
    match board.get(square) {
        None => {
            out.insert(square);
            true
        }
        Some(occupant) => {
            if occupant.owner != piece.owner {
                out.insert(square);
            }
            false
        }
    }
}

/// True when any square on the leap path is occupied.
///
/// The path shrinks both axes toward zero, one unit at a time, while both
/// are non-zero: a Horse leap `(1, 2)` passes `(0, 1)`, an Elephant leap
/// `(2, 3)` passes `(1, 2)` and `(0, 1)`.
pub fn leg_blocked(board: &Board, origin: Square, (mut columns, mut rows): Vector) -> bool {
    while columns != 0 && rows != 0 {
        columns -= columns.signum();
        rows -= rows.signum();
        match origin.offset(columns, rows) {
            Some(square) if board.occupied(square) => return true,
            Some(_) => {}
            None => return true,
        }
    }
    false
}

fn palace_diagonal_destinations(
    board: &Board,
    origin: Square,
    piece: Piece,
    profile: MovementProfile,
    out: &mut SquareSet,
) {
    if palace_diagonal_neighbors(origin).is_empty() {
        return;
    }

    for (columns, _) in profile.horizontal() {
        for (_, rows) in profile.vertical() {
            let mut current = origin;
            let mut steps = 1u8;
            while profile.range.allows(steps) {
                let Some(next) = current.offset(columns, rows) else {
                    break;
                };
                if !palace_diagonal_neighbors(current).contains(&next) {
                    break;
                }
                if !visit(board, piece, next, out) {
                    break;
                }
                current = next;
                steps = steps.saturating_add(1);
            }
        }
    }
}

fn cannon_destinations(board: &Board, origin: Square, piece: Piece) -> SquareSet {
    let mut result = SquareSet::EMPTY;

    for (columns, rows) in ORTHOGONAL {
        let mut screened = false;
        let mut current = origin;
        while let Some(next) = current.offset(columns, rows) {
            current = next;
            let Some(occupant) = board.get(next) else {
                if screened {
                    result.insert(next);
                }
                continue;
            };
            if occupant.kind == PieceKind::Cannon {
                break;
            }
            if !screened {
                screened = true;
                continue;
            }
            if occupant.owner != piece.owner {
                result.insert(next);
            }
            break;
        }
    }

    if let Some(target) = corner_jump(board, origin, piece) {
        result.insert(target);
    }
    result
}

fn corner_jump(board: &Board, origin: Square, piece: Piece) -> Option<Square> {
    let center = palace_corner_center(origin)?;
    let screen = board.get(center)?;
    if screen.kind == PieceKind::Cannon {
        return None;
    }

    let columns = center.column() as i8 - origin.column() as i8;
    let rows = center.row() as i8 - origin.row() as i8;
    let target = center.offset(columns, rows)?;
    match board.get(target) {
        None => Some(target),
        Some(occupant) if occupant.owner != piece.owner && occupant.kind != PieceKind::Cannon => {
            Some(target)
        }
        Some(_) => None,
    }
}
