use crate::types::{Owner, PieceKind};

/// `(columns, rows)` offsets. Rows grow toward row 10.
pub type Vector = (i8, i8);

pub const ORTHOGONAL: [Vector; 4] = [(1, 0), (-1, 0), (0, -1), (0, 1)];

pub const HORSE_LEAPS: [Vector; 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const ELEPHANT_LEAPS: [Vector; 8] = [
    (-3, -2),
    (-3, 2),
    (-2, -3),
    (-2, 3),
    (2, -3),
    (2, 3),
    (3, -2),
    (3, 2),
];

/// First starts on rows 8-10 and advances toward row 1.
pub const FIRST_SOLDIER: [Vector; 3] = [(-1, 0), (1, 0), (0, -1)];
pub const SECOND_SOLDIER: [Vector; 3] = [(-1, 0), (1, 0), (0, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    Step(u8),
    Unlimited,
}

impl Range {
    pub const fn allows(self, steps: u8) -> bool {
        match self {
            Self::Step(max) => steps <= max,
            Self::Unlimited => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementProfile {
    pub vectors: &'static [Vector],
    pub range: Range,
    pub confined: bool,
    pub palace_diagonals: bool,
}

impl MovementProfile {
    pub fn horizontal(self) -> impl Iterator<Item = Vector> {
        self.vectors
            .iter()
            .copied()
            .filter(|&(columns, rows)| columns != 0 && rows == 0)
    }

    pub fn vertical(self) -> impl Iterator<Item = Vector> {
        self.vectors
            .iter()
            .copied()
            .filter(|&(columns, rows)| columns == 0 && rows != 0)
    }
}

const fn stepper(
    vectors: &'static [Vector],
    confined: bool,
    palace_diagonals: bool,
) -> MovementProfile {
    MovementProfile {
        vectors,
        range: Range::Step(1),
        confined,
        palace_diagonals,
    }
}

pub const GENERAL: MovementProfile = stepper(&ORTHOGONAL, true, true);
pub const GUARD: MovementProfile = stepper(&ORTHOGONAL, true, true);
pub const HORSE: MovementProfile = stepper(&HORSE_LEAPS, false, false);
pub const ELEPHANT: MovementProfile = stepper(&ELEPHANT_LEAPS, false, false);
pub const CHARIOT: MovementProfile = MovementProfile {
    vectors: &ORTHOGONAL,
    range: Range::Unlimited,
    confined: false,
    palace_diagonals: true,
};
/// The Cannon's screen rules live in the move generator; the profile only
/// lists its lines.
pub const CANNON: MovementProfile = MovementProfile {
    vectors: &ORTHOGONAL,
    range: Range::Unlimited,
    confined: false,
    palace_diagonals: false,
};
pub const FIRST_SOLDIER_PROFILE: MovementProfile = stepper(&FIRST_SOLDIER, false, true);
pub const SECOND_SOLDIER_PROFILE: MovementProfile = stepper(&SECOND_SOLDIER, false, true);

pub const fn profile(kind: PieceKind, owner: Owner) -> MovementProfile {
    match (kind, owner) {
        (PieceKind::General, _) => GENERAL,
        (PieceKind::Guard, _) => GUARD,
        (PieceKind::Horse, _) => HORSE,
        (PieceKind::Elephant, _) => ELEPHANT,
        (PieceKind::Chariot, _) => CHARIOT,
        (PieceKind::Cannon, _) => CANNON,
        (PieceKind::Soldier, Owner::First) => FIRST_SOLDIER_PROFILE,
        (PieceKind::Soldier, Owner::Second) => SECOND_SOLDIER_PROFILE,
    }
}

pub const fn is_leaper(kind: PieceKind) -> bool {
    matches!(kind, PieceKind::Horse | PieceKind::Elephant)
}
