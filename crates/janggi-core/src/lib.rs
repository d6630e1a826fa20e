pub mod board;
pub mod catalog;
pub mod check;
pub mod checkmate;
pub mod constants;
pub mod game;
pub mod movegen;
pub mod render;
pub mod setup;
pub mod snapshot;
pub mod types;

pub use board::{Board, BoardError, Trial};
pub use catalog::{profile, MovementProfile, Range};
pub use check::{attacked_squares, is_in_check, is_square_attacked};
pub use checkmate::is_checkmate;
pub use constants::{in_palace, OPENING_LAYOUT, SQUARES};
pub use game::{Janggi, MoveError, MoveOutcome};
pub use movegen::destinations;
pub use render::BoardView;
pub use setup::{layout, BackRank, SetupError};
pub use snapshot::{Snapshot, SnapshotError};
pub use types::{GameState, Owner, Piece, PieceKind, Placed, Square, SquareSet};
