use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, BoardError};
use crate::check;
use crate::checkmate;
use crate::movegen::destinations;
use crate::render::BoardView;
use crate::snapshot::{Snapshot, SnapshotError};
use crate::types::{GameState, Owner, Piece, Placed, Square, SquareSet};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("{0:?} is not a square")]
    InvalidSquare(String),
    #[error("no piece on {0}")]
    EmptySquare(Square),
    #[error("the piece on {0} belongs to the other player")]
    NotYourPiece(Square),
    #[error("the piece on {from} cannot reach {to}")]
    Unreachable { from: Square, to: Square },
    #[error("that move would leave the general in check")]
    SelfCheck,
    #[error(transparent)]
    Board(#[from] BoardError),
}

impl MoveError {
    /// Fatal errors come from a broken position rather than a bad move.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Board(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Passed,
    Moved { captured: Option<Piece> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Janggi {
    board: Board,
    turn: Owner,
    state: GameState,
}

impl Janggi {
    pub fn new() -> Self {
        Self::from_snapshot(&Snapshot::opening())
    }

    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        Self {
            board: Board::from_snapshot(snapshot),
            turn: Owner::First,
            state: GameState::InProgress,
        }
    }

    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, SnapshotError> {
        Ok(Self::from_snapshot(&Snapshot::parse(rows)?))
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn turn(&self) -> Owner {
        self.turn
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    pub fn square_valid(label: &str) -> bool {
        Square::parse(label).is_some()
    }

    pub fn piece_at(&self, label: &str) -> Option<Placed> {
        self.board.piece_at(label)
    }

    pub fn is_in_check(&self, owner: Owner) -> Result<bool, BoardError> {
        check::is_in_check(&self.board, owner)
    }

    pub fn is_checkmate(&self, owner: Owner) -> Result<bool, BoardError> {
        let mut board = self.board;
        checkmate::is_checkmate(&mut board, owner)
    }

    /// Destinations of the piece on `label` that keep its own General safe.
    ///
    /// Empty when the label is malformed, the square is empty, or the piece
    /// belongs to the side not on move.
    pub fn legal_destinations(&self, label: &str) -> Result<SquareSet, BoardError> {
        let Some(placed) = self.piece_at(label) else {
            return Ok(SquareSet::EMPTY);
        };
        if placed.piece.owner != self.turn {
            return Ok(SquareSet::EMPTY);
        }

        let mut board = self.board;
        let mut legal = SquareSet::EMPTY;
        for to in destinations(&board, placed.square) {
            let trial = board.trial(placed.square, to)?;
            if !check::is_in_check(&trial, self.turn)? {
                legal.insert(to);
            }
        }
        Ok(legal)
    }

    /// Moves the piece on `from` to `to` for the side on move.
    ///
    /// Identical labels pass the turn. A rejected move leaves the game
    /// untouched; so does a [`MoveError::Board`] failure.
    pub fn play(&mut self, from: &str, to: &str) -> Result<MoveOutcome, MoveError> {
        if self.state.is_terminal() {
            debug!("rejected {from} -> {to}: game is over ({})", self.state);
            return Err(MoveError::GameOver);
        }

        if from == to {
            info!("{} passes", self.turn);
            self.turn = self.turn.opponent();
            return Ok(MoveOutcome::Passed);
        }

        let origin = parse_label(from)?;
        let target = parse_label(to)?;

        let piece = self.board.get(origin).ok_or_else(|| {
            debug!("rejected {from} -> {to}: empty origin");
            MoveError::EmptySquare(origin)
        })?;
        if piece.owner != self.turn {
            debug!("rejected {from} -> {to}: {} does not own the piece", self.turn);
            return Err(MoveError::NotYourPiece(origin));
        }
        if !destinations(&self.board, origin).contains(target) {
            debug!("rejected {from} -> {to}: unreachable for {}", piece.kind.name());
            return Err(MoveError::Unreachable {
                from: origin,
                to: target,
            });
        }

        let mover = self.turn;
        let mut trial = self.board.trial(origin, target)?;
        if check::is_in_check(&trial, mover)? {
            debug!("rejected {from} -> {to}: {mover} general left in check");
            return Err(MoveError::SelfCheck);
        }
        let mated = checkmate::is_checkmate(trial.board_mut(), mover.opponent())?;
        let captured = trial.commit();

        info!("{mover} {} {from} -> {to}", piece.kind.name());
        if let Some(captured) = captured {
            debug!("{mover} captures {} on {to}", captured.kind.name());
        }

        self.turn = mover.opponent();
        if mated {
            self.state = GameState::win_for(mover);
            info!("checkmate: {}", self.state);
        }
        Ok(MoveOutcome::Moved { captured })
    }

    pub fn make_move(&mut self, from: &str, to: &str) -> Result<bool, BoardError> {
        match self.play(from, to) {
            Ok(_) => Ok(true),
            Err(MoveError::Board(error)) => Err(error),
            Err(_) => Ok(false),
        }
    }

    pub fn render(&self) -> BoardView<'_> {
        BoardView::new(&self.board)
    }

    pub fn render_with_markers(&self, markers: &SquareSet) -> BoardView<'_> {
        BoardView::new(&self.board).markers(*markers)
    }
}

impl Default for Janggi {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_label(label: &str) -> Result<Square, MoveError> {
    Square::parse(label).ok_or_else(|| {
        debug!("rejected move: {label:?} is not a square");
        MoveError::InvalidSquare(label.to_string())
    })
}
