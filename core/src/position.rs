use crate::board::Board;
use crate::move_gen::legal_moves;
use crate::rules::has_any_capture;
use crate::types::{ContinuationStatus, Move, Player, Square};

/// A board together with whose turn it is and any capture chain in progress.
/// This is what the search and perft walk over; it is a plain value, so
/// every child position is an independent copy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Position {
    pub board: Board,
    pub to_move: Player,
    pub forced: Option<Square>,
}

impl Position {
    pub const fn new(board: Board, to_move: Player) -> Self {
        Self {
            board,
            to_move,
            forced: None,
        }
    }

    /// Standard opening position, White to move.
    pub fn starting_position() -> Self {
        Self::new(Board::starting_position(), Player::White)
    }

    /// Legal moves for the side to move.
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(&self.board, self.to_move, self.forced)
    }

    /// Returns the position after `mv`, which must be legal here.
    ///
    /// A capture whose landed piece can capture again keeps the same side to
    /// move with the landing square forced; anything else hands the turn over.
    /// Promotion happens before the continuation check.
    pub fn play(&self, mv: &Move) -> Self {
        let board = self.board.apply(mv);
        match continuation_after(&board, self.to_move, mv) {
            ContinuationStatus::MustContinue(square) => Self {
                board,
                to_move: self.to_move,
                forced: Some(square),
            },
            ContinuationStatus::TurnPassed => Self::new(board, self.to_move.opponent()),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::starting_position()
    }
}

/// Decides whether the mover keeps the turn after `mv` was applied to `board`.
pub fn continuation_after(board: &Board, mover: Player, mv: &Move) -> ContinuationStatus {
    if mv.is_capture() && has_any_capture(board, mover, mv.to) {
        ContinuationStatus::MustContinue(mv.to)
    } else {
        ContinuationStatus::TurnPassed
    }
}
