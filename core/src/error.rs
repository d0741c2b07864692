//! Error types for the rules engine.
//!
//! Every rule violation is recoverable and reported as a [`Rejected`] value;
//! a rejected request never mutates the session.

use thiserror::Error;

/// Why a move request was refused.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rejected {
    /// A coordinate lies outside the 8x8 board.
    #[error("coordinates are off the board")]
    OutOfRange,

    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,

    /// A capture chain is in progress and must be continued from another square.
    #[error("the capturing piece must continue its jump")]
    WrongContinuationOrigin,

    /// The origin square is empty.
    #[error("there is no piece on the origin square")]
    NoPieceToMove,

    /// The piece on the origin square belongs to the opponent.
    #[error("it is not this piece's turn")]
    NotYourTurn,

    /// Origin and destination are not on one diagonal.
    #[error("moves must follow a diagonal")]
    NotDiagonal,

    /// The destination square is not empty.
    #[error("the destination square is occupied")]
    OccupiedDestination,

    /// A non-capturing move was requested while a capture is mandatory.
    #[error("a capture is available and must be taken")]
    NoCaptureAvailableButMandatory,

    /// Well-formed but violates distance, direction or clean-ray rules.
    #[error("the move is not legal for this piece")]
    IllegalMove,
}

/// Errors from parsing a text board diagram.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum DiagramError {
    #[error("expected 8 rows, got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} squares, expected 8")]
    WrongRowLength { row: usize, len: usize },

    #[error("invalid piece character '{ch}' at {row},{col}")]
    InvalidPiece { ch: char, row: usize, col: usize },

    #[error("piece on light square {row},{col}")]
    LightSquare { row: usize, col: usize },
}

/// Errors from parsing the textual forms of core types.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    #[error("invalid player: {0}")]
    Player(String),

    #[error("invalid square: {0} (expected row,col with both in 0-7)")]
    Square(String),

    #[error("invalid difficulty: {0} (expected easy, medium or hard)")]
    Difficulty(String),
}
