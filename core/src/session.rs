//! Live game state: the only place where a game is mutated.
//! Collaborators drive it through `commit_move` and poll it afterwards.

use crate::board::Board;
use crate::error::Rejected;
use crate::move_gen::{has_any_legal_move, legal_moves, legal_moves_from};
use crate::position::{continuation_after, Position};
use crate::rules::{has_mandatory_captures, validate_move};
use crate::types::*;
use tracing::{debug, trace};

/// Where a session stands in its turn cycle.
/// Piece selection is tracked by the collaborator; see [`Session::is_selectable`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SessionState {
    AwaitingSelection,
    ForcedContinuation(Square),
    Terminal(Player),
}

/// One game: board, side to move, capture chain in progress and AI settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    position: Position,
    config: AiConfig,
    /// Number of committed moves, chain steps included
    plies: u32,
}

impl Session {
    /// Starts a new game in the standard position. White moves first.
    pub fn new(difficulty: Difficulty, ai_player: Option<Player>) -> Self {
        Self::with_config(AiConfig::new(difficulty, ai_player))
    }

    pub fn with_config(config: AiConfig) -> Self {
        debug!(
            ai = ?config.ai_player,
            difficulty = %config.difficulty,
            "new game"
        );
        Self {
            position: Position::starting_position(),
            config,
            plies: 0,
        }
    }

    /// Starts from an arbitrary board with the given side to move.
    pub fn from_board(board: Board, to_move: Player, config: AiConfig) -> Self {
        Self {
            position: Position::new(board, to_move),
            config,
            plies: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.position.board
    }

    /// Snapshot of the board, side to move and pending chain.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Piece at the given coordinates; off-board coordinates read as empty.
    pub fn piece_at(&self, row: i32, col: i32) -> Option<Piece> {
        Square::from_coords(row, col).and_then(|sq| self.position.board.piece_at(sq))
    }

    pub fn current_player(&self) -> Player {
        self.position.to_move
    }

    /// The square that has to continue capturing, if a chain is in progress.
    pub fn must_continue(&self) -> Option<Square> {
        self.position.forced
    }

    /// True if the side to move has a capture somewhere on the board.
    /// Always false while a chain is in progress: the chain itself decides.
    pub fn has_mandatory_captures(&self) -> bool {
        self.position.forced.is_none()
            && has_mandatory_captures(&self.position.board, self.position.to_move)
    }

    pub fn config(&self) -> AiConfig {
        self.config
    }

    pub fn ai_player(&self) -> Option<Player> {
        self.config.ai_player
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// True if the configured AI is the side to move (chains included).
    pub fn is_ai_turn(&self) -> bool {
        self.config.ai_player == Some(self.position.to_move)
    }

    pub fn move_count(&self) -> u32 {
        self.plies
    }

    /// Legal moves for the side to move in the current state.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position.legal_moves()
    }

    /// Legal moves of the piece on the given square, for move highlighting.
    pub fn legal_moves_from(&self, square: Square) -> Vec<Move> {
        legal_moves_from(
            &self.position.board,
            self.position.to_move,
            self.position.forced,
            square,
        )
    }

    /// True iff a human may pick up the piece on this square now: it belongs
    /// to the side to move, that side is not the AI, the chain (if any)
    /// starts there, and the piece has a move under the mandatory-capture rule.
    pub fn is_selectable(&self, row: i32, col: i32) -> bool {
        let Some(square) = Square::from_coords(row, col) else {
            return false;
        };
        if self.is_ai_turn() || self.winner().is_some() {
            return false;
        }
        !self.legal_moves_from(square).is_empty()
    }

    /// True if moving from `from` to `to` would be accepted.
    pub fn is_legal_move(&self, from: (i32, i32), to: (i32, i32)) -> bool {
        self.validate(from, to).is_ok()
    }

    /// Checks a move request without committing it.
    pub fn validate(&self, from: (i32, i32), to: (i32, i32)) -> Result<Move, Rejected> {
        let from = Square::from_coords(from.0, from.1).ok_or(Rejected::OutOfRange)?;
        let to = Square::from_coords(to.0, to.1).ok_or(Rejected::OutOfRange)?;
        self.validate_squares(from, to)
    }

    fn validate_squares(&self, from: Square, to: Square) -> Result<Move, Rejected> {
        if self.winner().is_some() {
            return Err(Rejected::GameOver);
        }
        validate_move(
            &self.position.board,
            self.position.to_move,
            self.position.forced,
            from,
            to,
        )
    }

    /// Validates and commits a move. On rejection nothing changes.
    pub fn commit_move(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
    ) -> Result<ContinuationStatus, Rejected> {
        let from = Square::from_coords(from.0, from.1).ok_or(Rejected::OutOfRange)?;
        let to = Square::from_coords(to.0, to.1).ok_or(Rejected::OutOfRange)?;
        self.commit_squares(from, to)
    }

    /// Same as [`Session::commit_move`] for callers that already hold squares.
    pub fn commit_squares(
        &mut self,
        from: Square,
        to: Square,
    ) -> Result<ContinuationStatus, Rejected> {
        let mv = match self.validate_squares(from, to) {
            Ok(mv) => mv,
            Err(reason) => {
                debug!(%from, %to, %reason, "move rejected");
                return Err(reason);
            }
        };

        let mover = self.position.to_move;
        for captured in &mv.captured {
            trace!(square = %captured, "captured");
        }
        let promoted = self.position.board.apply_in_place(&mv);
        self.plies += 1;
        debug!(player = %mover, mv = %mv, promoted, "move committed");

        let status = continuation_after(&self.position.board, mover, &mv);
        match status {
            ContinuationStatus::MustContinue(square) => {
                self.position.forced = Some(square);
                debug!(player = %mover, %square, "capture chain continues");
            }
            ContinuationStatus::TurnPassed => {
                self.position.forced = None;
                self.position.to_move = mover.opponent();
                debug!(next = %self.position.to_move, "turn passed");
            }
        }

        Ok(status)
    }

    /// The winner, once the game is decided. A side loses when it has no
    /// pieces left, or when it is to move and has no legal move.
    pub fn winner(&self) -> Option<Player> {
        let board = &self.position.board;
        if board.count(Player::Black) == 0 {
            return Some(Player::White);
        }
        if board.count(Player::White) == 0 {
            return Some(Player::Black);
        }

        let to_move = self.position.to_move;
        let can_move = match self.position.forced {
            Some(_) => !legal_moves(board, to_move, self.position.forced).is_empty(),
            None => has_any_legal_move(board, to_move),
        };
        if can_move {
            None
        } else {
            Some(to_move.opponent())
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some()
    }

    pub fn state(&self) -> SessionState {
        if let Some(winner) = self.winner() {
            return SessionState::Terminal(winner);
        }
        match self.position.forced {
            Some(square) => SessionState::ForcedContinuation(square),
            None => SessionState::AwaitingSelection,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::with_config(AiConfig::human_only())
    }
}
