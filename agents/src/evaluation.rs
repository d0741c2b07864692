use checkers_core::rules::threat_count;
use checkers_core::{count_moves, Board, Piece, Player, Rank, Square};
use std::fmt;

/// Points per man of material; every weight below is in the same unit so
/// that scores stay whole numbers.
pub const POSITION_SCALE: i32 = 10;
/// One row of progress toward the promotion row, men only.
pub const ADVANCEMENT_WEIGHT: i32 = 2;
/// Bonus for any piece standing in the central 4x4 block.
pub const CENTER_BONUS: i32 = 3;
/// Penalty per attacker for a threatened man / king.
pub const MAN_THREAT: i32 = 30;
pub const KING_THREAT: i32 = 60;

/// Per-term view of an evaluation in points, every term already oriented
/// so that positive favors the perspective player.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EvalBreakdown {
    pub material: i32,
    pub advancement: i32,
    pub center: i32,
    pub threats: i32,
    pub mobility: i32,
}

impl EvalBreakdown {
    pub fn total(&self) -> i32 {
        self.material + self.advancement + self.center + self.threats + self.mobility
    }
}

impl fmt::Display for EvalBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "material     {:>6}", self.material)?;
        writeln!(f, "advancement  {:>6}", self.advancement)?;
        writeln!(f, "center       {:>6}", self.center)?;
        writeln!(f, "threats      {:>6}", self.threats)?;
        writeln!(f, "mobility     {:>6}", self.mobility)?;
        write!(f, "total        {:>6}", self.total())
    }
}

/// Scores a board from `perspective`'s point of view; higher is better.
/// The value is always a whole number, so equal positions compare equal.
pub fn evaluate(board: &Board, perspective: Player) -> f64 {
    f64::from(breakdown(board, perspective).total())
}

/// Evaluates every term separately.
pub fn breakdown(board: &Board, perspective: Player) -> EvalBreakdown {
    let mut eval = EvalBreakdown::default();

    for square in Square::dark() {
        let Some(piece) = board.piece_at(square) else {
            continue;
        };
        let sign = if piece.owner == perspective { 1 } else { -1 };

        eval.material += sign * i32::from(piece.rank.value()) * POSITION_SCALE;
        eval.advancement += sign * advancement(piece, square);
        if in_center(square) {
            eval.center += sign * CENTER_BONUS;
        }

        let threat = match piece.rank {
            Rank::Man => MAN_THREAT,
            Rank::King => KING_THREAT,
        };
        eval.threats -= sign * threat * threat_count(board, square) as i32;
    }

    eval.mobility =
        count_moves(board, perspective) as i32 - count_moves(board, perspective.opponent()) as i32;

    eval
}

/// Progress bonus for a man: rows travelled from its own side.
fn advancement(piece: Piece, square: Square) -> i32 {
    if piece.is_king() {
        return 0;
    }
    let travelled = square.row().abs_diff(piece.owner.home_row());
    ADVANCEMENT_WEIGHT * i32::from(travelled)
}

fn in_center(square: Square) -> bool {
    (2..=5).contains(&square.row()) && (2..=5).contains(&square.col())
}

/// Anything the search can score from one side's point of view.
pub trait Evaluatable {
    fn evaluate(&self, perspective: Player) -> f64;
}

impl Evaluatable for Board {
    fn evaluate(&self, perspective: Player) -> f64 {
        evaluate(self, perspective)
    }
}
