//! Move legality rules.
//!
//! Pure functions over a [`Board`]; nothing here holds state. Men step one
//! square forward and capture by jumping an adjacent opposing piece in any
//! diagonal direction. Kings slide along empty diagonals and capture along a
//! clean ray: exactly one opposing piece between origin and landing square.

use crate::board::Board;
use crate::error::Rejected;
use crate::types::{Move, Piece, Player, Rank, Square, DIAGONALS};

/// True iff the two squares share a diagonal (|d_row| == |d_col|).
pub fn is_diagonal(from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    d_row.abs() == d_col.abs()
}

/// Unit step from `from` toward `to`, assuming they share a diagonal.
fn step_toward(from: Square, to: Square) -> (i8, i8) {
    let (d_row, d_col) = from.delta(to);
    (d_row.signum(), d_col.signum())
}

/// Squares strictly between `from` and `to` on their shared diagonal.
fn between(from: Square, to: Square) -> impl Iterator<Item = Square> {
    let (d_row, d_col) = step_toward(from, to);
    let len = from.delta(to).0.unsigned_abs();
    (1..len.max(1) as i8).filter_map(move |i| from.offset(d_row * i, d_col * i))
}

/// Returns the piece at `from` if it belongs to `player`.
fn own_piece(board: &Board, player: Player, from: Square) -> Option<Piece> {
    board.piece_at(from).filter(|p| p.owner == player)
}

/// Shared shape check: a non-zero diagonal move onto an empty square.
fn is_open_diagonal(board: &Board, from: Square, to: Square) -> bool {
    from != to && is_diagonal(from, to) && board.is_empty(to)
}

/// Non-capturing move: a man steps one square forward, a king slides
/// any distance over empty squares.
pub fn is_legal_simple_move(board: &Board, player: Player, from: Square, to: Square) -> bool {
    let Some(piece) = own_piece(board, player, from) else {
        return false;
    };
    if !is_open_diagonal(board, from, to) {
        return false;
    }

    match piece.rank {
        Rank::Man => {
            let (d_row, d_col) = from.delta(to);
            d_row == player.forward() && d_col.abs() == 1
        }
        Rank::King => between(from, to).all(|sq| board.is_empty(sq)),
    }
}

/// Capturing move. A man jumps exactly two squares over an opposing piece.
/// A king needs a clean ray: empties, one opposing piece, then empties up to
/// and including the landing square. A friendly piece, or a second piece of
/// either colour, blocks the jump.
pub fn is_legal_capture(board: &Board, player: Player, from: Square, to: Square) -> bool {
    let Some(piece) = own_piece(board, player, from) else {
        return false;
    };
    if !is_open_diagonal(board, from, to) {
        return false;
    }

    match piece.rank {
        Rank::Man => {
            let (d_row, d_col) = from.delta(to);
            if d_row.abs() != 2 || d_col.abs() != 2 {
                return false;
            }
            from.offset(d_row / 2, d_col / 2)
                .is_some_and(|mid| board.is_enemy(mid, player))
        }
        Rank::King => {
            let mut found_enemy = false;
            for sq in between(from, to) {
                match board.piece_at(sq) {
                    None => {}
                    Some(_) if found_enemy => return false,
                    Some(p) if p.owner != player => found_enemy = true,
                    Some(_) => return false,
                }
            }
            found_enemy
        }
    }
}

/// Opposing squares removed by a jump from `from` to `to`. For a man this is
/// the midpoint; for a king, every opposing piece on the ray up to the first
/// friendly piece (exactly one for a validated jump).
pub fn captured_squares(board: &Board, from: Square, to: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    if from == to || !is_diagonal(from, to) {
        return Vec::new();
    }

    match piece.rank {
        Rank::Man => {
            let (d_row, d_col) = from.delta(to);
            if d_row.abs() != 2 {
                return Vec::new();
            }
            from.offset(d_row / 2, d_col / 2)
                .filter(|&mid| board.is_enemy(mid, piece.owner))
                .into_iter()
                .collect()
        }
        Rank::King => {
            let mut captured = Vec::new();
            for sq in between(from, to) {
                match board.piece_at(sq) {
                    Some(p) if p.owner != piece.owner => captured.push(sq),
                    Some(_) => break,
                    None => {}
                }
            }
            captured
        }
    }
}

/// All captures available to the piece standing on `square`.
pub fn captures_from(board: &Board, square: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    let Some(piece) = board.piece_at(square) else {
        return moves;
    };

    for &(d_row, d_col) in &DIAGONALS {
        match piece.rank {
            Rank::Man => {
                let (Some(mid), Some(landing)) = (
                    square.offset(d_row, d_col),
                    square.offset(2 * d_row, 2 * d_col),
                ) else {
                    continue;
                };
                if board.is_enemy(mid, piece.owner) && board.is_empty(landing) {
                    moves.push(Move::capture(square, landing, vec![mid]));
                }
            }
            Rank::King => {
                // Walk to the first occupied square; if it is an enemy, every
                // empty square behind it up to the next piece is a landing.
                let mut current = square.offset(d_row, d_col);
                while let Some(sq) = current {
                    if !board.is_empty(sq) {
                        break;
                    }
                    current = sq.offset(d_row, d_col);
                }
                let Some(victim) = current.filter(|&sq| board.is_enemy(sq, piece.owner)) else {
                    continue;
                };
                let mut landing = victim.offset(d_row, d_col);
                while let Some(sq) = landing {
                    if !board.is_empty(sq) {
                        break;
                    }
                    moves.push(Move::capture(square, sq, vec![victim]));
                    landing = sq.offset(d_row, d_col);
                }
            }
        }
    }

    moves
}

/// All non-capturing moves available to the piece standing on `square`.
pub fn simple_moves_from(board: &Board, square: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    let Some(piece) = board.piece_at(square) else {
        return moves;
    };

    match piece.rank {
        Rank::Man => {
            let forward = piece.owner.forward();
            for d_col in [-1, 1] {
                if let Some(to) = square.offset(forward, d_col) {
                    if board.is_empty(to) {
                        moves.push(Move::new(square, to));
                    }
                }
            }
        }
        Rank::King => {
            for &(d_row, d_col) in &DIAGONALS {
                let mut current = square.offset(d_row, d_col);
                while let Some(to) = current {
                    if !board.is_empty(to) {
                        break;
                    }
                    moves.push(Move::new(square, to));
                    current = to.offset(d_row, d_col);
                }
            }
        }
    }

    moves
}

/// True if the piece of `player` on `square` has at least one capture.
pub fn has_any_capture(board: &Board, player: Player, square: Square) -> bool {
    board.is_owned_by(square, player) && !captures_from(board, square).is_empty()
}

/// True if any piece of `player` can capture. Capture is mandatory at the
/// player level: when this holds, no simple move is legal this turn.
pub fn has_mandatory_captures(board: &Board, player: Player) -> bool {
    board
        .pieces(player)
        .any(|(sq, _)| !captures_from(board, sq).is_empty())
}

/// Number of opposing pieces that could capture the piece on `target`
/// right now.
pub fn threat_count(board: &Board, target: Square) -> usize {
    let Some(piece) = board.piece_at(target) else {
        return 0;
    };

    board
        .pieces(piece.owner.opponent())
        .filter(|&(attacker, _)| {
            captures_from(board, attacker)
                .iter()
                .any(|mv| mv.captured.contains(&target))
        })
        .count()
}

/// Validates a move request for `player`, honouring a pending forced
/// continuation and the mandatory-capture rule. Returns the fully formed
/// move, or the reason it is illegal.
pub fn validate_move(
    board: &Board,
    player: Player,
    forced: Option<Square>,
    from: Square,
    to: Square,
) -> Result<Move, Rejected> {
    if forced.is_some_and(|origin| origin != from) {
        return Err(Rejected::WrongContinuationOrigin);
    }
    let piece = board.piece_at(from).ok_or(Rejected::NoPieceToMove)?;
    if piece.owner != player {
        return Err(Rejected::NotYourTurn);
    }
    if from == to || !is_diagonal(from, to) {
        return Err(Rejected::NotDiagonal);
    }
    if !board.is_empty(to) {
        return Err(Rejected::OccupiedDestination);
    }

    if is_legal_capture(board, player, from, to) {
        return Ok(Move::capture(from, to, captured_squares(board, from, to)));
    }

    if forced.is_some() || has_mandatory_captures(board, player) {
        return Err(Rejected::NoCaptureAvailableButMandatory);
    }

    if is_legal_simple_move(board, player, from, to) {
        Ok(Move::new(from, to))
    } else {
        Err(Rejected::IllegalMove)
    }
}
