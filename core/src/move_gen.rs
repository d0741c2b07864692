use crate::board::Board;
use crate::rules::{captures_from, simple_moves_from};
use crate::types::{Move, Player, Square};

/// Generates all legal moves for `player`.
///
/// With a forced origin only the captures of that piece are returned (chain
/// continuation). Otherwise captures from every piece take precedence; simple
/// moves are returned only if no piece of `player` can capture.
/// Order is not significant.
pub fn legal_moves(board: &Board, player: Player, forced_origin: Option<Square>) -> Vec<Move> {
    if let Some(origin) = forced_origin {
        debug_assert!(
            board.is_owned_by(origin, player),
            "forced origin {} does not hold a piece of {}",
            origin,
            player
        );
        let moves = captures_from(board, origin);
        debug_assert!(
            !moves.is_empty(),
            "forced continuation from {} has no capture",
            origin
        );
        return moves;
    }

    let captures = capture_moves(board, player);
    if !captures.is_empty() {
        return captures;
    }

    simple_moves(board, player)
}

/// Legal moves of the piece on `square`, under the same precedence rules
/// as [`legal_moves`].
pub fn legal_moves_from(
    board: &Board,
    player: Player,
    forced_origin: Option<Square>,
    square: Square,
) -> Vec<Move> {
    if !board.is_owned_by(square, player) {
        return Vec::new();
    }
    match forced_origin {
        Some(origin) if origin != square => Vec::new(),
        Some(_) => captures_from(board, square),
        None => {
            let captures = captures_from(board, square);
            if !captures.is_empty() {
                captures
            } else if capture_moves(board, player).is_empty() {
                simple_moves_from(board, square)
            } else {
                Vec::new()
            }
        }
    }
}

/// Captures from every piece of `player`.
pub fn capture_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .pieces(player)
        .flat_map(|(sq, _)| captures_from(board, sq))
        .collect()
}

/// Non-capturing moves from every piece of `player`, ignoring the
/// mandatory-capture rule.
pub fn simple_moves(board: &Board, player: Player) -> Vec<Move> {
    board
        .pieces(player)
        .flat_map(|(sq, _)| simple_moves_from(board, sq))
        .collect()
}

/// Returns true as soon as any piece of `player` has a move.
pub fn has_any_legal_move(board: &Board, player: Player) -> bool {
    board.pieces(player).any(|(sq, _)| {
        !captures_from(board, sq).is_empty() || !simple_moves_from(board, sq).is_empty()
    })
}

/// Captures plus simple moves of every piece, counted individually and
/// without the mandatory-capture filter.
pub fn count_moves(board: &Board, player: Player) -> usize {
    board
        .pieces(player)
        .map(|(sq, _)| captures_from(board, sq).len() + simple_moves_from(board, sq).len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::is_legal_capture;
    use crate::types::Piece;

    fn sq(row: u8, col: u8) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_starting_position_moves() {
        let board = Board::starting_position();

        let white = legal_moves(&board, Player::White, None);
        assert_eq!(white.len(), 7);
        assert!(white.iter().all(|mv| mv.from.row() == 5 && mv.to.row() == 4));
        assert!(white.iter().all(|mv| !mv.is_capture()));

        let black = legal_moves(&board, Player::Black, None);
        assert_eq!(black.len(), 7);
        assert!(black.iter().all(|mv| mv.from.row() == 2 && mv.to.row() == 3));
    }

    #[test]
    fn test_forced_capture_excludes_simple_moves() {
        let mut board = Board::empty();
        board.set_piece(sq(3, 2), Some(Piece::man(Player::Black)));
        board.set_piece(sq(4, 3), Some(Piece::man(Player::White)));
        board.set_piece(sq(0, 1), Some(Piece::man(Player::Black)));

        let moves = legal_moves(&board, Player::Black, None);
        assert_eq!(moves, vec![Move::capture(sq(3, 2), sq(5, 4), vec![sq(4, 3)])]);

        // The non-capturing man has nothing to do this turn
        assert!(legal_moves_from(&board, Player::Black, None, sq(0, 1)).is_empty());
        assert_eq!(legal_moves_from(&board, Player::Black, None, sq(3, 2)).len(), 1);
    }

    #[test]
    fn test_forced_origin_restricts_to_that_piece() {
        let mut board = Board::empty();
        board.set_piece(sq(3, 2), Some(Piece::man(Player::Black)));
        board.set_piece(sq(4, 3), Some(Piece::man(Player::White)));
        board.set_piece(sq(3, 6), Some(Piece::man(Player::Black)));
        board.set_piece(sq(4, 5), Some(Piece::man(Player::White)));
        board.set_piece(sq(2, 5), Some(Piece::man(Player::White)));

        let all = legal_moves(&board, Player::Black, None);
        assert_eq!(all.len(), 3);

        let forced = legal_moves(&board, Player::Black, Some(sq(3, 6)));
        assert!(forced.iter().all(|mv| mv.from == sq(3, 6) && mv.is_capture()));
        assert_eq!(forced.len(), 2);
        assert!(legal_moves_from(&board, Player::Black, Some(sq(3, 6)), sq(3, 2)).is_empty());
    }

    #[test]
    fn test_king_moves_and_captures() {
        let mut board = Board::empty();
        board.set_piece(sq(7, 0), Some(Piece::king(Player::White)));

        let moves = legal_moves(&board, Player::White, None);
        assert_eq!(moves.len(), 7);

        board.set_piece(sq(4, 3), Some(Piece::man(Player::Black)));
        let moves = legal_moves(&board, Player::White, None);
        assert_eq!(moves.len(), 4);
        for mv in &moves {
            assert!(is_legal_capture(&board, Player::White, mv.from, mv.to));
            assert_eq!(mv.captured, vec![sq(4, 3)]);
        }
    }

    #[test]
    fn test_count_moves_is_unfiltered() {
        let mut board = Board::empty();
        board.set_piece(sq(3, 2), Some(Piece::man(Player::Black)));
        board.set_piece(sq(4, 3), Some(Piece::man(Player::White)));

        // Black: one capture plus one simple move (4,1)
        assert_eq!(count_moves(&board, Player::Black), 2);
        assert_eq!(legal_moves(&board, Player::Black, None).len(), 1);
    }

    #[test]
    fn test_has_any_legal_move() {
        let mut board = Board::empty();
        board.set_piece(sq(7, 0), Some(Piece::man(Player::Black)));
        assert!(!has_any_legal_move(&board, Player::Black));
        assert!(!has_any_legal_move(&board, Player::White));

        board.set_piece(sq(6, 3), Some(Piece::man(Player::Black)));
        assert!(has_any_legal_move(&board, Player::Black));
    }
}
