use checkers_core::*;

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col).unwrap()
}

fn session(diagram: &str, to_move: Player) -> Session {
    let board = Board::from_diagram(diagram).unwrap();
    Session::from_board(board, to_move, AiConfig::human_only())
}

#[test]
fn opening_has_no_captures() {
    let board = Board::starting_position();
    let session = Session::from_board(board, Player::Black, AiConfig::human_only());

    assert!(!session.has_mandatory_captures());
    let moves = session.legal_moves();
    assert_eq!(moves.len(), 7);
    for mv in &moves {
        assert!(!mv.is_capture());
        assert_eq!(mv.from.row(), 2);
        assert_eq!(mv.to.row(), 3);
    }
}

#[test]
fn single_capture_is_forced() {
    let mut s = session(
        "\
-b-.-.-.
.-.-.-.-
-.-.-.-.
.-b-.-.-
-.-w-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
",
        Player::Black,
    );

    assert!(s.has_mandatory_captures());
    assert_eq!(
        s.legal_moves(),
        vec![Move::capture(sq(3, 2), sq(5, 4), vec![sq(4, 3)])]
    );
    assert!(!s.is_legal_move((3, 2), (4, 1)));
    assert_eq!(
        s.commit_move((0, 1), (1, 0)),
        Err(Rejected::NoCaptureAvailableButMandatory)
    );

    assert_eq!(s.commit_move((3, 2), (5, 4)), Ok(ContinuationStatus::TurnPassed));
    assert_eq!(s.piece_at(4, 3), None);
    assert_eq!(s.winner(), Some(Player::Black));
}

#[test]
fn multi_jump_keeps_the_turn() {
    let mut s = session(
        "\
-.-.-b-.
b-.-.-.-
-w-.-.-.
.-.-.-.-
-.-w-.-.
.-.-.-.-
-.-.-.-w
.-.-.-.-
",
        Player::Black,
    );

    let status = s.commit_move((1, 0), (3, 2)).unwrap();
    assert_eq!(status, ContinuationStatus::MustContinue(sq(3, 2)));
    assert_eq!(s.must_continue(), Some(sq(3, 2)));
    assert_eq!(s.current_player(), Player::Black);

    // Any other piece is refused while the chain is open
    assert_eq!(
        s.commit_move((0, 5), (1, 4)),
        Err(Rejected::WrongContinuationOrigin)
    );
    assert_eq!(
        s.commit_move((0, 5), (1, 6)),
        Err(Rejected::WrongContinuationOrigin)
    );
    // The chain piece itself may not step quietly either
    assert_eq!(
        s.commit_move((3, 2), (4, 1)),
        Err(Rejected::NoCaptureAvailableButMandatory)
    );

    assert_eq!(s.commit_move((3, 2), (5, 4)), Ok(ContinuationStatus::TurnPassed));
    assert_eq!(s.must_continue(), None);
    assert_eq!(s.current_player(), Player::White);
}

#[test]
fn king_cannot_jump_two_pieces() {
    let s = session(
        "\
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
-.-b-.-.
.-b-.-.-
-.-.-.-.
W-.-.-.-
",
        Player::White,
    );

    assert!(!s.has_mandatory_captures());
    for (row, col) in [(3, 4), (2, 5), (1, 6), (0, 7)] {
        assert!(!s.is_legal_move((7, 0), (row, col)));
    }
    assert!(s.is_legal_move((7, 0), (6, 1)));
}

#[test]
fn king_flies_over_a_single_piece() {
    let mut s = session(
        "\
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-b-.-.-
-.-.-.-.
W-.-.-.-
",
        Player::White,
    );

    assert!(s.has_mandatory_captures());
    assert!(!s.is_legal_move((7, 0), (6, 1)));
    for (row, col) in [(4, 3), (3, 4), (2, 5), (1, 6), (0, 7)] {
        assert!(s.is_legal_move((7, 0), (row, col)));
    }

    assert_eq!(s.commit_move((7, 0), (2, 5)), Ok(ContinuationStatus::TurnPassed));
    assert_eq!(s.piece_at(5, 2), None);
    assert_eq!(s.piece_at(2, 5), Some(Piece::king(Player::White)));
    assert_eq!(s.winner(), Some(Player::White));
}

#[test]
fn blocked_side_loses() {
    let s = session(
        "\
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-b-.-.-
-b-.-.-.
w-.-.-.-
",
        Player::White,
    );

    assert!(s.legal_moves().is_empty());
    assert_eq!(s.winner(), Some(Player::Black));
    assert_eq!(s.state(), SessionState::Terminal(Player::Black));
    assert_eq!(s.clone().commit_move((7, 0), (6, 1)), Err(Rejected::GameOver));
}

#[test]
fn out_of_range_is_never_fatal() {
    let mut s = Session::default();
    assert_eq!(s.piece_at(-1, -1), None);
    assert_eq!(s.piece_at(100, 3), None);
    assert!(!s.is_selectable(8, 0));
    assert!(!s.is_legal_move((5, 0), (4, -1)));
    assert_eq!(s.commit_move((i32::MIN, 0), (4, 1)), Err(Rejected::OutOfRange));
    assert_eq!(s.move_count(), 0);
}
