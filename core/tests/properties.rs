use checkers_core::rules::has_mandatory_captures;
use checkers_core::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Plays random legal moves from the opening and returns every position
/// visited, the opening included.
fn random_walk(seed: u64, plies: usize) -> Vec<Position> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut position = Position::starting_position();
    let mut visited = vec![position];

    for _ in 0..plies {
        let moves = position.legal_moves();
        let Some(mv) = moves.choose(&mut rng) else {
            break;
        };
        position = position.play(mv);
        visited.push(position);
    }

    visited
}

proptest! {
    /// When any capture exists, only captures are offered.
    #[test]
    fn captures_are_mandatory(seed in any::<u64>(), plies in 0usize..120) {
        for position in random_walk(seed, plies) {
            let moves = position.legal_moves();
            let must_capture = position.forced.is_some()
                || has_mandatory_captures(&position.board, position.to_move);
            prop_assert!(moves.iter().all(|mv| mv.is_capture() == must_capture));
        }
    }

    /// Simulating moves never changes the board they were simulated from.
    #[test]
    fn simulation_leaves_original_untouched(seed in any::<u64>(), plies in 0usize..120) {
        for position in random_walk(seed, plies) {
            let snapshot = position.board.to_diagram();
            for mv in position.legal_moves() {
                let _ = position.play(&mv);
                let _ = position.board.apply(&mv);
            }
            prop_assert_eq!(position.board.to_diagram(), snapshot);
        }
    }

    /// A man is crowned exactly when it lands on its last row; a king stays a king.
    #[test]
    fn promotion_happens_once(seed in any::<u64>(), plies in 0usize..150) {
        for position in random_walk(seed, plies) {
            for mv in position.legal_moves() {
                let Some(mover) = position.board.piece_at(mv.from) else {
                    prop_assert!(false, "move {} has no piece", mv);
                    continue;
                };
                let landed = position.play(&mv).board.piece_at(mv.to);
                let crowned = mv.to.row() == mover.owner.promotion_row();
                let expected = if mover.is_king() || crowned {
                    Piece::king(mover.owner)
                } else {
                    Piece::man(mover.owner)
                };
                prop_assert_eq!(landed, Some(expected));
            }
        }
    }

    /// Every capture chain ends, after at most one step per opposing piece.
    #[test]
    fn capture_chains_terminate(seed in any::<u64>(), plies in 0usize..150) {
        let mut rng = StdRng::seed_from_u64(seed ^ 0x5eed);
        for start in random_walk(seed, plies) {
            let Some(first) = start.legal_moves().into_iter().find(Move::is_capture) else {
                continue;
            };
            let limit = start.board.count(start.to_move.opponent());
            let mut position = start.play(&first);
            let mut steps = 1;
            while position.forced.is_some() {
                prop_assert!(steps < limit, "chain longer than the opposing army");
                let moves = position.legal_moves();
                prop_assert!(!moves.is_empty());
                let Some(next) = moves.choose(&mut rng) else {
                    break;
                };
                position = position.play(next);
                steps += 1;
            }
            prop_assert_eq!(position.to_move, start.to_move.opponent());
        }
    }

    /// Pieces stay on dark squares and no side ever gains material.
    #[test]
    fn boards_stay_consistent(seed in any::<u64>(), plies in 0usize..150) {
        let walk = random_walk(seed, plies);
        for pair in walk.windows(2) {
            prop_assert!(pair[1].board.is_consistent());
            for player in [Player::Black, Player::White] {
                prop_assert!(pair[1].board.count(player) <= pair[0].board.count(player));
            }
        }
    }

    /// The session and the plain position agree on every committed move.
    #[test]
    fn session_matches_position(seed in any::<u64>(), plies in 0usize..100) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = Session::default();
        let mut position = Position::starting_position();

        for _ in 0..plies {
            let moves = session.legal_moves();
            prop_assert_eq!(&moves, &position.legal_moves());
            let Some(mv) = moves.choose(&mut rng) else {
                // No move on your turn means you lost
                prop_assert_eq!(session.winner(), Some(session.current_player().opponent()));
                break;
            };

            let status = session.commit_squares(mv.from, mv.to);
            position = position.play(mv);
            prop_assert!(status.is_ok());
            prop_assert_eq!(session.position(), position);
            prop_assert_eq!(
                status.ok().map(ContinuationStatus::must_continue),
                Some(position.forced.is_some())
            );
        }
    }
}
