use crate::position::Position;
use crate::types::Move;

/// Perft (performance test) results at each depth.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResults {
    pub nodes: u64,
    pub captures: u64,
    pub promotions: u64,
    /// Leaf moves after which the same side must keep capturing
    pub continuations: u64,
}

impl PerftResults {
    /// Combines results from child nodes.
    pub fn add(&mut self, other: &Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.promotions += other.promotions;
        self.continuations += other.continuations;
    }
}

/// Counts the leaf nodes of the legal-move tree to the given depth.
/// Every move is one ply, including each step of a capture chain.
pub fn perft(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|mv| perft(&position.play(mv), depth - 1))
        .sum()
}

/// Node counts broken down by root move.
pub fn perft_divide(position: &Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    position
        .legal_moves()
        .into_iter()
        .map(|mv| {
            let nodes = perft(&position.play(&mv), depth - 1);
            (mv, nodes)
        })
        .collect()
}

/// Perft with leaf move classification.
pub fn perft_detailed(position: &Position, depth: u8) -> PerftResults {
    let mut results = PerftResults::default();

    if depth == 0 {
        results.nodes = 1;
        return results;
    }

    for mv in position.legal_moves() {
        let child = position.play(&mv);

        if depth == 1 {
            results.nodes += 1;
            if mv.is_capture() {
                results.captures += 1;
            }
            let was_man = position.board.piece_at(mv.from).is_some_and(|p| !p.is_king());
            let is_king = child.board.piece_at(mv.to).is_some_and(|p| p.is_king());
            if was_man && is_king {
                results.promotions += 1;
            }
            if child.forced.is_some() {
                results.continuations += 1;
            }
        } else {
            results.add(&perft_detailed(&child, depth - 1));
        }
    }

    results
}
