use crate::evaluation::Evaluatable;
use checkers_core::{Move, Player, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

/// Score of a position whose side to move has no legal move. Larger than
/// any heuristic score reachable on an 8x8 board.
pub const WIN_SCORE: f64 = 1.0e6;

#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: f64,
    pub depth: u8,
    pub nodes: u64,
    /// Number of root moves that were scored
    pub candidates: usize,
    /// Number of root moves sharing the best score
    pub tied: usize,
}

/// A root move together with its minimax value.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: f64,
    pub nodes: u64,
}

/// Searches `position` on behalf of `ai`, who must be the side to move.
///
/// Every root move is played out and scored with alpha-beta to `depth`
/// further plies. Among the moves sharing the best score one is picked
/// with `rng`.
pub fn search<R: Rng + ?Sized>(
    position: &Position,
    ai: Player,
    depth: u8,
    rng: &mut R,
) -> SearchResult {
    let scored = root_scores(position, ai, depth);
    let nodes = scored.iter().map(|s| s.nodes).sum();
    let candidates = scored.len();

    let Some((best_move, score, tied)) = select_move(&scored, rng) else {
        return SearchResult {
            best_move: None,
            score: terminal_score(position.to_move, ai),
            depth,
            nodes,
            candidates,
            tied: 0,
        };
    };

    debug!(
        depth,
        candidates,
        nodes,
        score,
        tied,
        mv = %best_move,
        "search finished"
    );

    SearchResult {
        best_move: Some(best_move),
        score,
        depth,
        nodes,
        candidates,
        tied,
    }
}

/// Scores every legal root move with a full window so that the values are
/// exact. Root moves are independent, so they are scored in parallel;
/// the result keeps move generation order.
pub fn root_scores(position: &Position, ai: Player, depth: u8) -> Vec<ScoredMove> {
    position
        .legal_moves()
        .into_par_iter()
        .map(|mv| {
            let mut nodes = 0;
            let child = position.play(&mv);
            let score = alpha_beta(
                &child,
                ai,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                &mut nodes,
            );
            ScoredMove { mv, score, nodes }
        })
        .collect()
}

/// Picks uniformly among the best-scoring moves. Non-finite scores are
/// ignored; if none is finite, any move is picked at random.
/// Returns the move, its score and the size of the tie.
pub fn select_move<R: Rng + ?Sized>(
    scored: &[ScoredMove],
    rng: &mut R,
) -> Option<(Move, f64, usize)> {
    let best = scored
        .iter()
        .map(|s| s.score)
        .filter(|score| score.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if !best.is_finite() {
        let fallback = scored.choose(rng)?;
        return Some((fallback.mv.clone(), fallback.score, scored.len()));
    }

    let tied: Vec<&ScoredMove> = scored.iter().filter(|s| s.score == best).collect();
    let chosen = tied.choose(rng)?;
    Some((chosen.mv.clone(), best, tied.len()))
}

/// Minimax with alpha-beta pruning, scored from `ai`'s point of view.
/// The AI's plies maximize, the opponent's minimize. A capture chain keeps
/// the same side (and so the same kind of layer) for its next ply.
pub fn alpha_beta(
    position: &Position,
    ai: Player,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    nodes: &mut u64,
) -> f64 {
    *nodes += 1;

    if depth == 0 {
        return position.board.evaluate(ai);
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return terminal_score(position.to_move, ai);
    }

    if position.to_move == ai {
        let mut best = f64::NEG_INFINITY;
        for mv in &moves {
            let score = alpha_beta(&position.play(mv), ai, depth - 1, alpha, beta, nodes);
            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = f64::INFINITY;
        for mv in &moves {
            let score = alpha_beta(&position.play(mv), ai, depth - 1, alpha, beta, nodes);
            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Plain minimax without pruning. Same value as [`alpha_beta`] with an
/// infinite window; only used to check it.
pub fn minimax_exhaustive(position: &Position, ai: Player, depth: u8, nodes: &mut u64) -> f64 {
    *nodes += 1;

    if depth == 0 {
        return position.board.evaluate(ai);
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return terminal_score(position.to_move, ai);
    }

    let scores = moves
        .iter()
        .map(|mv| minimax_exhaustive(&position.play(mv), ai, depth - 1, nodes));
    if position.to_move == ai {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

/// The side to move has no legal move and has lost.
fn terminal_score(to_move: Player, ai: Player) -> f64 {
    if to_move == ai {
        -WIN_SCORE
    } else {
        WIN_SCORE
    }
}
