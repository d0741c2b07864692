use crate::{search::search, Agent};
use checkers_core::{Move, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::trace;

/// Alpha-beta search to a fixed depth, random among equally scored moves.
pub struct MinimaxAgent {
    name: String,
    depth: u8,
    rng: StdRng,
}

impl MinimaxAgent {
    pub fn new(depth: u8) -> Self {
        Self::with_rng(depth, StdRng::from_entropy())
    }

    pub fn with_seed(depth: u8, seed: u64) -> Self {
        Self::with_rng(depth, StdRng::seed_from_u64(seed))
    }

    fn with_rng(depth: u8, rng: StdRng) -> Self {
        MinimaxAgent {
            name: format!("Minimax(depth={})", depth),
            depth,
            rng,
        }
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }
}

impl Agent for MinimaxAgent {
    fn best_move(&mut self, position: &Position) -> Option<Move> {
        let result = search(position, position.to_move, self.depth, &mut self.rng);
        trace!(nodes = result.nodes, tied = result.tied, "minimax agent searched");
        result.best_move
    }

    fn name(&self) -> &str {
        &self.name
    }
}
