pub mod evaluation;
pub mod minimax;
pub mod random;
pub mod search;

use checkers_core::{ContinuationStatus, Difficulty, Move, Player, Position, Session};
use tracing::{info, warn};

/// Core trait for checkers agents
pub trait Agent {
    /// Get the move to play in the given position; None if there is none
    fn best_move(&mut self, position: &Position) -> Option<Move>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

pub use evaluation::*;
pub use minimax::MinimaxAgent;
pub use random::RandomAgent;
pub use search::*;

/// Builds the agent for a difficulty level. With a seed, its choices
/// (including tie-breaks) are reproducible.
pub fn agent_for(difficulty: Difficulty, seed: Option<u64>) -> Box<dyn Agent + Send> {
    match (difficulty.search_depth(), seed) {
        (None, Some(seed)) => Box::new(RandomAgent::with_seed(seed)),
        (None, None) => Box::new(RandomAgent::new()),
        (Some(depth), Some(seed)) => Box::new(MinimaxAgent::with_seed(depth, seed)),
        (Some(depth), None) => Box::new(MinimaxAgent::new(depth)),
    }
}

/// A move played by the AI and what it left the session in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AiMove {
    pub mv: Move,
    pub status: ContinuationStatus,
}

/// Lets `agent` play one move if the session's AI is to move.
///
/// Does nothing (returns None) when no AI is configured, when it is the
/// human's turn or when the game is over. The move goes through the same
/// commit path as a human move.
pub fn request_ai_move(session: &mut Session, agent: &mut dyn Agent) -> Option<AiMove> {
    if !session.is_ai_turn() || session.is_game_over() {
        return None;
    }

    let mv = agent.best_move(&session.position())?;
    match session.commit_squares(mv.from, mv.to) {
        Ok(status) => {
            info!(agent = agent.name(), mv = %mv, "AI moved");
            Some(AiMove { mv, status })
        }
        Err(reason) => {
            warn!(agent = agent.name(), mv = %mv, %reason, "AI proposed a rejected move");
            None
        }
    }
}

/// Plays the AI's whole turn, following a capture chain to its end.
pub fn play_ai_turn(session: &mut Session, agent: &mut dyn Agent) -> Vec<AiMove> {
    let mut moves = Vec::new();
    while let Some(played) = request_ai_move(session, agent) {
        let keep_going = played.status.must_continue();
        moves.push(played);
        if !keep_going {
            break;
        }
    }
    moves
}

/// The configured AI side of a session together with its agent.
pub struct AiPlayer {
    player: Player,
    agent: Box<dyn Agent + Send>,
}

impl AiPlayer {
    /// None if the session has no AI side.
    pub fn for_session(session: &Session, seed: Option<u64>) -> Option<Self> {
        let player = session.ai_player()?;
        Some(Self {
            player,
            agent: agent_for(session.difficulty(), seed),
        })
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn name(&self) -> &str {
        self.agent.name()
    }

    /// Same as [`play_ai_turn`] with this player's agent.
    pub fn take_turn(&mut self, session: &mut Session) -> Vec<AiMove> {
        play_ai_turn(session, self.agent.as_mut())
    }
}
