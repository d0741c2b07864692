mod interactive;

use anyhow::{Context, Result};
use checkers_agents::{agent_for, breakdown, search, Agent};
use checkers_core::{
    perft, perft_divide, AiConfig, Board, Difficulty, Player, Position, Session,
};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 8x8 checkers with mandatory captures and flying kings.
#[derive(Parser, Debug)]
#[command(name = "checkers", version, about, long_about = None)]
struct Cli {
    /// Log filter such as `debug` or `checkers_agents=trace`. Overrides RUST_LOG.
    #[arg(global = true, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play against the computer in the terminal
    Play {
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Side played by the computer
        #[arg(long, value_enum, default_value_t = Side::Black)]
        ai: Side,

        /// Seed for the computer's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Let the computer play against itself and report the results
    Selfplay {
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        #[arg(long, default_value_t = 10)]
        games: u32,

        /// Games still running after this many moves count as unfinished
        #[arg(long, default_value_t = 300)]
        max_plies: u32,

        #[arg(long)]
        seed: Option<u64>,
    },

    /// Count move-tree leaves to the given depth
    Perft {
        #[arg(long, default_value_t = 5)]
        depth: u8,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Show the evaluation terms of a position
    Eval {
        #[command(flatten)]
        position: PositionArgs,
    },

    /// Search a position for the side to move
    Search {
        #[arg(long, default_value_t = 6)]
        depth: u8,

        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Print a position and its legal moves
    Show {
        #[command(flatten)]
        position: PositionArgs,
    },
}

#[derive(clap::Args, Debug)]
struct PositionArgs {
    /// Board diagram file; the standard opening when omitted
    #[arg(long)]
    diagram: Option<PathBuf>,

    #[arg(long, default_value = "white")]
    to_move: Player,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Side {
    Black,
    White,
    None,
}

impl Side {
    fn player(self) -> Option<Player> {
        match self {
            Side::Black => Some(Player::Black),
            Side::White => Some(Player::White),
            Side::None => None,
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_position(args: &PositionArgs) -> Result<Position> {
    let board = match &args.diagram {
        Some(path) => read_diagram(path)?,
        None => Board::starting_position(),
    };
    Ok(Position::new(board, args.to_move))
}

fn read_diagram(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading diagram {}", path.display()))?;
    Board::from_diagram(&text).with_context(|| format!("parsing diagram {}", path.display()))
}

fn run_perft(position: &Position, depth: u8) {
    println!("Running perft({depth})...");
    print!("{}", position.board);

    if depth <= 3 {
        // Show move breakdown for shallow depths
        let results = perft_divide(position, depth);
        let mut total = 0;
        for (mv, count) in &results {
            println!("{mv}: {count}");
            total += count;
        }
        println!("\nTotal: {total}");
    } else {
        let start = Instant::now();
        let nodes = perft(position, depth);
        let elapsed = start.elapsed();

        println!("Nodes: {nodes}");
        println!("Time: {:.2}s", elapsed.as_secs_f64());
        println!("NPS: {:.0}", nodes as f64 / elapsed.as_secs_f64());
    }
}

fn run_eval(position: &Position) {
    print!("{}", position.board);
    for player in [Player::White, Player::Black] {
        println!("\nFrom {player}'s side:");
        println!("{}", breakdown(&position.board, player));
    }
}

fn run_search(position: &Position, depth: u8, seed: Option<u64>) {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    print!("{}", position.board);
    println!("{} to move, searching {depth} plies past each move...", position.to_move);

    let start = Instant::now();
    let result = search(position, position.to_move, depth, &mut rng);
    let elapsed = start.elapsed();

    match result.best_move {
        Some(best_move) => {
            println!("\nBest move: {best_move}");
            println!("Score: {:.2}", result.score);
            println!("Equal moves: {} of {}", result.tied, result.candidates);
            println!("Nodes: {}", result.nodes);
            println!("Time: {:.2}s", elapsed.as_secs_f64());
            println!("NPS: {:.0}", result.nodes as f64 / elapsed.as_secs_f64());
        }
        None => println!("No legal moves available"),
    }
}

fn run_show(position: &Position) {
    print!("{}", position.board);
    println!("{} to move", position.to_move);

    let moves = position.legal_moves();
    if moves.is_empty() {
        println!("No legal moves: {} wins", position.to_move.opponent());
        return;
    }
    if moves[0].is_capture() {
        println!("Capture is mandatory");
    }
    let listed: Vec<String> = moves.iter().map(ToString::to_string).collect();
    println!("Legal moves ({}): {}", moves.len(), listed.join(" "));
}

/// Plays one game between two agents. None if it hit the move limit or an
/// agent's move was rejected.
fn self_play_game(
    black: &mut dyn Agent,
    white: &mut dyn Agent,
    max_plies: u32,
) -> Option<Player> {
    let mut session = Session::with_config(AiConfig::human_only());

    while session.move_count() < max_plies {
        if let Some(winner) = session.winner() {
            return Some(winner);
        }
        let agent: &mut dyn Agent = match session.current_player() {
            Player::Black => &mut *black,
            Player::White => &mut *white,
        };
        let mv = agent.best_move(&session.position())?;
        if let Err(reason) = session.commit_squares(mv.from, mv.to) {
            warn!(agent = agent.name(), mv = %mv, %reason, "agent move rejected");
            return None;
        }
    }

    session.winner()
}

fn run_selfplay(difficulty: Difficulty, games: u32, max_plies: u32, seed: Option<u64>) {
    let mut black_wins = 0;
    let mut white_wins = 0;
    let mut unfinished = 0;

    for game in 0..games {
        let game_seed = seed.map(|s| s.wrapping_add(u64::from(game) * 2));
        let mut black = agent_for(difficulty, game_seed);
        let mut white = agent_for(difficulty, game_seed.map(|s| s.wrapping_add(1)));

        let start = Instant::now();
        let result = self_play_game(black.as_mut(), white.as_mut(), max_plies);
        info!(game, ?result, elapsed_ms = start.elapsed().as_millis() as u64, "game finished");

        match result {
            Some(Player::Black) => black_wins += 1,
            Some(Player::White) => white_wins += 1,
            None => unfinished += 1,
        }
        println!(
            "Game {}: {}",
            game + 1,
            result.map_or("unfinished".to_string(), |p| format!("{p} wins"))
        );
    }

    println!("\nDifficulty: {difficulty}");
    println!("White wins: {white_wins}");
    println!("Black wins: {black_wins}");
    println!("Unfinished: {unfinished}");
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The raw-mode board owns the terminal, so `play` logs only when asked to
    let interactive = matches!(cli.command, Command::Play { .. });
    if !interactive || cli.log_level.is_some() {
        init_tracing(cli.log_level.as_deref());
    }

    match cli.command {
        Command::Play {
            difficulty,
            ai,
            seed,
        } => {
            let mut game = interactive::InteractiveGame::new(difficulty, ai.player(), seed);
            game.run().context("terminal error")?;
        }
        Command::Selfplay {
            difficulty,
            games,
            max_plies,
            seed,
        } => run_selfplay(difficulty, games, max_plies, seed),
        Command::Perft { depth, position } => run_perft(&load_position(&position)?, depth),
        Command::Eval { position } => run_eval(&load_position(&position)?),
        Command::Search {
            depth,
            seed,
            position,
        } => run_search(&load_position(&position)?, depth, seed),
        Command::Show { position } => run_show(&load_position(&position)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkers_agents::RandomAgent;
    use checkers_core::{Move, Square};

    /// Always offers the same sideways step.
    struct SidewaysAgent;

    impl Agent for SidewaysAgent {
        fn best_move(&mut self, _position: &Position) -> Option<Move> {
            Some(Move::new(Square::new(5, 0)?, Square::new(5, 2)?))
        }

        fn name(&self) -> &str {
            "Sideways"
        }
    }

    #[test]
    fn test_rejected_move_ends_the_game_unfinished() {
        let mut black = RandomAgent::with_seed(3);
        assert_eq!(self_play_game(&mut black, &mut SidewaysAgent, 300), None);
    }
}
