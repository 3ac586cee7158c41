//! # Benchmark - Agent Match Runner
//!
//! Plays many complete games between two configured agents and reports the
//! tallies. Games are fully independent, so they run in parallel on a rayon
//! pool sized from the CPU count; each game derives its own RNG seeds from
//! the base seed, so a run is reproducible.

use arena::config::EngineConfig;
use arena::game::{AgentKind, Game, GameStatus, GameType};
use arena::session::GameSession;
use arena::Color;
use clap::Parser;
use colored::Colorize;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Run agent-vs-agent matches and report tallies", long_about = None)]
struct Args {
    /// Game variant: gomoku, go, or reversi
    #[clap(short, long, default_value = "reversi")]
    game: GameType,

    /// Number of games to play
    #[clap(short = 'n', long, default_value_t = 100)]
    games: u32,

    /// Black's agent: random, heuristic, advanced, or mcts
    #[clap(short, long, default_value = "heuristic")]
    black: AgentKind,

    /// White's agent: random, heuristic, advanced, or mcts
    #[clap(short, long, default_value = "random")]
    white: AgentKind,

    /// Board edge length (Gomoku 8-19, Go 9-19; Reversi is fixed at 8)
    #[clap(long)]
    board_size: Option<usize>,

    /// MCTS iteration budget per move
    #[clap(short, long, default_value_t = 200)]
    iterations: u32,

    /// MCTS wall-clock budget per move, in milliseconds
    #[clap(long, default_value_t = 500)]
    time_limit_ms: u64,

    /// Base RNG seed; each game derives its own streams from it
    #[clap(long, default_value_t = 42)]
    seed: u64,

    /// Worker threads (defaults to the CPU count)
    #[clap(short = 't', long)]
    threads: Option<usize>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    black_wins: u32,
    white_wins: u32,
    draws: u32,
    total_moves: u64,
    mcts_iterations: u64,
    mcts_searches: u64,
}

impl Tally {
    fn absorb(mut self, other: Tally) -> Tally {
        self.black_wins += other.black_wins;
        self.white_wins += other.white_wins;
        self.draws += other.draws;
        self.total_moves += other.total_moves;
        self.mcts_iterations += other.mcts_iterations;
        self.mcts_searches += other.mcts_searches;
        self
    }
}

fn run_game(args: &Args, config: &EngineConfig, index: u32) -> Tally {
    let mut session = match GameSession::new(args.game, config) {
        Ok(session) => session,
        // main() validated the config already.
        Err(err) => unreachable!("config rejected mid-run: {}", err),
    };
    // Distinct seed streams per game and per color.
    let base = args
        .seed
        .wrapping_add(index as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15);
    session.set_agent(Color::Black, args.black, Some(base));
    session.set_agent(Color::White, args.white, Some(base ^ 0x5555_5555_5555_5555));

    let mut tally = Tally::default();
    while !session.game().is_over() {
        let mover = session.game().current_color();
        session.run_agent_ply();
        if let Some(stats) = session.agent_statistics(mover) {
            tally.mcts_iterations += stats.iterations as u64;
            tally.mcts_searches += 1;
        }
    }
    match session.game().status() {
        GameStatus::Win(Color::Black) => tally.black_wins += 1,
        GameStatus::Win(_) => tally.white_wins += 1,
        _ => tally.draws += 1,
    }
    tally.total_moves += session.game().move_count() as u64;
    tally
}

fn main() {
    let args = Args::parse();
    if args.black == AgentKind::None || args.white == AgentKind::None {
        eprintln!("{}", "both colors need an agent".red());
        std::process::exit(1);
    }

    let mut config = EngineConfig::default();
    config.mcts.iterations = args.iterations;
    config.mcts.time_limit = Duration::from_millis(args.time_limit_ms);
    if let Some(size) = args.board_size {
        match args.game {
            GameType::Go => config.go.board_size = size,
            GameType::Gomoku => config.gomoku.board_size = size,
            GameType::Reversi => {}
        }
    }
    if let Err(err) = config.validate() {
        eprintln!("{}", format!("invalid configuration: {}", err).red());
        std::process::exit(1);
    }

    let threads = args.threads.unwrap_or_else(num_cpus::get);
    let pool = match ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("{}", format!("could not build thread pool: {}", err).red());
            std::process::exit(1);
        }
    };

    println!(
        "{}",
        format!(
            "{}: {} games, {} (Black) vs {} (White), {} threads",
            args.game, args.games, args.black, args.white, threads
        )
        .cyan()
        .bold()
    );

    let start = Instant::now();
    let tally = pool.install(|| {
        (0..args.games)
            .into_par_iter()
            .map(|i| run_game(&args, &config, i))
            .reduce(Tally::default, Tally::absorb)
    });
    let elapsed = start.elapsed();

    let games = args.games.max(1);
    println!();
    println!(
        "  {:<12} {}",
        "Black wins:",
        format!(
            "{:>5}  ({:.1}%)",
            tally.black_wins,
            100.0 * tally.black_wins as f64 / games as f64
        )
        .green()
    );
    println!(
        "  {:<12} {}",
        "White wins:",
        format!(
            "{:>5}  ({:.1}%)",
            tally.white_wins,
            100.0 * tally.white_wins as f64 / games as f64
        )
        .green()
    );
    println!("  {:<12} {:>5}", "Draws:", tally.draws);
    println!(
        "  {:<12} {:>7.1}",
        "Avg moves:",
        tally.total_moves as f64 / games as f64
    );
    if tally.mcts_searches > 0 {
        println!(
            "  {:<12} {:>7.1}",
            "Avg search:",
            tally.mcts_iterations as f64 / tally.mcts_searches as f64
        );
    }
    println!(
        "{}",
        format!(
            "finished in {:.2?} ({:.1} games/s)",
            elapsed,
            games as f64 / elapsed.as_secs_f64().max(1e-9)
        )
        .dimmed()
    );
}
