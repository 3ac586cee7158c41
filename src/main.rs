//! # Play - Interactive Game Runner
//!
//! Plays one game of Gomoku, Go, or Reversi in the terminal. Either color
//! can be a human (moves typed as `row,col`) or an agent; agent searches
//! run on a worker thread so a slow search never wedges the input loop.
//! After the game ends (or on the `replay` command) the recorded log can be
//! stepped through move by move.

use arena::agents::SearchStatistics;
use arena::config::EngineConfig;
use arena::game::{AgentKind, Game, GameType};
use arena::player::Player;
use arena::replay::board_at;
use arena::session::{GameSession, MoveResult};
use arena::worker::AgentWorker;
use arena::{Color, GameWrapper, Point};
use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::Duration;

#[derive(Parser)]
#[clap(author, version, about = "Play Gomoku, Go, or Reversi in the terminal", long_about = None)]
struct Args {
    /// Game variant: gomoku, go, or reversi
    #[clap(short, long, default_value = "gomoku")]
    game: GameType,

    /// Black's controller: human, random, heuristic, advanced, or mcts
    #[clap(short, long, default_value = "human")]
    black: AgentKind,

    /// White's controller: human, random, heuristic, advanced, or mcts
    #[clap(short, long, default_value = "mcts")]
    white: AgentKind,

    /// Board edge length (Gomoku 8-19, Go 9-19; Reversi is fixed at 8)
    #[clap(long)]
    board_size: Option<usize>,

    /// Compensation points for White in Go
    #[clap(long, default_value_t = 6.5)]
    komi: f64,

    /// MCTS iteration budget per move
    #[clap(short, long, default_value_t = 1000)]
    iterations: u32,

    /// MCTS wall-clock budget per move, in milliseconds
    #[clap(long, default_value_t = 2000)]
    time_limit_ms: u64,

    /// RNG seed for reproducible agent play
    #[clap(long)]
    seed: Option<u64>,

    /// Pause between agent moves, in milliseconds
    #[clap(long, default_value_t = 0)]
    delay_ms: u64,
}

impl Args {
    fn to_config(&self) -> EngineConfig {
        let mut config = EngineConfig::default();
        config.go.komi = self.komi;
        config.mcts.iterations = self.iterations;
        config.mcts.time_limit = Duration::from_millis(self.time_limit_ms);
        if let Some(size) = self.board_size {
            match self.game {
                GameType::Go => config.go.board_size = size,
                GameType::Gomoku => config.gomoku.board_size = size,
                GameType::Reversi => {}
            }
        }
        config
    }
}

fn side_name(kind: AgentKind, color: Color) -> String {
    match kind {
        AgentKind::None => format!("{} (human)", color),
        kind => format!("{} ({})", color, kind),
    }
}

fn print_state(game: &GameWrapper) {
    println!("\n{}", game.board());
    println!("{}", game.status_text().bold());
}

fn print_stats(stats: &SearchStatistics) {
    println!(
        "{}",
        format!(
            "  search: {} iterations in {:?}, best child {} visits, {:.1}% win rate",
            stats.iterations,
            stats.elapsed,
            stats.best_visits,
            stats.best_win_rate * 100.0
        )
        .dimmed()
    );
}

fn read_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

fn print_help() {
    println!("commands:");
    println!("  r,c     place a stone at row r, column c");
    println!("  pass    give up the turn (Go and Reversi)");
    println!("  resign  concede the game");
    println!("  undo    roll back the last move");
    println!("  replay  step through the game so far");
    println!("  quit    leave the game");
}

/// Interactive walkthrough of the recorded log.
fn run_replay(game: &mut GameWrapper) {
    let total = game.recorder().total_moves();
    game.set_replay_mode(true);
    println!(
        "{}",
        format!("replay: {} recorded moves (n/p/g <step>/q)", total).cyan()
    );
    loop {
        print_state(game);
        let step = game.replay_step();
        if let Some(mv) = step.checked_sub(1).and_then(|i| game.recorder().get_move(i)) {
            println!("last: {}", mv);
        }
        let line = match read_line("replay> ") {
            Some(line) => line,
            None => break,
        };
        match line.as_str() {
            "n" | "" => game.set_replay_step(step + 1),
            "p" => game.set_replay_step(step.saturating_sub(1)),
            "q" => break,
            other => {
                if let Some(rest) = other.strip_prefix('g') {
                    if let Ok(target) = rest.trim().parse::<usize>() {
                        game.set_replay_step(target);
                        continue;
                    }
                }
                println!("{}", "n = next, p = previous, g <step>, q = quit".yellow());
            }
        }
    }
    game.set_replay_mode(false);
}

/// One human turn. Returns false when the player quits.
fn human_turn(session: &mut GameSession) -> bool {
    loop {
        let line = match read_line("move> ") {
            Some(line) => line,
            None => return false,
        };
        match line.as_str() {
            "" => continue,
            "help" | "?" => print_help(),
            "quit" | "q" => return false,
            "pass" => {
                let mover = session.game().current_color();
                if session.game_mut().pass() {
                    println!("{} passes", mover);
                    return true;
                }
                println!("{}", "passing is not allowed in this game".red());
            }
            "resign" => {
                let mover = session.game().current_color();
                session.game_mut().resign(mover);
                return true;
            }
            "undo" => {
                // Roll back to the previous human turn: the opponent's
                // reply and our own move.
                if !session.game_mut().undo() {
                    println!("{}", "nothing to undo".red());
                    continue;
                }
                session.game_mut().undo();
                return true;
            }
            "replay" => {
                run_replay(session.game_mut());
                print_state(session.game());
            }
            coord => match coord.parse::<Point>() {
                Ok(p) => match session.try_move(p.row, p.col) {
                    MoveResult::Applied { .. } => return true,
                    MoveResult::Rejected(reason) => {
                        println!("{}", reason.to_string().red());
                    }
                },
                Err(err) => println!("{}", err.red()),
            },
        }
    }
}

fn agent_turn(
    session: &mut GameSession,
    worker: &AgentWorker,
    request_id: &mut u64,
    delay: Duration,
) {
    let mover = session.game().current_color();
    *request_id += 1;
    worker.request(*request_id, session.game().copy());
    let reply = worker.wait_for_reply(*request_id, Duration::from_millis(25));

    match reply.choice {
        Some(p) => {
            session.game_mut().make_move(p.row, p.col);
            println!("{} plays {}", mover, p.to_string().green());
        }
        None => {
            if session.game_mut().pass() {
                println!("{} passes", mover);
            } else {
                session.game_mut().resign(mover);
                println!("{} resigns", mover);
            }
        }
    }
    if let Some(stats) = reply.statistics {
        print_stats(&stats);
    }
    if !delay.is_zero() {
        std::thread::sleep(delay);
    }
}

fn main() {
    let args = Args::parse();
    let config = args.to_config();
    if let Err(err) = config.validate() {
        eprintln!("{}", format!("invalid configuration: {}", err).red());
        std::process::exit(1);
    }

    let mut session = match GameSession::new(args.game, &config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{}", format!("invalid configuration: {}", err).red());
            std::process::exit(1);
        }
    };
    session.game_mut().set_players(
        Player::new(side_name(args.black, Color::Black), Color::Black),
        Player::new(side_name(args.white, Color::White), Color::White),
    );
    session.game_mut().subscribe(Box::new(|event| {
        if let arena::events::GameEvent::GameEnded { winner } = event {
            match winner {
                Some(color) => println!("\n{}", format!("{} wins!", color).bold().green()),
                None => println!("\n{}", "Draw.".bold()),
            }
        }
    }));
    session.game_mut().announce_start();

    println!(
        "{}",
        format!(
            "{} | {} vs {}",
            args.game,
            side_name(args.black, Color::Black),
            side_name(args.white, Color::White)
        )
        .cyan()
        .bold()
    );
    println!("type 'help' for commands");

    let black_worker =
        (args.black != AgentKind::None).then(|| AgentWorker::new(args.black, args.game, &config, args.seed));
    let white_worker = (args.white != AgentKind::None)
        .then(|| AgentWorker::new(args.white, args.game, &config, args.seed.map(|s| s ^ 1)));

    let delay = Duration::from_millis(args.delay_ms);
    let mut request_id = 0u64;

    loop {
        print_state(session.game());
        if session.game().is_over() {
            break;
        }
        let worker = match session.game().current_color() {
            Color::White => white_worker.as_ref(),
            _ => black_worker.as_ref(),
        };
        match worker {
            Some(worker) => agent_turn(&mut session, worker, &mut request_id, delay),
            None => {
                if !human_turn(&mut session) {
                    println!("bye");
                    return;
                }
            }
        }
    }

    // Post-game: offer a walkthrough of the finished game.
    if let Some(answer) = read_line("replay the game? [y/N] ") {
        if answer.eq_ignore_ascii_case("y") {
            run_replay(session.game_mut());
            // Show the final position again on the live board.
            let final_board = board_at(
                session.game().recorder(),
                session.game().recorder().total_moves(),
            );
            println!("\n{}", final_board);
        }
    }
}
