//! # Stone Arena
//!
//! A board-game engine for Gomoku, Go, and Reversi behind one uniform
//! contract: the [`game::Game`] trait and the [`game_wrapper::GameWrapper`]
//! enum. Every accepted move is recorded with the board diff it produced,
//! so any position can be reconstructed for replay and any move can be
//! undone without variant-specific rollback code.
//!
//! The engine layer is silent and single-threaded; sessions bind games to
//! agents (random, per-variant heuristics, MCTS), and the binaries drive
//! everything from the command line.
//!
//! ```
//! use arena::config::EngineConfig;
//! use arena::game::{Game, GameType};
//! use arena::game_wrapper::GameWrapper;
//!
//! let config = EngineConfig::default();
//! let mut game = GameWrapper::new(GameType::Reversi, &config);
//! assert!(game.make_move(2, 3));
//! assert_eq!(game.move_count(), 1);
//! ```

pub mod agents;
pub mod board;
pub mod config;
pub mod events;
pub mod game;
pub mod game_wrapper;
pub mod games;
pub mod moves;
pub mod player;
pub mod recorder;
pub mod replay;
pub mod session;
pub mod worker;

pub use board::{Board, Color, Point};
pub use config::EngineConfig;
pub use game::{AgentKind, Game, GameStatus, GameType};
pub use game_wrapper::GameWrapper;
pub use session::{GameSession, MoveError, MoveResult};
