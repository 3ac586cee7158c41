//! # Game Wrapper Module
//!
//! A single enum over the three rule cores so the session layer, agents,
//! and front-ends can hold "some game" without generics or trait objects.
//! Every [`Game`] method dispatches to the active variant through one
//! macro-generated `match`, so adding a variant is one enum arm plus one
//! macro argument.

use crate::board::{Board, Color, Point};
use crate::config::EngineConfig;
use crate::events::Listener;
use crate::game::{Game, GameStatus, GameType};
use crate::games::go::GoState;
use crate::games::gomoku::GomokuState;
use crate::games::reversi::ReversiState;
use crate::player::Player;
use crate::recorder::GameRecorder;
use std::fmt;

/// One live game of any supported variant.
#[derive(Debug, Clone)]
pub enum GameWrapper {
    Gomoku(GomokuState),
    Go(GoState),
    Reversi(ReversiState),
}

impl GameWrapper {
    /// Starts a fresh game of `game_type` using the sizes in `config`.
    pub fn new(game_type: GameType, config: &EngineConfig) -> Self {
        match game_type {
            GameType::Gomoku => GameWrapper::Gomoku(GomokuState::new(config)),
            GameType::Go => GameWrapper::Go(GoState::new(config)),
            GameType::Reversi => GameWrapper::Reversi(ReversiState::new(config)),
        }
    }
}

macro_rules! impl_game_dispatch {
    ($($variant:ident),*) => {
        impl Game for GameWrapper {
            fn game_type(&self) -> GameType {
                match self {
                    $(GameWrapper::$variant(g) => g.game_type(),)*
                }
            }

            fn board(&self) -> &Board {
                match self {
                    $(GameWrapper::$variant(g) => g.board(),)*
                }
            }

            fn current_color(&self) -> Color {
                match self {
                    $(GameWrapper::$variant(g) => g.current_color(),)*
                }
            }

            fn current_player(&self) -> &Player {
                match self {
                    $(GameWrapper::$variant(g) => g.current_player(),)*
                }
            }

            fn black_player(&self) -> &Player {
                match self {
                    $(GameWrapper::$variant(g) => g.black_player(),)*
                }
            }

            fn white_player(&self) -> &Player {
                match self {
                    $(GameWrapper::$variant(g) => g.white_player(),)*
                }
            }

            fn set_players(&mut self, black: Player, white: Player) {
                match self {
                    $(GameWrapper::$variant(g) => g.set_players(black, white),)*
                }
            }

            fn is_over(&self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_over(),)*
                }
            }

            fn status(&self) -> GameStatus {
                match self {
                    $(GameWrapper::$variant(g) => g.status(),)*
                }
            }

            fn get_legal_moves(&self) -> Vec<Point> {
                match self {
                    $(GameWrapper::$variant(g) => g.get_legal_moves(),)*
                }
            }

            fn is_legal(&self, row: usize, col: usize) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_legal(row, col),)*
                }
            }

            fn make_move(&mut self, row: usize, col: usize) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.make_move(row, col),)*
                }
            }

            fn pass(&mut self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.pass(),)*
                }
            }

            fn resign(&mut self, color: Color) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.resign(color),)*
                }
            }

            fn undo(&mut self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.undo(),)*
                }
            }

            fn move_count(&self) -> usize {
                match self {
                    $(GameWrapper::$variant(g) => g.move_count(),)*
                }
            }

            fn status_text(&self) -> String {
                match self {
                    $(GameWrapper::$variant(g) => g.status_text(),)*
                }
            }

            fn recorder(&self) -> &GameRecorder {
                match self {
                    $(GameWrapper::$variant(g) => g.recorder(),)*
                }
            }

            fn annotate(&mut self, text: &str) {
                match self {
                    $(GameWrapper::$variant(g) => g.annotate(text),)*
                }
            }

            fn is_replay_mode(&self) -> bool {
                match self {
                    $(GameWrapper::$variant(g) => g.is_replay_mode(),)*
                }
            }

            fn set_replay_mode(&mut self, on: bool) {
                match self {
                    $(GameWrapper::$variant(g) => g.set_replay_mode(on),)*
                }
            }

            fn set_replay_step(&mut self, step: usize) {
                match self {
                    $(GameWrapper::$variant(g) => g.set_replay_step(step),)*
                }
            }

            fn replay_step(&self) -> usize {
                match self {
                    $(GameWrapper::$variant(g) => g.replay_step(),)*
                }
            }

            fn subscribe(&mut self, listener: Listener) {
                match self {
                    $(GameWrapper::$variant(g) => g.subscribe(listener),)*
                }
            }

            fn announce_start(&mut self) {
                match self {
                    $(GameWrapper::$variant(g) => g.announce_start(),)*
                }
            }
        }
    };
}

impl_game_dispatch!(Gomoku, Go, Reversi);

impl fmt::Display for GameWrapper {
    /// Board diagram followed by the one-line status.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board())?;
        write!(f, "{}", self.status_text())
    }
}
