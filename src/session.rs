//! # Session Module
//!
//! Binds one live game to its per-color agent assignment and drives play.
//! The session owns the agents, answers whose turn it is, translates an
//! agent's `None` answer into a pass (or a forfeit where the variant has no
//! pass), and reports move attempts with a typed result instead of the rule
//! core's bare boolean.

use crate::agents::{create_agent, Agent, SearchStatistics};
use crate::board::{Color, Point};
use crate::config::{ConfigError, EngineConfig};
use crate::game::{AgentKind, Game, GameStatus, GameType};
use crate::game_wrapper::GameWrapper;
use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Why a move attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The coordinate is not playable for the side to move.
    Illegal,
    /// The game has already ended.
    GameAlreadyOver,
    /// The game is in replay mode and rejects mutation.
    ReplayMode,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Illegal => write!(f, "illegal move"),
            MoveError::GameAlreadyOver => write!(f, "the game is already over"),
            MoveError::ReplayMode => write!(f, "moves are disabled in replay mode"),
        }
    }
}

impl Error for MoveError {}

/// Outcome of a move attempt through the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveResult {
    /// The move was accepted; `status` reflects the game afterwards.
    Applied { at: Point, status: GameStatus },
    Rejected(MoveError),
}

impl MoveResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveResult::Applied { .. })
    }
}

/// One game plus the agents playing it.
pub struct GameSession {
    game: GameWrapper,
    config: EngineConfig,
    black_kind: AgentKind,
    white_kind: AgentKind,
    black_agent: Option<Box<dyn Agent>>,
    white_agent: Option<Box<dyn Agent>>,
}

impl GameSession {
    /// Starts a session on a fresh game. Both sides default to human.
    pub fn new(game_type: GameType, config: &EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameSession {
            game: GameWrapper::new(game_type, config),
            config: config.clone(),
            black_kind: AgentKind::None,
            white_kind: AgentKind::None,
            black_agent: None,
            white_agent: None,
        })
    }

    pub fn game(&self) -> &GameWrapper {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut GameWrapper {
        &mut self.game
    }

    /// Assigns an agent to a color, constructing it from the session config.
    /// A seed makes the agent reproducible.
    pub fn set_agent(&mut self, color: Color, kind: AgentKind, seed: Option<u64>) {
        let agent = create_agent(kind, self.game.game_type(), &self.config, seed);
        match color {
            Color::White => {
                self.white_kind = kind;
                self.white_agent = agent;
            }
            _ => {
                self.black_kind = kind;
                self.black_agent = agent;
            }
        }
    }

    pub fn get_agent(&self, color: Color) -> AgentKind {
        match color {
            Color::White => self.white_kind,
            _ => self.black_kind,
        }
    }

    fn agent_mut(&mut self, color: Color) -> Option<&mut Box<dyn Agent>> {
        match color {
            Color::White => self.white_agent.as_mut(),
            _ => self.black_agent.as_mut(),
        }
    }

    /// True when the side to move has an agent and the game is live.
    pub fn is_ai_turn(&self) -> bool {
        !self.game.is_over()
            && !self.game.is_replay_mode()
            && self.get_agent(self.game.current_color()) != AgentKind::None
    }

    /// Attempts a human placement, reporting the reason on rejection.
    pub fn try_move(&mut self, row: usize, col: usize) -> MoveResult {
        if self.game.is_replay_mode() {
            return MoveResult::Rejected(MoveError::ReplayMode);
        }
        if self.game.is_over() {
            return MoveResult::Rejected(MoveError::GameAlreadyOver);
        }
        if !self.game.make_move(row, col) {
            return MoveResult::Rejected(MoveError::Illegal);
        }
        MoveResult::Applied {
            at: Point::new(row, col),
            status: self.game.status(),
        }
    }

    /// Runs one agent ply: choose on a copy, apply on the live game. An
    /// agent with no move passes where the variant allows and forfeits
    /// where it does not. Returns the placement, or `None` for a pass,
    /// a resignation, or when it is not an agent's turn.
    pub fn run_agent_ply(&mut self) -> Option<Point> {
        if !self.is_ai_turn() {
            return None;
        }
        let mover = self.game.current_color();
        let copy = self.game.copy();
        let choice = match self.agent_mut(mover) {
            Some(agent) => agent.choose(&copy),
            None => return None,
        };
        match choice {
            Some(p) => {
                // The agent chose on an identical copy, so the live game
                // accepts the same move.
                let applied = self.game.make_move(p.row, p.col);
                debug_assert!(applied);
                Some(p)
            }
            None => {
                if !self.game.pass() {
                    self.game.resign(mover);
                }
                None
            }
        }
    }

    /// Plays agent turns until the game ends, a human turn comes up, or
    /// `stop` is raised. `delay` spaces the plies out for spectating.
    pub fn auto_play(&mut self, delay: Duration, stop: &AtomicBool) {
        while self.is_ai_turn() && !stop.load(Ordering::Relaxed) {
            self.run_agent_ply();
            if !delay.is_zero() && !self.game.is_over() {
                thread::sleep(delay);
            }
        }
    }

    /// Statistics from the most recent choice of the agent on `color`.
    pub fn agent_statistics(&self, color: Color) -> Option<SearchStatistics> {
        let agent = match color {
            Color::White => self.white_agent.as_ref(),
            _ => self.black_agent.as_ref(),
        };
        agent.and_then(|a| a.statistics())
    }
}
