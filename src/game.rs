//! # Game Contract Module
//!
//! The uniform surface every variant exposes, and the small enums that
//! identify variants, outcomes, and agent kinds. Front-ends, the session
//! layer, the replay view, and every agent consume games exclusively
//! through this trait (usually via the [`crate::game_wrapper::GameWrapper`]
//! enum), so none of them know which rules are running underneath.
//!
//! Mutating operations report acceptance as a plain `bool`: an illegal
//! request leaves the state untouched and returns false. This layer never
//! panics on caller input.

use crate::board::{Board, Color, Point};
use crate::events::Listener;
use crate::player::Player;
use crate::recorder::GameRecorder;
use std::fmt;
use std::str::FromStr;

/// The supported game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameType {
    Gomoku,
    Go,
    Reversi,
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameType::Gomoku => write!(f, "Gomoku"),
            GameType::Go => write!(f, "Go"),
            GameType::Reversi => write!(f, "Reversi"),
        }
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gomoku" => Ok(GameType::Gomoku),
            "go" => Ok(GameType::Go),
            "reversi" | "othello" => Ok(GameType::Reversi),
            other => Err(format!("unknown game type '{}'", other)),
        }
    }
}

/// Current outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress.
    InProgress,
    /// Game ended with a winner.
    Win(Color),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Check if the game is over.
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning color, if there is one.
    pub fn winner(&self) -> Option<Color> {
        match self {
            GameStatus::Win(color) => Some(*color),
            _ => None,
        }
    }
}

/// The kinds of move chooser a side can be assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentKind {
    /// No agent; moves come from a human or external caller.
    None,
    /// Uniform random over legal moves.
    Random,
    /// Per-variant rule-based scorer.
    Heuristic,
    /// Heuristic with shallow lookahead (Reversi only; falls back to the
    /// plain heuristic elsewhere).
    Advanced,
    /// Monte-Carlo Tree Search.
    Mcts,
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentKind::None => write!(f, "human"),
            AgentKind::Random => write!(f, "random"),
            AgentKind::Heuristic => write!(f, "heuristic"),
            AgentKind::Advanced => write!(f, "advanced"),
            AgentKind::Mcts => write!(f, "mcts"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "human" => Ok(AgentKind::None),
            "random" => Ok(AgentKind::Random),
            "heuristic" | "rule" => Ok(AgentKind::Heuristic),
            "advanced" => Ok(AgentKind::Advanced),
            "mcts" => Ok(AgentKind::Mcts),
            other => Err(format!("unknown agent kind '{}'", other)),
        }
    }
}

/// The uniform game contract.
///
/// Implemented by each variant state and, by delegation, by the wrapper
/// enum. `Clone` doubles as the snapshot and search-copy primitive: clones
/// are fully independent (listeners excepted, which never follow a clone).
pub trait Game: Clone + Send {
    /// Which variant this state plays.
    fn game_type(&self) -> GameType;

    /// The live board.
    fn board(&self) -> &Board;

    /// Color of the side to move.
    fn current_color(&self) -> Color;

    /// The player record of the side to move.
    fn current_player(&self) -> &Player;

    fn black_player(&self) -> &Player;

    fn white_player(&self) -> &Player;

    /// Replaces both player identities. Colors are taken from the
    /// arguments' own colors; black must play Black and white White.
    fn set_players(&mut self, black: Player, white: Player);

    /// True once the game has terminated.
    fn is_over(&self) -> bool;

    /// Current outcome.
    fn status(&self) -> GameStatus;

    /// The winning color once the game is over, `None` while in progress
    /// or on a draw.
    fn winner(&self) -> Option<Color> {
        self.status().winner()
    }

    /// Every coordinate the side to move may play. Empty when the game is
    /// over or in replay mode.
    fn get_legal_moves(&self) -> Vec<Point>;

    /// True when placing at `(row, col)` would be accepted right now.
    fn is_legal(&self, row: usize, col: usize) -> bool;

    /// Attempts a placement for the side to move. Returns false and leaves
    /// the state untouched when the move is illegal, the game is over, or
    /// the game is in replay mode.
    fn make_move(&mut self, row: usize, col: usize) -> bool;

    /// Attempts a pass for the side to move. Gomoku always rejects.
    fn pass(&mut self) -> bool;

    /// Concedes the game for `color`; the opponent wins.
    fn resign(&mut self, color: Color) -> bool;

    /// Rolls the last accepted move back. Returns false with nothing to
    /// undo or in replay mode.
    fn undo(&mut self) -> bool;

    /// Number of accepted moves so far (including passes and resigns).
    fn move_count(&self) -> usize;

    /// One-line human-readable summary of the game state.
    fn status_text(&self) -> String;

    /// The recorder owned by this game.
    fn recorder(&self) -> &GameRecorder;

    /// Adds a free-form annotation to the recorder.
    fn annotate(&mut self, text: &str);

    fn is_replay_mode(&self) -> bool;

    /// Enters or leaves replay mode. Entering rewinds the visible board to
    /// step 0; leaving restores the live position.
    fn set_replay_mode(&mut self, on: bool);

    /// Seeks the visible board to `step` (clamped to the recorded total).
    /// Only meaningful in replay mode.
    fn set_replay_step(&mut self, step: usize);

    fn replay_step(&self) -> usize;

    /// Registers an event listener on this live game.
    fn subscribe(&mut self, listener: Listener);

    /// Emits `GameStarted` to the listeners. Called once by the owning
    /// front-end after it has subscribed.
    fn announce_start(&mut self);

    /// Independent deep copy for search rollouts.
    fn copy(&self) -> Self
    where
        Self: Sized,
    {
        self.clone()
    }

    /// Opaque deep copy for save/restore.
    fn snapshot(&self) -> Self
    where
        Self: Sized,
    {
        self.clone()
    }

    /// Overwrites this state from a snapshot.
    fn restore(&mut self, snapshot: Self)
    where
        Self: Sized,
    {
        *self = snapshot;
    }
}
