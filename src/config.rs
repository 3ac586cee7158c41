//! # Configuration Module
//!
//! The knobs the engine recognizes, grouped per concern with the documented
//! defaults. The binaries build an [`EngineConfig`] from command-line
//! arguments and hand it by reference to game constructors and the agent
//! factory; the engine itself never reads the environment.

use std::error::Error;
use std::fmt;
use std::time::Duration;

pub const DEFAULT_KOMI: f64 = 6.5;
pub const DEFAULT_GO_BOARD_SIZE: usize = 19;
pub const DEFAULT_GOMOKU_BOARD_SIZE: usize = 15;
pub const DEFAULT_MCTS_ITERATIONS: u32 = 1000;
pub const DEFAULT_MCTS_TIME_LIMIT_MS: u64 = 2000;
pub const DEFAULT_MCTS_ROLLOUT_CAP: u32 = 100;
pub const DEFAULT_SNAPSHOT_STRIDE: usize = 10;

/// Go-specific settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoSettings {
    /// Compensation points added to White's score.
    pub komi: f64,
    /// Edge length, 9..=19.
    pub board_size: usize,
}

impl Default for GoSettings {
    fn default() -> Self {
        GoSettings {
            komi: DEFAULT_KOMI,
            board_size: DEFAULT_GO_BOARD_SIZE,
        }
    }
}

/// Gomoku-specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GomokuSettings {
    /// Edge length, 8..=19.
    pub board_size: usize,
}

impl Default for GomokuSettings {
    fn default() -> Self {
        GomokuSettings {
            board_size: DEFAULT_GOMOKU_BOARD_SIZE,
        }
    }
}

/// Search budget and tuning for the MCTS agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MctsSettings {
    /// Iteration budget per search.
    pub iterations: u32,
    /// Wall-clock budget per search; the search stops at whichever of
    /// iterations or deadline is reached first.
    pub time_limit: Duration,
    /// Exploration constant `c` in the UCB1 formula.
    pub exploration_c: f64,
    /// Maximum plies simulated in one rollout.
    pub rollout_cap: u32,
}

impl Default for MctsSettings {
    fn default() -> Self {
        MctsSettings {
            iterations: DEFAULT_MCTS_ITERATIONS,
            time_limit: Duration::from_millis(DEFAULT_MCTS_TIME_LIMIT_MS),
            exploration_c: std::f64::consts::SQRT_2,
            rollout_cap: DEFAULT_MCTS_ROLLOUT_CAP,
        }
    }
}

/// Recorder snapshot policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderSettings {
    /// A board snapshot is stored after every `snapshot_stride`-th move
    /// (and for the first twenty moves).
    pub snapshot_stride: usize,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        RecorderSettings {
            snapshot_stride: DEFAULT_SNAPSHOT_STRIDE,
        }
    }
}

/// All engine settings in one value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub go: GoSettings,
    pub gomoku: GomokuSettings,
    pub mcts: MctsSettings,
    pub recorder: RecorderSettings,
}

impl EngineConfig {
    /// Checks every range constraint, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(9..=19).contains(&self.go.board_size) {
            return Err(ConfigError::GoBoardSize(self.go.board_size));
        }
        if !(8..=19).contains(&self.gomoku.board_size) {
            return Err(ConfigError::GomokuBoardSize(self.gomoku.board_size));
        }
        if self.mcts.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.mcts.exploration_c < 0.0 {
            return Err(ConfigError::NegativeExploration(self.mcts.exploration_c));
        }
        if self.recorder.snapshot_stride == 0 {
            return Err(ConfigError::ZeroSnapshotStride);
        }
        Ok(())
    }
}

/// A configuration value outside its supported range.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    GoBoardSize(usize),
    GomokuBoardSize(usize),
    ZeroIterations,
    NegativeExploration(f64),
    ZeroSnapshotStride,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GoBoardSize(n) => {
                write!(f, "go board size {} outside 9..=19", n)
            }
            ConfigError::GomokuBoardSize(n) => {
                write!(f, "gomoku board size {} outside 8..=19", n)
            }
            ConfigError::ZeroIterations => write!(f, "mcts iteration budget must be positive"),
            ConfigError::NegativeExploration(c) => {
                write!(f, "mcts exploration constant {} must not be negative", c)
            }
            ConfigError::ZeroSnapshotStride => {
                write!(f, "recorder snapshot stride must be positive")
            }
        }
    }
}

impl Error for ConfigError {}
