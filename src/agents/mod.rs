//! # Agents Module
//!
//! The move choosers a session can assign to either color: uniform random,
//! the per-variant heuristics, and Monte-Carlo Tree Search. Agents only see
//! the game through the [`Game`] trait, always on a copy handed to
//! [`Agent::choose`], so they never share mutable state with the live game.
//!
//! Every agent owns its own seedable RNG so benchmark runs and tests are
//! reproducible.

pub mod heuristic;
pub mod mcts;
pub mod random;

pub use heuristic::{GoHeuristic, GomokuHeuristic, ReversiHeuristic};
pub use mcts::{MctsAgent, SearchStatistics};
pub use random::RandomAgent;

use crate::board::Point;
use crate::config::EngineConfig;
use crate::game::{AgentKind, GameType};
use crate::game_wrapper::GameWrapper;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

/// A move chooser for one side.
///
/// `choose` receives an independent copy of the game and returns the
/// placement to make, or `None` when the agent has no move (the caller
/// translates that to a pass or a forfeit as the variant allows).
pub trait Agent: Send {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point>;

    /// Display name for status lines and reports.
    fn name(&self) -> &str;

    /// Rough strength tier: 1 random, 2 heuristic, 3 search.
    fn level(&self) -> u8;

    /// Soft wall-clock budget per choice; only search agents interpret it.
    fn set_time_limit(&mut self, _limit: Duration) {}

    /// Statistics from the most recent `choose`, when the agent collects any.
    fn statistics(&self) -> Option<SearchStatistics> {
        None
    }

    /// Cooperative cancel signal checked during long choices.
    fn set_stop_flag(&mut self, _flag: Arc<AtomicBool>) {}
}

/// Builds the RNG every agent carries: seeded for reproducibility when a
/// seed is given, otherwise seeded from the thread-local generator.
pub(crate) fn make_rng(seed: Option<u64>) -> Xoshiro256PlusPlus {
    match seed {
        Some(s) => Xoshiro256PlusPlus::seed_from_u64(s),
        None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
    }
}

/// Instantiates the agent for `kind`, picking the heuristic that matches
/// `game_type`. `AgentKind::None` yields no agent (a human side).
pub fn create_agent(
    kind: AgentKind,
    game_type: GameType,
    config: &EngineConfig,
    seed: Option<u64>,
) -> Option<Box<dyn Agent>> {
    match kind {
        AgentKind::None => None,
        AgentKind::Random => Some(Box::new(RandomAgent::new(seed))),
        AgentKind::Heuristic | AgentKind::Advanced => {
            let advanced = kind == AgentKind::Advanced;
            match game_type {
                GameType::Gomoku => Some(Box::new(GomokuHeuristic::new(seed))),
                GameType::Go => Some(Box::new(GoHeuristic::new(seed))),
                GameType::Reversi => Some(Box::new(ReversiHeuristic::new(advanced, seed))),
            }
        }
        AgentKind::Mcts => Some(Box::new(MctsAgent::new(config.mcts, seed))),
    }
}
