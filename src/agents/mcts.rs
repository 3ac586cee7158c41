//! Monte-Carlo Tree Search agent.
//!
//! A single-threaded UCT search over a flat arena of nodes. Each node keeps
//! the win sum from the perspective of its own side to move; backpropagation
//! flips the value whenever it crosses a parent with the other side to move.
//! The search stops at the iteration budget, the wall-clock deadline, or an
//! external stop flag, whichever comes first, and answers with the root
//! child holding the most visits.

use crate::agents::{make_rng, Agent};
use crate::board::{Board, Color, Point};
use crate::config::MctsSettings;
use crate::game::{Game, GameType};
use crate::game_wrapper::GameWrapper;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Summary of one completed search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchStatistics {
    /// Iterations actually run before a stop condition hit.
    pub iterations: u32,
    pub elapsed: Duration,
    /// Visit count at the root.
    pub root_visits: u32,
    /// Visit count of the chosen child.
    pub best_visits: u32,
    /// Win rate of the chosen child from its own perspective.
    pub best_win_rate: f64,
}

struct Node {
    state: GameWrapper,
    parent: Option<usize>,
    /// The placement that led from the parent to this node; `None` at root.
    mv: Option<Point>,
    children: Vec<usize>,
    untried: Vec<Point>,
    visits: u32,
    wins: f64,
    /// Side to move at this node; `wins/visits` is from this side's view.
    player_color: Color,
}

impl Node {
    fn new(state: GameWrapper, parent: Option<usize>, mv: Option<Point>) -> Self {
        Node {
            untried: state.get_legal_moves(),
            player_color: state.current_color(),
            state,
            parent,
            mv,
            children: Vec::new(),
            visits: 0,
            wins: 0.0,
        }
    }
}

pub struct MctsAgent {
    settings: MctsSettings,
    rng: Xoshiro256PlusPlus,
    stats: Option<SearchStatistics>,
    stop: Option<Arc<AtomicBool>>,
}

impl MctsAgent {
    pub fn new(settings: MctsSettings, seed: Option<u64>) -> Self {
        MctsAgent {
            settings,
            rng: make_rng(seed),
            stats: None,
            stop: None,
        }
    }

    fn should_stop(&self, start: Instant, iterations: u32) -> bool {
        if iterations >= self.settings.iterations {
            return true;
        }
        if start.elapsed() >= self.settings.time_limit {
            return true;
        }
        match &self.stop {
            Some(flag) => flag.load(Ordering::Relaxed),
            None => false,
        }
    }

    /// UCB1 pick among the children of `idx`. Unvisited children win
    /// outright.
    fn select_child(nodes: &[Node], idx: usize, c: f64) -> usize {
        let parent_visits = nodes[idx].visits.max(1) as f64;
        let mut best = nodes[idx].children[0];
        let mut best_score = f64::NEG_INFINITY;
        for &ci in &nodes[idx].children {
            let child = &nodes[ci];
            if child.visits == 0 {
                return ci;
            }
            let n = child.visits as f64;
            let score = child.wins / n + c * (parent_visits.ln() / n).sqrt();
            if score > best_score {
                best_score = score;
                best = ci;
            }
        }
        best
    }

    /// Random playout from `state`, capped at `rollout_cap` plies.
    fn rollout(&mut self, state: &GameWrapper) -> GameWrapper {
        let mut sim = state.copy();
        let mut plies = 0;
        while !sim.is_over() && plies < self.settings.rollout_cap {
            let moves = sim.get_legal_moves();
            if moves.is_empty() {
                if !sim.pass() {
                    break;
                }
            } else {
                let mv = moves[self.rng.random_range(0..moves.len())];
                sim.make_move(mv.row, mv.col);
            }
            plies += 1;
        }
        sim
    }

    /// Value of `sim` in `[0,1]` from the perspective of `color`.
    fn evaluate(sim: &GameWrapper, color: Color) -> f64 {
        if sim.is_over() {
            return match sim.winner() {
                Some(winner) if winner == color => 1.0,
                Some(_) => 0.0,
                None => 0.5,
            };
        }
        match sim.game_type() {
            GameType::Gomoku => gomoku_position_value(sim.board(), color),
            _ => 0.5,
        }
    }

    fn search(&mut self, game: &GameWrapper) -> (Option<Point>, SearchStatistics) {
        let start = Instant::now();
        let c = self.settings.exploration_c;
        let mut nodes = vec![Node::new(game.copy(), None, None)];
        let mut iterations = 0;

        while !self.should_stop(start, iterations) {
            // Selection.
            let mut idx = 0;
            while nodes[idx].untried.is_empty() && !nodes[idx].children.is_empty() {
                idx = Self::select_child(&nodes, idx, c);
            }

            // Expansion.
            if !nodes[idx].untried.is_empty() {
                let pick = self.rng.random_range(0..nodes[idx].untried.len());
                let mv = nodes[idx].untried.swap_remove(pick);
                let mut state = nodes[idx].state.copy();
                state.make_move(mv.row, mv.col);
                let child = Node::new(state, Some(idx), Some(mv));
                nodes.push(child);
                let ci = nodes.len() - 1;
                nodes[idx].children.push(ci);
                idx = ci;
            }

            // Simulation and evaluation from the expanded node's view.
            let end_state = self.rollout(&nodes[idx].state);
            let mut value = Self::evaluate(&end_state, nodes[idx].player_color);

            // Backpropagation with perspective flips.
            let mut cur = idx;
            loop {
                nodes[cur].visits += 1;
                nodes[cur].wins += value;
                match nodes[cur].parent {
                    Some(p) => {
                        if nodes[p].player_color != nodes[cur].player_color {
                            value = 1.0 - value;
                        }
                        cur = p;
                    }
                    None => break,
                }
            }
            iterations += 1;
        }

        // Robust choice: most-visited root child, first seen wins ties.
        let mut choice = None;
        let mut best_visits = 0;
        let mut best_win_rate = 0.0;
        for &ci in &nodes[0].children {
            let child = &nodes[ci];
            if child.visits > best_visits {
                best_visits = child.visits;
                best_win_rate = child.wins / child.visits as f64;
                choice = child.mv;
            }
        }
        let stats = SearchStatistics {
            iterations,
            elapsed: start.elapsed(),
            root_visits: nodes[0].visits,
            best_visits,
            best_win_rate,
        };
        (choice, stats)
    }
}

impl Agent for MctsAgent {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point> {
        if game.is_over() {
            self.stats = None;
            return None;
        }
        let moves = game.get_legal_moves();
        if moves.is_empty() {
            self.stats = None;
            return None;
        }
        if moves.len() == 1 {
            // Nothing to search.
            self.stats = Some(SearchStatistics {
                iterations: 0,
                elapsed: Duration::ZERO,
                root_visits: 0,
                best_visits: 0,
                best_win_rate: 0.0,
            });
            return Some(moves[0]);
        }
        let (choice, stats) = self.search(game);
        self.stats = Some(stats);
        choice
    }

    fn name(&self) -> &str {
        "MCTS"
    }

    fn level(&self) -> u8 {
        3
    }

    fn set_time_limit(&mut self, limit: Duration) {
        self.settings.time_limit = limit;
    }

    fn statistics(&self) -> Option<SearchStatistics> {
        self.stats
    }

    fn set_stop_flag(&mut self, flag: Arc<AtomicBool>) {
        self.stop = Some(flag);
    }
}

/// Non-terminal Gomoku evaluation: exponential threat sums for both colors,
/// normalized to the share held by `color`.
fn gomoku_position_value(board: &Board, color: Color) -> f64 {
    let own = threat_sum(board, color);
    let opp = threat_sum(board, color.opposite());
    if own + opp == 0.0 {
        return 0.5;
    }
    own / (own + opp)
}

/// Sum of `2^len` over every maximal same-color run on the four axes.
fn threat_sum(board: &Board, color: Color) -> f64 {
    const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];
    let mut sum = 0.0;
    for p in board.positions() {
        if board.get(p.row, p.col) != color {
            continue;
        }
        for (dr, dc) in AXES {
            // Only score a run from its first stone.
            if let Some(prev) = board.offset(p.row, p.col, -dr, -dc) {
                if board.get(prev.row, prev.col) == color {
                    continue;
                }
            }
            let mut len = 1;
            let mut at = p;
            while let Some(next) = board.offset(at.row, at.col, dr, dc) {
                if board.get(next.row, next.col) != color {
                    break;
                }
                len += 1;
                at = next;
            }
            sum += f64::powi(2.0, len);
        }
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::game::GameType;

    fn settings(iterations: u32) -> MctsSettings {
        MctsSettings {
            iterations,
            time_limit: Duration::from_secs(60),
            ..MctsSettings::default()
        }
    }

    #[test]
    fn test_root_visits_equal_iterations() {
        let config = EngineConfig::default();
        let game = GameWrapper::new(GameType::Reversi, &config);
        let mut agent = MctsAgent::new(settings(50), Some(1));
        let (choice, stats) = agent.search(&game);
        assert!(choice.is_some());
        assert_eq!(stats.iterations, 50);
        assert_eq!(stats.root_visits, 50);
        assert!(stats.best_visits <= stats.root_visits);
        assert!(stats.best_visits > 0);
    }

    #[test]
    fn test_seeded_search_is_deterministic() {
        let mut config = EngineConfig::default();
        config.gomoku.board_size = 8;
        let game = GameWrapper::new(GameType::Gomoku, &config);

        let mut first = MctsAgent::new(settings(50), Some(123));
        let mut second = MctsAgent::new(settings(50), Some(123));
        assert_eq!(first.choose(&game), second.choose(&game));
        assert_eq!(
            first.statistics().unwrap().root_visits,
            second.statistics().unwrap().root_visits
        );
    }

    #[test]
    fn test_single_legal_move_short_circuits() {
        let config = EngineConfig::default();
        let mut game = GameWrapper::new(GameType::Gomoku, &config);
        let size = config.gomoku.board_size;
        // Fill everything except (0,0) without producing five in a row by
        // tiling 2x1 dominoes of alternating colors.
        let mut cells: Vec<Point> = Vec::new();
        for row in 0..size {
            for col in 0..size {
                if row == 0 && col == 0 {
                    continue;
                }
                cells.push(Point::new(row, col));
            }
        }
        // Alternate colors by index parity of (col + 2*row)/2, which keeps
        // every axis run at length 2 or less.
        let color_of = |p: Point| ((p.col + 2 * p.row) / 2) % 2 == 0;
        let mut blacks: Vec<Point> = cells.iter().copied().filter(|&p| color_of(p)).collect();
        let mut whites: Vec<Point> = cells.iter().copied().filter(|&p| !color_of(p)).collect();
        loop {
            let mover = game.current_color();
            let stash = if mover == Color::Black {
                &mut blacks
            } else {
                &mut whites
            };
            match stash.pop() {
                Some(p) => {
                    assert!(game.make_move(p.row, p.col), "placement at {} failed", p);
                }
                None => break,
            }
            if game.get_legal_moves().len() == 1 {
                break;
            }
        }
        let legal = game.get_legal_moves();
        assert_eq!(legal, vec![Point::new(0, 0)]);
        let mut agent = MctsAgent::new(settings(50), Some(1));
        assert_eq!(agent.choose(&game), Some(Point::new(0, 0)));
        assert_eq!(agent.statistics().unwrap().iterations, 0);
    }

    #[test]
    fn test_terminal_game_yields_none() {
        let config = EngineConfig::default();
        let mut game = GameWrapper::new(GameType::Gomoku, &config);
        for i in 0..4 {
            game.make_move(7, 3 + i);
            game.make_move(0, i);
        }
        game.make_move(7, 7);
        assert!(game.is_over());
        let mut agent = MctsAgent::new(settings(50), Some(1));
        assert_eq!(agent.choose(&game), None);
    }

    #[test]
    fn test_stop_flag_halts_search() {
        let config = EngineConfig::default();
        let game = GameWrapper::new(GameType::Reversi, &config);
        let mut agent = MctsAgent::new(settings(1_000_000), Some(1));
        let flag = Arc::new(AtomicBool::new(true));
        agent.set_stop_flag(flag);
        let (_, stats) = agent.search(&game);
        assert_eq!(stats.iterations, 0);
    }

    #[test]
    fn test_threat_sum_counts_runs_once() {
        let mut board = Board::new(8);
        board.set(3, 3, Color::Black);
        board.set(3, 4, Color::Black);
        board.set(3, 5, Color::Black);
        // One run of 3 on the horizontal axis (2^3) and three singleton
        // runs (2^1) on each of the other three axes.
        let expected = 8.0 + 3.0 * 3.0 * 2.0;
        assert_eq!(threat_sum(&board, Color::Black), expected);
        assert_eq!(threat_sum(&board, Color::White), 0.0);
    }

    #[test]
    fn test_position_value_is_normalized() {
        let mut board = Board::new(8);
        board.set(0, 0, Color::Black);
        board.set(0, 1, Color::Black);
        board.set(7, 7, Color::White);
        let black = gomoku_position_value(&board, Color::Black);
        let white = gomoku_position_value(&board, Color::White);
        assert!(black > 0.5);
        assert!((black + white - 1.0).abs() < 1e-9);
        assert_eq!(gomoku_position_value(&Board::new(8), Color::Black), 0.5);
    }
}
