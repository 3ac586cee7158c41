//! Rule-based agents, one scorer per variant.
//!
//! Each heuristic assigns every legal move an integer score, picks the
//! argmax, and breaks ties uniformly at random with its own seeded RNG.

use crate::agents::{make_rng, Agent};
use crate::board::{Board, Color, Point};
use crate::game::Game;
use crate::game_wrapper::GameWrapper;
use crate::games::reversi::ReversiState;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Picks a random element among the highest-scoring candidates.
fn argmax_random(
    rng: &mut Xoshiro256PlusPlus,
    scored: impl IntoIterator<Item = (Point, i32)>,
) -> Option<Point> {
    let mut best_score = i32::MIN;
    let mut best = Vec::new();
    for (p, score) in scored {
        if score > best_score {
            best_score = score;
            best.clear();
            best.push(p);
        } else if score == best_score {
            best.push(p);
        }
    }
    if best.is_empty() {
        None
    } else {
        Some(best[rng.random_range(0..best.len())])
    }
}

/// Gomoku scorer: centrality plus line-building potential for both sides.
pub struct GomokuHeuristic {
    rng: Xoshiro256PlusPlus,
}

impl GomokuHeuristic {
    const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

    pub fn new(seed: Option<u64>) -> Self {
        GomokuHeuristic {
            rng: make_rng(seed),
        }
    }

    /// Contiguous stones of `color` through `(row, col)` along one axis,
    /// counting the cell itself as occupied by `color`.
    fn axis_run(board: &Board, row: usize, col: usize, color: Color, dr: i32, dc: i32) -> usize {
        let mut count = 1;
        for sign in [1, -1] {
            let mut at = Point::new(row, col);
            while let Some(next) = board.offset(at.row, at.col, dr * sign, dc * sign) {
                if board.get(next.row, next.col) != color {
                    break;
                }
                count += 1;
                at = next;
            }
        }
        count
    }

    /// Number of axes on which playing `color` at the cell makes a run of
    /// at least two.
    fn axes_with_pair(board: &Board, row: usize, col: usize, color: Color) -> i32 {
        Self::AXES
            .iter()
            .filter(|&&(dr, dc)| Self::axis_run(board, row, col, color, dr, dc) >= 2)
            .count() as i32
    }

    fn score(board: &Board, p: Point, own: Color) -> i32 {
        let center = board.size() / 2;
        let manhattan =
            p.row.abs_diff(center) as i32 + p.col.abs_diff(center) as i32;
        let center_bonus = (10 - manhattan).max(0);
        let offense = Self::axes_with_pair(board, p.row, p.col, own);
        let defense = Self::axes_with_pair(board, p.row, p.col, own.opposite());
        center_bonus + 2 * offense + defense
    }
}

impl Agent for GomokuHeuristic {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point> {
        let own = game.current_color();
        let board = game.board();
        let scored = game
            .get_legal_moves()
            .into_iter()
            .map(|p| (p, Self::score(board, p, own)));
        argmax_random(&mut self.rng, scored)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }

    fn level(&self) -> u8 {
        2
    }
}

/// Reversi scorer: positional weight table plus mobility and corner terms.
/// The advanced variant adds a 2-ply lookahead with the same evaluator.
pub struct ReversiHeuristic {
    advanced: bool,
    rng: Xoshiro256PlusPlus,
}

impl ReversiHeuristic {
    pub fn new(advanced: bool, seed: Option<u64>) -> Self {
        ReversiHeuristic {
            advanced,
            rng: make_rng(seed),
        }
    }

    fn corners(board: &Board) -> [Point; 4] {
        let last = board.size() - 1;
        [
            Point::new(0, 0),
            Point::new(0, last),
            Point::new(last, 0),
            Point::new(last, last),
        ]
    }

    fn is_adjacent(a: Point, b: Point) -> bool {
        a != b && a.row.abs_diff(b.row) <= 1 && a.col.abs_diff(b.col) <= 1
    }

    /// Positional weight of a square. X and C squares next to a still-empty
    /// corner are poisoned regardless of their ring.
    fn square_weight(board: &Board, p: Point) -> i32 {
        let corners = Self::corners(board);
        if corners.contains(&p) {
            return 100;
        }
        for corner in corners {
            if Self::is_adjacent(p, corner) && board.is_empty(corner.row, corner.col) {
                return -50;
            }
        }
        let last = board.size() - 1;
        if p.row == 0 || p.row == last || p.col == 0 || p.col == last {
            20
        } else if p.row == 1 || p.row == last - 1 || p.col == 1 || p.col == last - 1 {
            5
        } else {
            1
        }
    }

    fn mobility(board: &Board, color: Color) -> i32 {
        board
            .positions()
            .filter(|p| !ReversiState::flips_for(board, color, p.row, p.col).is_empty())
            .count() as i32
    }

    /// Static score of playing `p` for `own` on `board`.
    fn evaluate(board: &Board, own: Color, p: Point) -> i32 {
        let flips = ReversiState::flips_for(board, own, p.row, p.col);
        debug_assert!(!flips.is_empty());

        let endgame = board.count(Color::Black) + board.count(Color::White) >= 50;
        let flip_weight = if endgame { 5 } else { 3 };
        let mut score = Self::square_weight(board, p) + flip_weight * flips.len() as i32;

        let mut after = board.clone();
        after.set(p.row, p.col, own);
        for f in &flips {
            after.set(f.row, f.col, own);
        }
        score -= 2 * Self::mobility(&after, own.opposite());

        for corner in Self::corners(board) {
            if Self::is_adjacent(p, corner) && board.get(corner.row, corner.col) == own {
                score += 30;
                break;
            }
        }
        score
    }

    /// Advanced score: subtract half the opponent's best static reply.
    fn evaluate_deep(board: &Board, own: Color, p: Point) -> i32 {
        let mut score = Self::evaluate(board, own, p);

        let flips = ReversiState::flips_for(board, own, p.row, p.col);
        let mut after = board.clone();
        after.set(p.row, p.col, own);
        for f in &flips {
            after.set(f.row, f.col, own);
        }
        let opponent = own.opposite();
        let best_reply = after
            .positions()
            .filter(|r| !ReversiState::flips_for(&after, opponent, r.row, r.col).is_empty())
            .map(|r| Self::evaluate(&after, opponent, r))
            .max();
        if let Some(best) = best_reply {
            score -= best / 2;
        }
        score
    }
}

impl Agent for ReversiHeuristic {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point> {
        let own = game.current_color();
        let board = game.board();
        let advanced = self.advanced;
        let scored = game.get_legal_moves().into_iter().map(|p| {
            let score = if advanced {
                Self::evaluate_deep(board, own, p)
            } else {
                Self::evaluate(board, own, p)
            };
            (p, score)
        });
        argmax_random(&mut self.rng, scored)
    }

    fn name(&self) -> &str {
        if self.advanced {
            "Advanced"
        } else {
            "Heuristic"
        }
    }

    fn level(&self) -> u8 {
        if self.advanced {
            3
        } else {
            2
        }
    }
}

/// Go scorer: prefers corner points, then edges, then the interior,
/// uniformly within the chosen band.
pub struct GoHeuristic {
    rng: Xoshiro256PlusPlus,
}

impl GoHeuristic {
    pub fn new(seed: Option<u64>) -> Self {
        GoHeuristic {
            rng: make_rng(seed),
        }
    }

    /// 2 for corner points, 1 for edge bands, 0 for the interior. "Near the
    /// border" means within one line of it.
    fn band(board: &Board, p: Point) -> i32 {
        let n = board.size();
        let near = |i: usize| i <= 1 || i >= n - 2;
        match (near(p.row), near(p.col)) {
            (true, true) => 2,
            (true, false) | (false, true) => 1,
            (false, false) => 0,
        }
    }
}

impl Agent for GoHeuristic {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point> {
        let board = game.board();
        let scored = game
            .get_legal_moves()
            .into_iter()
            .map(|p| (p, Self::band(board, p)));
        argmax_random(&mut self.rng, scored)
    }

    fn name(&self) -> &str {
        "Heuristic"
    }

    fn level(&self) -> u8 {
        2
    }
}
