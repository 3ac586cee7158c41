//! Uniform random agent, the level-1 baseline.

use crate::agents::{make_rng, Agent};
use crate::board::Point;
use crate::game::Game;
use crate::game_wrapper::GameWrapper;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;

pub struct RandomAgent {
    rng: Xoshiro256PlusPlus,
}

impl RandomAgent {
    pub fn new(seed: Option<u64>) -> Self {
        RandomAgent {
            rng: make_rng(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose(&mut self, game: &GameWrapper) -> Option<Point> {
        let moves = game.get_legal_moves();
        if moves.is_empty() {
            return None;
        }
        Some(moves[self.rng.random_range(0..moves.len())])
    }

    fn name(&self) -> &str {
        "Random"
    }

    fn level(&self) -> u8 {
        1
    }
}
