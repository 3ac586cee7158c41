//! Reversi (Othello) rule core.
//!
//! Fixed 8x8 board with the standard center opening; Black moves first. A
//! placement is legal only when it flips at least one opponent stone along
//! one of the eight rays. After a committed move, a blocked opponent is
//! auto-passed exactly once (counted and recorded); if the original mover
//! is then also blocked, the game ends on stone count. Two consecutive
//! passes, manual or automatic, end the game the same way.

use crate::board::{Board, Color, Point};
use crate::config::EngineConfig;
use crate::events::{GameEvent, Listener};
use crate::game::{Game, GameStatus, GameType};
use crate::games::core::GameCore;
use crate::moves::{Move, MoveKind};
use crate::player::Player;
use crate::recorder::GameRecorder;

/// Reversi is always played on 8x8.
pub const REVERSI_BOARD_SIZE: usize = 8;

/// The eight scan directions.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

#[derive(Debug, Clone)]
pub struct ReversiState {
    core: GameCore,
    consecutive_passes: u32,
    /// Cells recolored by the most recent placement, for display.
    last_flips: Vec<Point>,
}

impl ReversiState {
    pub fn new(config: &EngineConfig) -> Self {
        let mut board = Board::new(REVERSI_BOARD_SIZE);
        let c = REVERSI_BOARD_SIZE / 2;
        board.set(c - 1, c - 1, Color::White);
        board.set(c - 1, c, Color::Black);
        board.set(c, c - 1, Color::Black);
        board.set(c, c, Color::White);
        ReversiState {
            core: GameCore::new(board, config.recorder.snapshot_stride),
            consecutive_passes: 0,
            last_flips: Vec::new(),
        }
    }

    /// The stones `color` would flip by playing `(row, col)`: for each ray,
    /// the run of opponent stones terminated by a friendly stone. Empty when
    /// the move is illegal.
    pub fn flips_for(board: &Board, color: Color, row: usize, col: usize) -> Vec<Point> {
        let mut flips = Vec::new();
        if !board.is_inside(row, col) || !board.is_empty(row, col) {
            return flips;
        }
        let opponent = color.opposite();
        for (dr, dc) in DIRECTIONS {
            let mut line = Vec::new();
            let mut at = Point::new(row, col);
            while let Some(next) = board.offset(at.row, at.col, dr, dc) {
                match board.get(next.row, next.col) {
                    c if c == opponent => line.push(next),
                    c if c == color => {
                        flips.append(&mut line);
                        break;
                    }
                    _ => break,
                }
                at = next;
            }
        }
        flips
    }

    /// True when `color` has at least one legal placement on `board`.
    pub fn has_any_move(board: &Board, color: Color) -> bool {
        board
            .positions()
            .any(|p| !Self::flips_for(board, color, p.row, p.col).is_empty())
    }

    /// Flips recorded for the most recent placement, for display.
    pub fn last_flips(&self) -> &[Point] {
        &self.last_flips
    }

    /// Stone counts as `(black, white)`.
    pub fn counts(&self) -> (usize, usize) {
        (
            self.core.board.count(Color::Black),
            self.core.board.count(Color::White),
        )
    }

    fn score_and_finish(&mut self) {
        let (black, white) = self.counts();
        self.core
            .recorder
            .annotate(format!("final count: Black {} - White {}", black, white));
        let status = if black > white {
            GameStatus::Win(Color::Black)
        } else if white > black {
            GameStatus::Win(Color::White)
        } else {
            GameStatus::Draw
        };
        self.core.finish(status);
    }

    /// Post-commit termination handling: auto-pass a blocked opponent once;
    /// end the game if the original mover is then blocked too.
    fn resolve_turn(&mut self) {
        if Self::has_any_move(&self.core.board, self.core.to_move) {
            return;
        }
        let blocked = self.core.to_move;
        self.consecutive_passes += 1;
        self.core.commit(Move::pass(blocked));
        self.core.switch_side();
        if self.consecutive_passes >= 2 || !Self::has_any_move(&self.core.board, self.core.to_move)
        {
            self.score_and_finish();
        }
    }

    fn recompute_last_flips(&mut self) {
        self.last_flips = self
            .core
            .move_stack
            .iter()
            .rev()
            .find(|m| m.is_place())
            .map(|m| m.flipped.clone())
            .unwrap_or_default();
    }
}

impl Game for ReversiState {
    fn game_type(&self) -> GameType {
        GameType::Reversi
    }

    fn board(&self) -> &Board {
        &self.core.board
    }

    fn current_color(&self) -> Color {
        self.core.to_move
    }

    fn current_player(&self) -> &Player {
        self.core.current_player()
    }

    fn black_player(&self) -> &Player {
        self.core.player(Color::Black)
    }

    fn white_player(&self) -> &Player {
        self.core.player(Color::White)
    }

    fn set_players(&mut self, black: Player, white: Player) {
        self.core.set_players(black, white);
    }

    fn is_over(&self) -> bool {
        self.core.status.is_game_over()
    }

    fn status(&self) -> GameStatus {
        self.core.status
    }

    fn get_legal_moves(&self) -> Vec<Point> {
        if !self.core.can_mutate() {
            return Vec::new();
        }
        let color = self.core.to_move;
        self.core
            .board
            .positions()
            .filter(|p| !Self::flips_for(&self.core.board, color, p.row, p.col).is_empty())
            .collect()
    }

    fn is_legal(&self, row: usize, col: usize) -> bool {
        self.core.can_mutate()
            && !Self::flips_for(&self.core.board, self.core.to_move, row, col).is_empty()
    }

    fn make_move(&mut self, row: usize, col: usize) -> bool {
        if !self.core.can_mutate() {
            return false;
        }
        let mover = self.core.to_move;
        let flips = Self::flips_for(&self.core.board, mover, row, col);
        if flips.is_empty() {
            return false;
        }
        self.core.board.set(row, col, mover);
        for p in &flips {
            self.core.board.set(p.row, p.col, mover);
        }
        self.last_flips = flips.clone();
        let mut mv = Move::place(mover, Point::new(row, col));
        mv.flipped = flips;
        self.core.commit(mv);
        self.consecutive_passes = 0;
        self.core.switch_side();
        self.resolve_turn();
        true
    }

    fn pass(&mut self) -> bool {
        if !self.core.can_mutate() {
            return false;
        }
        let mover = self.core.to_move;
        self.consecutive_passes += 1;
        self.core.commit(Move::pass(mover));
        self.core.switch_side();
        if self.consecutive_passes >= 2 {
            self.score_and_finish();
        }
        true
    }

    fn resign(&mut self, color: Color) -> bool {
        if !self.core.can_mutate() || !color.is_stone() {
            return false;
        }
        self.core.player_mut(color).resign();
        self.core.commit(Move::resign(color));
        let winner = color.opposite();
        self.core.bus.emit(&GameEvent::PlayerResigned {
            player: color,
            winner,
        });
        self.core.finish(GameStatus::Win(winner));
        true
    }

    fn undo(&mut self) -> bool {
        if self.core.is_replay_mode() {
            return false;
        }
        let mv = match self.core.pop_move() {
            Some(mv) => mv,
            None => return false,
        };
        match mv.kind {
            MoveKind::Place(at) => {
                self.core.board.clear(at.row, at.col);
                for p in &mv.flipped {
                    self.core.board.set(p.row, p.col, mv.player.opposite());
                }
                self.core.switch_side();
            }
            MoveKind::Pass => {
                self.core.switch_side();
            }
            MoveKind::Resign => {
                self.core.player_mut(mv.player).clear_resigned();
            }
        }
        self.consecutive_passes = self.core.trailing_passes();
        self.recompute_last_flips();
        true
    }

    fn move_count(&self) -> usize {
        self.core.move_count()
    }

    fn status_text(&self) -> String {
        if !self.core.is_replay_mode() {
            let (black, white) = self.counts();
            return format!("{} [{}:{}]", self.core.status_text(), black, white);
        }
        self.core.status_text()
    }

    fn recorder(&self) -> &GameRecorder {
        &self.core.recorder
    }

    fn annotate(&mut self, text: &str) {
        self.core.recorder.annotate(text);
    }

    fn is_replay_mode(&self) -> bool {
        self.core.is_replay_mode()
    }

    fn set_replay_mode(&mut self, on: bool) {
        self.core.set_replay_mode(on);
    }

    fn set_replay_step(&mut self, step: usize) {
        self.core.set_replay_step(step);
    }

    fn replay_step(&self) -> usize {
        self.core.replay_step()
    }

    fn subscribe(&mut self, listener: Listener) {
        self.core.subscribe(listener);
    }

    fn announce_start(&mut self) {
        self.core.announce_start();
    }
}
