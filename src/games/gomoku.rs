//! Gomoku (five-in-a-row) rule core.
//!
//! Variable board size in 8..=19. No pass. A placement wins when it
//! completes five or more contiguous same-color stones on any of the four
//! axes through the placed cell; a full board without a winner is a draw.

use crate::board::{Board, Color, Point};
use crate::config::EngineConfig;
use crate::events::{GameEvent, Listener};
use crate::game::{Game, GameStatus, GameType};
use crate::games::core::GameCore;
use crate::moves::{Move, MoveKind};
use crate::player::Player;
use crate::recorder::GameRecorder;

/// Stones in a row required to win.
const WIN_LENGTH: usize = 5;

/// The four scan axes: horizontal, vertical, both diagonals.
const AXES: [(i32, i32); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Debug, Clone)]
pub struct GomokuState {
    core: GameCore,
}

impl GomokuState {
    pub fn new(config: &EngineConfig) -> Self {
        GomokuState {
            core: GameCore::new(
                Board::new(config.gomoku.board_size),
                config.recorder.snapshot_stride,
            ),
        }
    }

    /// Longest contiguous run of `color` through `(row, col)` over all axes.
    fn longest_run(board: &Board, row: usize, col: usize, color: Color) -> usize {
        let mut best = 0;
        for (dr, dc) in AXES {
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
            best = best.max(count);
        }
        best
    }
}

impl Game for GomokuState {
    fn game_type(&self) -> GameType {
        GameType::Gomoku
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
        self.core
            .board
            .positions()
            .filter(|p| self.core.board.is_empty(p.row, p.col))
            .collect()
    }

    fn is_legal(&self, row: usize, col: usize) -> bool {
        self.core.can_mutate()
            && self.core.board.is_inside(row, col)
            && self.core.board.is_empty(row, col)
    }

    fn make_move(&mut self, row: usize, col: usize) -> bool {
        if !self.is_legal(row, col) {
            return false;
        }
        let mover = self.core.to_move;
        self.core.board.set(row, col, mover);
        self.core.commit(Move::place(mover, Point::new(row, col)));

        if Self::longest_run(&self.core.board, row, col, mover) >= WIN_LENGTH {
            self.core.finish(GameStatus::Win(mover));
        } else if self.core.board.is_full() {
            self.core.finish(GameStatus::Draw);
        } else {
            self.core.switch_side();
        }
        true
    }

    /// Gomoku has no pass.
    fn pass(&mut self) -> bool {
        false
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
        let was_over = self.is_over();
        let mv = match self.core.pop_move() {
            Some(mv) => mv,
            None => return false,
        };
        match mv.kind {
            MoveKind::Place(at) => {
                self.core.board.clear(at.row, at.col);
                // A winning or board-filling placement never switched sides.
                if !was_over {
                    self.core.switch_side();
                }
            }
            MoveKind::Resign => {
                // Restore the exact pre-resign state; resign never switched
                // sides, so only the flag and the outcome roll back.
                self.core.player_mut(mv.player).clear_resigned();
            }
            MoveKind::Pass => unreachable!("gomoku never records a pass"),
        }
        true
    }

    fn move_count(&self) -> usize {
        self.core.move_count()
    }

    fn status_text(&self) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GomokuState {
        GomokuState::new(&EngineConfig::default())
    }

    #[test]
    fn test_first_move_is_black() {
        let mut game = game();
        assert_eq!(game.current_color(), Color::Black);
        assert!(game.make_move(7, 7));
        assert_eq!(game.board().get(7, 7), Color::Black);
        assert_eq!(game.current_color(), Color::White);
    }

    #[test]
    fn test_occupied_cell_rejected() {
        let mut game = game();
        assert!(game.make_move(7, 7));
        assert!(!game.make_move(7, 7));
        assert_eq!(game.current_color(), Color::White);
    }

    #[test]
    fn test_pass_always_rejected() {
        let mut game = game();
        assert!(!game.pass());
        assert_eq!(game.current_color(), Color::Black);
    }

    #[test]
    fn test_vertical_five_wins() {
        let mut game = game();
        for i in 0..4 {
            assert!(game.make_move(3 + i, 3)); // black
            assert!(game.make_move(0, i)); // white
        }
        assert!(game.make_move(7, 3));
        assert!(game.is_over());
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn test_diagonal_five_wins() {
        let mut game = game();
        for i in 0..4 {
            assert!(game.make_move(3 + i, 3 + i));
            assert!(game.make_move(0, i));
        }
        assert!(game.make_move(7, 7));
        assert_eq!(game.winner(), Some(Color::Black));
    }

    #[test]
    fn test_four_in_a_row_is_not_a_win() {
        let mut game = game();
        for i in 0..4 {
            assert!(game.make_move(3, 3 + i));
            if i < 3 {
                assert!(game.make_move(10, i));
            }
        }
        assert!(!game.is_over());
    }

    #[test]
    fn test_no_moves_after_win() {
        let mut game = game();
        for i in 0..4 {
            game.make_move(7, 3 + i);
            game.make_move(0, i);
        }
        game.make_move(7, 7);
        assert!(game.is_over());
        assert!(!game.make_move(10, 10));
        assert!(game.get_legal_moves().is_empty());
    }

    #[test]
    fn test_undo_place() {
        let mut game = game();
        game.make_move(7, 7);
        game.make_move(8, 8);
        assert!(game.undo());
        assert!(game.board().is_empty(8, 8));
        assert_eq!(game.current_color(), Color::White);
        assert_eq!(game.move_count(), 1);
    }

    #[test]
    fn test_undo_winning_move_reopens() {
        let mut game = game();
        for i in 0..4 {
            game.make_move(7, 3 + i);
            game.make_move(0, i);
        }
        game.make_move(7, 7);
        assert!(game.is_over());

        assert!(game.undo());
        assert!(!game.is_over());
        assert!(game.board().is_empty(7, 7));
        // The mover never switched out on the winning move.
        assert_eq!(game.current_color(), Color::Black);
    }

    #[test]
    fn test_undo_resign_restores_pre_resign_state() {
        let mut game = game();
        game.make_move(7, 7);
        assert!(game.resign(Color::White));
        assert!(game.is_over());
        assert!(game.white_player().has_resigned());

        assert!(game.undo());
        assert!(!game.is_over());
        assert!(!game.white_player().has_resigned());
        assert_eq!(game.current_color(), Color::White);
        assert_eq!(game.winner(), None);
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut game = game();
        assert!(!game.undo());
    }
}
