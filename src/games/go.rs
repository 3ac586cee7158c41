//! Go rule core: liberties, captures, suicide, ko, and the simplified
//! territory scorer.
//!
//! Legality is decided on a working copy of the board: place the stone,
//! capture any newly surrounded opponent groups, then reject if the placed
//! stone's own group is left without a liberty (suicide). A single-stone
//! capture bars the opponent from immediate recapture at the freed cell
//! (ko). Two consecutive passes end the game and invoke the scorer.
//!
//! Scoring is deliberately simplified: occupied cells score for their
//! color; an empty cell scores for color `C` when every non-empty
//! 4-neighbor is `C` (an empty cell with no stone neighbor at all is
//! neutral). White receives komi. This is not standard area or territory
//! scoring.

use crate::board::{Board, Color, Point};
use crate::config::EngineConfig;
use crate::events::{GameEvent, Listener};
use crate::game::{Game, GameStatus, GameType};
use crate::games::core::GameCore;
use crate::moves::{Move, MoveKind};
use crate::player::Player;
use crate::recorder::GameRecorder;

#[derive(Debug, Clone)]
pub struct GoState {
    core: GameCore,
    consecutive_passes: u32,
    /// Cell forbidden to the named color (the side that just lost a single
    /// stone there). The capturer itself may still fill the point.
    ko: Option<(Point, Color)>,
    komi: f64,
}

/// A flood-filled group and the number of distinct empty cells adjacent
/// to it.
fn group_with_liberties(board: &Board, start: Point) -> (Vec<Point>, usize) {
    let size = board.size();
    let color = board.get(start.row, start.col);
    debug_assert!(color.is_stone());

    let mut member = vec![false; size * size];
    let mut liberty = vec![false; size * size];
    let mut liberties = 0;
    let mut stones = Vec::new();
    let mut stack = vec![start];
    member[start.row * size + start.col] = true;

    while let Some(p) = stack.pop() {
        stones.push(p);
        for n in board.neighbors4(p.row, p.col) {
            let idx = n.row * size + n.col;
            match board.get(n.row, n.col) {
                c if c == color => {
                    if !member[idx] {
                        member[idx] = true;
                        stack.push(n);
                    }
                }
                Color::Empty => {
                    if !liberty[idx] {
                        liberty[idx] = true;
                        liberties += 1;
                    }
                }
                _ => {}
            }
        }
    }
    (stones, liberties)
}

impl GoState {
    pub fn new(config: &EngineConfig) -> Self {
        GoState {
            core: GameCore::new(
                Board::new(config.go.board_size),
                config.recorder.snapshot_stride,
            ),
            consecutive_passes: 0,
            ko: None,
            komi: config.go.komi,
        }
    }

    pub fn komi(&self) -> f64 {
        self.komi
    }

    pub fn ko_point(&self) -> Option<Point> {
        self.ko.map(|(p, _)| p)
    }

    /// Runs the legal-move predicate for the side to move at `(row, col)`.
    /// On success returns the post-move board and the captured stones.
    fn try_place(&self, row: usize, col: usize) -> Option<(Board, Vec<Point>)> {
        if !self.core.board.is_inside(row, col) || !self.core.board.is_empty(row, col) {
            return None;
        }
        let mover = self.core.to_move;
        if self.ko == Some((Point::new(row, col), mover)) {
            return None;
        }

        let mut work = self.core.board.clone();
        work.set(row, col, mover);

        // Capture any opponent group left without liberties.
        let mut captured = Vec::new();
        for n in work.neighbors4(row, col) {
            if work.get(n.row, n.col) != mover.opposite() {
                continue;
            }
            let (stones, liberties) = group_with_liberties(&work, n);
            if liberties == 0 {
                for p in &stones {
                    work.clear(p.row, p.col);
                }
                captured.extend(stones);
            }
        }

        // Suicide: the placed stone's own group must breathe.
        let (_, own_liberties) = group_with_liberties(&work, Point::new(row, col));
        if own_liberties == 0 {
            return None;
        }
        Some((work, captured))
    }

    /// Simplified territory scores as `(black, white)`; komi already added
    /// to White.
    pub fn scores(&self) -> (f64, f64) {
        let board = &self.core.board;
        let mut black = 0.0;
        let mut white = 0.0;
        for p in board.positions() {
            match board.get(p.row, p.col) {
                Color::Black => black += 1.0,
                Color::White => white += 1.0,
                Color::Empty => {
                    let mut owner = Color::Empty;
                    let mut contested = false;
                    for n in board.neighbors4(p.row, p.col) {
                        let c = board.get(n.row, n.col);
                        if !c.is_stone() {
                            continue;
                        }
                        if owner == Color::Empty {
                            owner = c;
                        } else if owner != c {
                            contested = true;
                            break;
                        }
                    }
                    if !contested {
                        match owner {
                            Color::Black => black += 1.0,
                            Color::White => white += 1.0,
                            Color::Empty => {} // no stone neighbor: neutral
                        }
                    }
                }
            }
        }
        (black, white + self.komi)
    }

    fn score_and_finish(&mut self) {
        let (black, white) = self.scores();
        self.core.recorder.annotate(format!(
            "final score: Black {:.1} - White {:.1} (komi {:.1})",
            black, white, self.komi
        ));
        let status = if black > white {
            GameStatus::Win(Color::Black)
        } else if white > black {
            GameStatus::Win(Color::White)
        } else {
            GameStatus::Draw
        };
        self.core.finish(status);
    }

    /// The ko implied by the move stack: the captured cell of the latest
    /// remaining placement, when it captured exactly one stone, barred to
    /// the capturer's opponent.
    fn recompute_ko(&mut self) {
        self.ko = self
            .core
            .move_stack
            .iter()
            .rev()
            .find(|m| m.is_place())
            .and_then(|m| {
                if m.captured.len() == 1 {
                    Some((m.captured[0], m.player.opposite()))
                } else {
                    None
                }
            });
    }
}

impl Game for GoState {
    fn game_type(&self) -> GameType {
        GameType::Go
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
            .filter(|p| self.try_place(p.row, p.col).is_some())
            .collect()
    }

    fn is_legal(&self, row: usize, col: usize) -> bool {
        self.core.can_mutate() && self.try_place(row, col).is_some()
    }

    fn make_move(&mut self, row: usize, col: usize) -> bool {
        if !self.core.can_mutate() {
            return false;
        }
        let (board, captured) = match self.try_place(row, col) {
            Some(result) => result,
            None => return false,
        };
        let mover = self.core.to_move;
        self.core.board = board;
        self.ko = if captured.len() == 1 {
            Some((captured[0], mover.opposite()))
        } else {
            None
        };
        let mut mv = Move::place(mover, Point::new(row, col));
        mv.captured = captured;
        self.core.commit(mv);
        self.consecutive_passes = 0;
        self.core.switch_side();
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
                for p in &mv.captured {
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
        self.recompute_ko();
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
