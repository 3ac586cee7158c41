//! Shared bookkeeping for the three rule cores.
//!
//! Every variant owns a [`GameCore`]: board, players, side to move, move
//! stack, outcome, recorder, replay plumbing, and the event bus. The rule
//! logic itself stays in the variant modules; this struct only provides the
//! operations they all perform the same way (committing an accepted move,
//! finishing the game, switching sides, replay seeking, status text).

use crate::board::{Board, Color};
use crate::events::{EventBus, GameEvent, Listener};
use crate::game::GameStatus;
use crate::moves::Move;
use crate::player::Player;
use crate::recorder::GameRecorder;
use crate::replay::board_at;

/// State common to all variants. Fields are crate-visible so the rule cores
/// can reach them directly; external callers go through the `Game` trait.
#[derive(Debug, Clone)]
pub struct GameCore {
    pub(crate) board: Board,
    pub(crate) black: Player,
    pub(crate) white: Player,
    pub(crate) to_move: Color,
    pub(crate) move_stack: Vec<Move>,
    pub(crate) status: GameStatus,
    pub(crate) recorder: GameRecorder,
    replay_mode: bool,
    replay_step: usize,
    /// Live board stashed while replay mode drives the visible board.
    live_board: Option<Board>,
    pub(crate) bus: EventBus,
}

impl GameCore {
    /// Starts a core from the given initial position; Black moves first.
    pub fn new(board: Board, snapshot_stride: usize) -> Self {
        let recorder = GameRecorder::new(board.clone(), Color::Black, snapshot_stride);
        GameCore {
            board,
            black: Player::new("Black", Color::Black),
            white: Player::new("White", Color::White),
            to_move: Color::Black,
            move_stack: Vec::new(),
            status: GameStatus::InProgress,
            recorder,
            replay_mode: false,
            replay_step: 0,
            live_board: None,
            bus: EventBus::new(),
        }
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            _ => &self.black,
        }
    }

    pub fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            _ => &mut self.black,
        }
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.to_move)
    }

    pub fn set_players(&mut self, black: Player, white: Player) {
        assert_eq!(black.color(), Color::Black, "black player must play Black");
        assert_eq!(white.color(), Color::White, "white player must play White");
        self.black = black;
        self.white = white;
    }

    /// True while moves may be accepted: live game, not in replay mode.
    pub fn can_mutate(&self) -> bool {
        !self.replay_mode && !self.status.is_game_over()
    }

    pub fn switch_side(&mut self) {
        self.to_move = self.to_move.opposite();
    }

    /// Records an accepted move and notifies listeners. The recorder assigns
    /// the 1-based move number; the stacked copy carries it too.
    pub fn commit(&mut self, mut mv: Move) {
        self.recorder.record_move(mv.clone(), &self.board);
        mv.number = self.recorder.total_moves();
        self.move_stack.push(mv.clone());
        self.bus.emit(&GameEvent::MoveMade { mv });
    }

    /// Terminates the game: freezes the recorder, notes the result, and
    /// emits `GameEnded`.
    pub fn finish(&mut self, status: GameStatus) {
        debug_assert!(status.is_game_over());
        self.status = status;
        let text = match status.winner() {
            Some(color) => format!("result: {} wins", self.player(color)),
            None => "result: draw".to_string(),
        };
        self.recorder.annotate(text);
        self.recorder.record_game_end();
        self.bus.emit(&GameEvent::GameEnded {
            winner: status.winner(),
        });
    }

    /// Pops the last move from both the stack and the recorder, reopening
    /// the game if it had ended.
    pub fn pop_move(&mut self) -> Option<Move> {
        let mv = self.move_stack.pop()?;
        let recorded = self.recorder.pop_move();
        debug_assert!(recorded.is_some());
        self.status = GameStatus::InProgress;
        Some(mv)
    }

    pub fn move_count(&self) -> usize {
        self.move_stack.len()
    }

    /// Number of passes at the top of the move stack; Go and Reversi
    /// recompute their consecutive-pass counters from this after undo.
    pub fn trailing_passes(&self) -> u32 {
        self.move_stack
            .iter()
            .rev()
            .take_while(|m| m.is_pass())
            .count() as u32
    }

    pub fn status_text(&self) -> String {
        if self.replay_mode {
            return format!(
                "Replay: step {}/{}",
                self.replay_step,
                self.recorder.total_moves()
            );
        }
        match self.status {
            GameStatus::InProgress => format!("{} to move", self.current_player()),
            GameStatus::Win(color) => format!("{} wins", self.player(color)),
            GameStatus::Draw => "Draw".to_string(),
        }
    }

    pub fn is_replay_mode(&self) -> bool {
        self.replay_mode
    }

    pub fn replay_step(&self) -> usize {
        self.replay_step
    }

    /// Entering stashes the live board and rewinds the visible board to
    /// step 0; leaving restores the live board.
    pub fn set_replay_mode(&mut self, on: bool) {
        if on == self.replay_mode {
            return;
        }
        if on {
            self.live_board = Some(self.board.clone());
            self.replay_step = 0;
            self.board = board_at(&self.recorder, 0);
        } else if let Some(live) = self.live_board.take() {
            self.board = live;
        }
        self.replay_mode = on;
    }

    /// Seeks the visible board; ignored outside replay mode.
    pub fn set_replay_step(&mut self, step: usize) {
        if !self.replay_mode {
            return;
        }
        let step = step.min(self.recorder.total_moves());
        self.replay_step = step;
        self.board = board_at(&self.recorder, step);
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.bus.subscribe(listener);
    }

    pub fn announce_start(&mut self) {
        self.recorder.annotate(format!(
            "game started: {} vs {}",
            self.black, self.white
        ));
        self.bus.emit(&GameEvent::GameStarted {
            black: self.black.name().to_string(),
            white: self.white.name().to_string(),
        });
    }
}
