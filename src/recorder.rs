//! # Recorder Module - Append-only Game Log
//!
//! Every live game owns one [`GameRecorder`]. The recorder receives each
//! accepted move (with its number assigned here), keeps sparse board
//! snapshots to bound replay reconstruction cost, collects timestamped
//! annotations, and tracks start and end times. It never references the
//! game back; moves and boards arrive as parameters.
//!
//! Snapshot policy: the initial board is always kept; after appending move
//! `n`, the board is snapshotted when `n` is a multiple of the configured
//! stride or while `n < 20` (early game, where re-application would be
//! cheap anyway but seeking is frequent).
//!
//! Undo pops the log too, so the round-trip invariant holds: replaying the
//! log from the initial board always reproduces the live board.

use crate::board::{Board, Color};
use crate::moves::Move;
use std::time::{Duration, SystemTime};

/// Free-form note with the wall-clock time it was added.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub text: String,
    pub timestamp: SystemTime,
}

/// Append-only log of one game: moves, sparse snapshots, annotations,
/// start/end times.
#[derive(Debug, Clone)]
pub struct GameRecorder {
    initial_board: Board,
    first_player: Color,
    moves: Vec<Move>,
    /// `(k, board)` pairs: the board after the first `k` moves; ascending.
    snapshots: Vec<(usize, Board)>,
    annotations: Vec<Annotation>,
    start_time: SystemTime,
    end_time: Option<SystemTime>,
    snapshot_stride: usize,
}

impl GameRecorder {
    /// Starts a recorder from the given initial position.
    pub fn new(initial_board: Board, first_player: Color, snapshot_stride: usize) -> Self {
        assert!(snapshot_stride > 0, "snapshot stride must be positive");
        GameRecorder {
            initial_board,
            first_player,
            moves: Vec::new(),
            snapshots: Vec::new(),
            annotations: Vec::new(),
            start_time: SystemTime::now(),
            end_time: None,
            snapshot_stride,
        }
    }

    /// Appends an accepted move, assigning its 1-based number, and snapshots
    /// the given post-move board when the policy calls for it.
    pub fn record_move(&mut self, mut mv: Move, board_after: &Board) {
        mv.number = self.moves.len() + 1;
        self.moves.push(mv);
        let n = self.moves.len();
        if n % self.snapshot_stride == 0 || n < 20 {
            self.snapshots.push((n, board_after.clone()));
        }
    }

    /// Removes the most recent move, dropping any snapshot taken at or past
    /// it and reopening the log if the game had ended.
    pub fn pop_move(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        let n = self.moves.len();
        self.snapshots.retain(|(k, _)| *k <= n);
        self.end_time = None;
        Some(mv)
    }

    /// Adds a timestamped free-form note.
    pub fn annotate(&mut self, text: impl Into<String>) {
        self.annotations.push(Annotation {
            text: text.into(),
            timestamp: SystemTime::now(),
        });
    }

    /// Marks the game finished, freezing the duration.
    pub fn record_game_end(&mut self) {
        self.end_time = Some(SystemTime::now());
    }

    pub fn is_ended(&self) -> bool {
        self.end_time.is_some()
    }

    pub fn total_moves(&self) -> usize {
        self.moves.len()
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// The `i`-th move, 0-based.
    pub fn get_move(&self, i: usize) -> Option<&Move> {
        self.moves.get(i)
    }

    pub fn initial_board(&self) -> &Board {
        &self.initial_board
    }

    pub fn first_player(&self) -> Color {
        self.first_player
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// The stored board after exactly `k` moves, if one was snapshotted.
    pub fn snapshot_at(&self, k: usize) -> Option<&Board> {
        if k == 0 {
            return Some(&self.initial_board);
        }
        self.snapshots
            .iter()
            .find(|(n, _)| *n == k)
            .map(|(_, b)| b)
    }

    /// The latest stored snapshot at or before `k` moves, falling back to
    /// the initial board. Returns the snapshot's move index and board.
    pub fn nearest_snapshot(&self, k: usize) -> (usize, &Board) {
        self.snapshots
            .iter()
            .rev()
            .find(|(n, _)| *n <= k)
            .map(|(n, b)| (*n, b))
            .unwrap_or((0, &self.initial_board))
    }

    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    pub fn end_time(&self) -> Option<SystemTime> {
        self.end_time
    }

    /// Elapsed time from start to end, or to now for a live game.
    pub fn duration(&self) -> Duration {
        let end = self.end_time.unwrap_or_else(SystemTime::now);
        end.duration_since(self.start_time).unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Point;

    fn recorder() -> GameRecorder {
        GameRecorder::new(Board::new(8), Color::Black, 10)
    }

    fn place(r: usize, c: usize, color: Color) -> Move {
        Move::place(color, Point::new(r, c))
    }

    #[test]
    fn test_move_numbering() {
        let mut rec = recorder();
        let board = Board::new(8);
        rec.record_move(place(0, 0, Color::Black), &board);
        rec.record_move(place(0, 1, Color::White), &board);
        assert_eq!(rec.total_moves(), 2);
        assert_eq!(rec.get_move(0).unwrap().number, 1);
        assert_eq!(rec.get_move(1).unwrap().number, 2);
    }

    #[test]
    fn test_snapshot_policy_early_and_stride() {
        let mut rec = recorder();
        let board = Board::new(8);
        let mut color = Color::Black;
        for i in 0..25 {
            rec.record_move(place(i / 8, i % 8, color), &board);
            color = color.opposite();
        }
        // Every early move is snapshotted, then only stride multiples.
        for k in 1..20 {
            assert!(rec.snapshot_at(k).is_some(), "missing snapshot at {}", k);
        }
        assert!(rec.snapshot_at(20).is_some());
        assert!(rec.snapshot_at(21).is_none());
        assert!(rec.snapshot_at(25).is_none());
    }

    #[test]
    fn test_nearest_snapshot_fallback() {
        let mut rec = recorder();
        let board = Board::new(8);
        assert_eq!(rec.nearest_snapshot(0).0, 0);

        let mut color = Color::Black;
        for i in 0..23 {
            rec.record_move(place(i / 8, i % 8, color), &board);
            color = color.opposite();
        }
        assert_eq!(rec.nearest_snapshot(23).0, 20);
        assert_eq!(rec.nearest_snapshot(19).0, 19);
    }

    #[test]
    fn test_pop_move_truncates_snapshots_and_reopens() {
        let mut rec = recorder();
        let board = Board::new(8);
        rec.record_move(place(0, 0, Color::Black), &board);
        rec.record_move(place(0, 1, Color::White), &board);
        rec.record_game_end();
        assert!(rec.is_ended());

        let popped = rec.pop_move().unwrap();
        assert_eq!(popped.number, 2);
        assert_eq!(rec.total_moves(), 1);
        assert!(rec.snapshot_at(2).is_none());
        assert!(rec.snapshot_at(1).is_some());
        assert!(!rec.is_ended());
    }

    #[test]
    fn test_annotations() {
        let mut rec = recorder();
        rec.annotate("game started");
        rec.annotate("black is ahead");
        assert_eq!(rec.annotations().len(), 2);
        assert_eq!(rec.annotations()[0].text, "game started");
    }

    #[test]
    fn test_duration_is_monotonic() {
        let mut rec = recorder();
        let before = rec.duration();
        rec.record_game_end();
        assert!(rec.duration() >= before);
    }
}
