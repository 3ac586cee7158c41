//! # Replay Module - Board Reconstruction and Playback
//!
//! Reconstruction turns a recorder's log back into the board after any
//! number of moves. The transcript is trusted: it was produced by the same
//! rule core that played the game, and every placement carries its capture
//! and flip diffs, so re-application is pure cell arithmetic and identical
//! for all variants. Snapshots bound the work to at most one stride of
//! moves.
//!
//! [`ReplayController`] is the cursor a front-end drives: manual stepping,
//! absolute seeks, and timer-driven auto-advance on a background ticker
//! that honors a shared stop flag and stops at end-of-log.

use crate::board::Board;
use crate::moves::MoveKind;
use crate::recorder::GameRecorder;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Default delay between auto-advanced replay steps.
pub const DEFAULT_PLAYBACK_DELAY_MS: u64 = 1000;

/// Rebuilds the board as it stood after the first `step` moves.
///
/// Starts from the nearest stored snapshot at or before `step` and
/// re-applies the remaining moves from their recorded diffs: a placement
/// sets the mover's stone, clears its captured cells, and recolors its
/// flipped cells; passes and resignations leave the board untouched.
///
/// `step` must not exceed the recorded total; callers clamp first.
pub fn board_at(recorder: &GameRecorder, step: usize) -> Board {
    assert!(
        step <= recorder.total_moves(),
        "replay step {} beyond recorded total {}",
        step,
        recorder.total_moves()
    );
    let (base, snapshot) = recorder.nearest_snapshot(step);
    let mut board = snapshot.clone();
    for mv in &recorder.moves()[base..step] {
        if let MoveKind::Place(at) = mv.kind {
            board.set(at.row, at.col, mv.player);
            for p in &mv.captured {
                board.clear(p.row, p.col);
            }
            for p in &mv.flipped {
                board.set(p.row, p.col, mv.player);
            }
        }
    }
    board
}

/// Cursor over a recorded game, with optional timer-driven playback.
///
/// The controller does not hold the game; it tracks a step position and
/// hands out step numbers. The consumer applies each step via
/// `set_replay_step` and mirrors it back with [`ReplayController::go_to`].
#[derive(Debug)]
pub struct ReplayController {
    current: usize,
    total: usize,
    delay: Duration,
    playing: Arc<AtomicBool>,
    ticker: Option<JoinHandle<()>>,
}

impl ReplayController {
    /// A cursor at step 0 over `total` recorded moves.
    pub fn new(total: usize) -> Self {
        ReplayController {
            current: 0,
            total,
            delay: Duration::from_millis(DEFAULT_PLAYBACK_DELAY_MS),
            playing: Arc::new(AtomicBool::new(false)),
            ticker: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_steps(&self) -> usize {
        self.total
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::SeqCst)
    }

    /// Advances one step. Returns false at end-of-log.
    pub fn next_step(&mut self) -> bool {
        if self.current < self.total {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Steps back once. Returns false at the start.
    pub fn previous_step(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Seeks to `step`, clamped to `[0, total]`.
    pub fn go_to(&mut self, step: usize) {
        self.current = step.min(self.total);
    }

    pub fn go_to_start(&mut self) {
        self.current = 0;
    }

    pub fn go_to_end(&mut self) {
        self.current = self.total;
    }

    /// Human-readable position, e.g. `step 7/20`.
    pub fn progress(&self) -> String {
        format!("step {}/{}", self.current, self.total)
    }

    /// Starts auto-advance from the current position.
    ///
    /// A ticker thread emits each successive step number after the
    /// configured delay until the end of the log, a [`Self::pause`], or the
    /// receiver being dropped. The returned channel yields the steps; the
    /// consumer applies them and mirrors its position with
    /// [`Self::go_to`].
    pub fn play(&mut self) -> Receiver<usize> {
        self.pause();
        let (tx, rx) = mpsc::channel();
        self.playing.store(true, Ordering::SeqCst);
        let playing = Arc::clone(&self.playing);
        let delay = self.delay;
        let from = self.current + 1;
        let total = self.total;
        self.ticker = Some(thread::spawn(move || {
            for step in from..=total {
                thread::sleep(delay);
                if !playing.load(Ordering::SeqCst) {
                    break;
                }
                if tx.send(step).is_err() {
                    break;
                }
            }
            playing.store(false, Ordering::SeqCst);
        }));
        rx
    }

    /// Stops auto-advance and joins the ticker.
    pub fn pause(&mut self) {
        self.playing.store(false, Ordering::SeqCst);
        if let Some(handle) = self.ticker.take() {
            let _ = handle.join();
        }
    }

    /// Stops playback and rewinds to the start.
    pub fn stop(&mut self) {
        self.pause();
        self.current = 0;
    }
}

impl Drop for ReplayController {
    fn drop(&mut self) {
        self.pause();
    }
}
