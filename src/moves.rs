//! # Move Module - Recorded Actions
//!
//! A [`Move`] is the unit the recorder stores and the rule cores stack for
//! undo. Besides the action itself (placement, pass, or resignation) it
//! carries the mover, a 1-based sequence number assigned at record time, a
//! wall-clock timestamp, and the board diff the move produced: the cells it
//! captured (Go, stones removed) and the cells it flipped (Reversi, stones
//! recolored). The diff is what undo inverts and replay re-applies, so no
//! variant ever needs bespoke reconstruction code.

use crate::board::{Color, Point};
use std::fmt;
use std::time::SystemTime;

/// The action a move performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// A stone placed at the contained coordinate.
    Place(Point),
    /// A turn given up without placement.
    Pass,
    /// The mover concedes the game.
    Resign,
}

/// One recorded action with its bookkeeping and board diff.
#[derive(Debug, Clone)]
pub struct Move {
    /// Side that performed the action.
    pub player: Color,
    pub kind: MoveKind,
    /// 1-based sequence number; 0 until the recorder assigns it.
    pub number: usize,
    pub timestamp: SystemTime,
    /// Stones of the opposing color removed by this move (Go captures).
    pub captured: Vec<Point>,
    /// Stones of the opposing color recolored to `player` (Reversi flips).
    pub flipped: Vec<Point>,
}

impl Move {
    /// A placement at `at` by `player`, with an empty diff.
    pub fn place(player: Color, at: Point) -> Self {
        Move {
            player,
            kind: MoveKind::Place(at),
            number: 0,
            timestamp: SystemTime::now(),
            captured: Vec::new(),
            flipped: Vec::new(),
        }
    }

    /// A pass by `player`.
    pub fn pass(player: Color) -> Self {
        Move {
            player,
            kind: MoveKind::Pass,
            number: 0,
            timestamp: SystemTime::now(),
            captured: Vec::new(),
            flipped: Vec::new(),
        }
    }

    /// A resignation by `player`.
    pub fn resign(player: Color) -> Self {
        Move {
            player,
            kind: MoveKind::Resign,
            number: 0,
            timestamp: SystemTime::now(),
            captured: Vec::new(),
            flipped: Vec::new(),
        }
    }

    /// True for a placement.
    pub fn is_place(&self) -> bool {
        matches!(self.kind, MoveKind::Place(_))
    }

    pub fn is_pass(&self) -> bool {
        self.kind == MoveKind::Pass
    }

    pub fn is_resign(&self) -> bool {
        self.kind == MoveKind::Resign
    }

    /// The placement coordinate, if this is a placement.
    pub fn at(&self) -> Option<Point> {
        match self.kind {
            MoveKind::Place(p) => Some(p),
            _ => None,
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Place(p) => write!(f, "{}", p),
            MoveKind::Pass => write!(f, "pass"),
            MoveKind::Resign => write!(f, "resign"),
        }
    }
}

impl fmt::Display for Move {
    /// Formats moves for history listings, e.g. `Black (7,7)` or `White pass`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.player, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_constructor() {
        let mv = Move::place(Color::Black, Point::new(7, 7));
        assert!(mv.is_place());
        assert!(!mv.is_pass());
        assert_eq!(mv.at(), Some(Point::new(7, 7)));
        assert_eq!(mv.number, 0);
        assert!(mv.captured.is_empty());
        assert!(mv.flipped.is_empty());
    }

    #[test]
    fn test_pass_and_resign() {
        let pass = Move::pass(Color::White);
        assert!(pass.is_pass());
        assert_eq!(pass.at(), None);

        let resign = Move::resign(Color::Black);
        assert!(resign.is_resign());
        assert_eq!(resign.player, Color::Black);
    }

    #[test]
    fn test_display() {
        let mv = Move::place(Color::Black, Point::new(1, 2));
        assert_eq!(format!("{}", mv), "Black (1,2)");
        assert_eq!(format!("{}", Move::pass(Color::White)), "White pass");
        assert_eq!(format!("{}", Move::resign(Color::Black)), "Black resign");
    }
}
