//! The rule cores for the supported variants.
//!
//! Each variant implements the [`crate::game::Game`] trait over a shared
//! [`core::GameCore`]; callers normally hold them through
//! [`crate::game_wrapper::GameWrapper`] rather than the concrete types.

pub mod core;
pub mod go;
pub mod gomoku;
pub mod reversi;

pub use go::GoState;
pub use gomoku::GomokuState;
pub use reversi::{ReversiState, REVERSI_BOARD_SIZE};
