//! Player identity: a display name, the color played, and a resigned flag.

use crate::board::Color;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    color: Color,
    resigned: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        assert!(color.is_stone(), "a player must be Black or White");
        Player {
            name: name.into(),
            color,
            resigned: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn has_resigned(&self) -> bool {
        self.resigned
    }

    pub fn resign(&mut self) {
        self.resigned = true;
    }

    /// Rescinds a resignation, used when undo rolls a resign move back.
    pub fn clear_resigned(&mut self) {
        self.resigned = false;
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.color)
    }
}
