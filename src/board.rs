//! # Board Module - Grid Primitives
//!
//! The square grid shared by every game variant, together with the `Color`
//! occupancy value and the `Point` coordinate pair. The board is a plain
//! value type: cloning it yields a fully independent copy, which is what
//! makes cheap search rollouts and snapshots possible.
//!
//! Cells are stored in a single contiguous vector indexed by
//! `row * size + col`; there is no per-cell allocation and no hashing.

use std::fmt;
use std::str::FromStr;

/// Smallest supported board edge length.
pub const MIN_BOARD_SIZE: usize = 8;
/// Largest supported board edge length.
pub const MAX_BOARD_SIZE: usize = 19;

/// Occupancy of a single cell, also used to identify the two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Empty,
    Black,
    White,
}

impl Color {
    /// Returns the opposing color. `Empty` has no opponent and maps to itself.
    pub fn opposite(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            Color::Empty => Color::Empty,
        }
    }

    /// Returns true for `Black` and `White`, false for `Empty`.
    pub fn is_stone(self) -> bool {
        self != Color::Empty
    }

    /// Single-glyph representation used by the terminal renderers.
    pub fn symbol(self) -> &'static str {
        match self {
            Color::Black => "●",
            Color::White => "○",
            Color::Empty => "·",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
            Color::Empty => write!(f, "Empty"),
        }
    }
}

/// A `(row, col)` coordinate on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub fn new(row: usize, col: usize) -> Self {
        Point { row, col }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

impl FromStr for Point {
    type Err = String;

    /// Parses `"row,col"` (whitespace around either number is tolerated).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 2 {
            return Err(format!("invalid coordinate '{}', expected 'row,col'", s));
        }
        let row = parts[0]
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid row in '{}'", s))?;
        let col = parts[1]
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid col in '{}'", s))?;
        Ok(Point { row, col })
    }
}

/// A square grid of cells with value semantics.
///
/// Construction validates the edge length against
/// [`MIN_BOARD_SIZE`]..=[`MAX_BOARD_SIZE`]; a size outside that range is a
/// programmer error and panics. All cell accessors expect in-bounds
/// coordinates; use [`Board::is_inside`] or [`Board::offset`] when stepping
/// from caller input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Color>,
}

impl Board {
    /// Creates an empty board of the given edge length.
    pub fn new(size: usize) -> Self {
        assert!(
            (MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&size),
            "board size {} outside supported range {}..={}",
            size,
            MIN_BOARD_SIZE,
            MAX_BOARD_SIZE
        );
        Board {
            size,
            cells: vec![Color::Empty; size * size],
        }
    }

    /// Edge length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.size && col < self.size);
        row * self.size + col
    }

    /// Returns the color at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Color {
        self.cells[self.idx(row, col)]
    }

    /// Sets the color at `(row, col)`.
    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        let i = self.idx(row, col);
        self.cells[i] = color;
    }

    /// Resets `(row, col)` to empty.
    pub fn clear(&mut self, row: usize, col: usize) {
        self.set(row, col, Color::Empty);
    }

    /// True when `(row, col)` lies on the board.
    pub fn is_inside(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// True when `(row, col)` holds no stone.
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Color::Empty
    }

    /// Steps from `(row, col)` by a signed delta, returning the target point
    /// if it stays on the board.
    pub fn offset(&self, row: usize, col: usize, dr: i32, dc: i32) -> Option<Point> {
        let r = row as i32 + dr;
        let c = col as i32 + dc;
        if r >= 0 && c >= 0 && (r as usize) < self.size && (c as usize) < self.size {
            Some(Point::new(r as usize, c as usize))
        } else {
            None
        }
    }

    /// The up-to-four orthogonal neighbors of `(row, col)`.
    pub fn neighbors4(&self, row: usize, col: usize) -> Vec<Point> {
        let mut out = Vec::with_capacity(4);
        for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            if let Some(p) = self.offset(row, col, dr, dc) {
                out.push(p);
            }
        }
        out
    }

    /// Iterates every coordinate on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Point::new(row, col)))
    }

    /// Number of cells holding the given color.
    pub fn count(&self, color: Color) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// True when no cell is empty.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&c| c != Color::Empty)
    }

    /// Empties every cell.
    pub fn clear_all(&mut self) {
        for cell in &mut self.cells {
            *cell = Color::Empty;
        }
    }
}

impl fmt::Display for Board {
    /// Renders the board with row and column indices, one glyph per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..self.size {
            write!(f, "{:>2}", col)?;
        }
        writeln!(f)?;
        for row in 0..self.size {
            write!(f, "{:>2} ", row)?;
            for col in 0..self.size {
                write!(f, " {}", self.get(row, col).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
