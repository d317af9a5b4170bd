//! Board coordinates for tic-tac-toe moves.

use serde::{Deserialize, Serialize};

/// A (row, column) coordinate on the board.
///
/// Positions are constructed unchecked so that untrusted input (for example
/// a coordinate parsed out of a text reply) can be represented and then
/// rejected; [`Position::index`] is the single bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row, 0 (top) to 2 (bottom).
    pub row: usize,
    /// Column, 0 (left) to 2 (right).
    pub col: usize,
}

impl Position {
    /// Creates a position without checking bounds.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major board index (0-8), or `None` if off the board.
    pub fn index(self) -> Option<usize> {
        (self.row < 3 && self.col < 3).then(|| self.row * 3 + self.col)
    }

    /// Checks both coordinates are within 0-2.
    pub fn in_bounds(self) -> bool {
        self.index().is_some()
    }

    /// Creates position from a row-major board index.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 9).then_some(Self::new(index / 3, index % 3))
    }

    /// All 9 positions in row-major order.
    pub const ALL: [Position; 9] = [
        Position::new(0, 0),
        Position::new(0, 1),
        Position::new(0, 2),
        Position::new(1, 0),
        Position::new(1, 1),
        Position::new(1, 2),
        Position::new(2, 0),
        Position::new(2, 1),
        Position::new(2, 2),
    ];
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
