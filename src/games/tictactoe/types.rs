//! Core domain types for tic-tac-toe.

use super::action::MoveError;
use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Player mark in the game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Mark {
    /// Player X (always moves first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opponent's mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Mark that moves after `moves_played` moves, X first.
    pub fn to_move_after(moves_played: usize) -> Self {
        if moves_played % 2 == 0 { Mark::X } else { Mark::O }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell occupied by a mark.
    Occupied(Mark),
}

impl Cell {
    /// Character used when the board is rendered as text.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Occupied(Mark::X) => 'X',
            Cell::Occupied(Mark::O) => 'O',
        }
    }
}

/// Immutable 3x3 board snapshot.
///
/// Every move produces a new snapshot through [`Board::apply`]; an existing
/// board is never changed in place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Returns the all-empty board.
    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from three rows of cells.
    pub fn from_rows(rows: [[Cell; 3]; 3]) -> Self {
        let mut cells = [Cell::Empty; 9];
        for (r, row) in rows.iter().enumerate() {
            cells[r * 3..r * 3 + 3].copy_from_slice(row);
        }
        Self { cells }
    }

    /// Gets the cell at `position`, or `None` if it lies off the board.
    pub fn get(&self, position: Position) -> Option<Cell> {
        position.index().map(|idx| self.cells[idx])
    }

    /// Checks if the cell at `position` is on the board and empty.
    pub fn is_empty(&self, position: Position) -> bool {
        matches!(self.get(position), Some(Cell::Empty))
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Number of occupied cells, equal to the number of moves that built this board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Checks if no cell is empty.
    pub fn is_full(&self) -> bool {
        super::rules::is_full(self)
    }

    /// Returns a new board with `mark` placed at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfBounds`] if either coordinate is outside
    /// 0-2, and [`MoveError::Occupied`] if the target cell already holds a mark.
    #[instrument(skip(self))]
    pub fn apply(&self, position: Position, mark: Mark) -> Result<Board, MoveError> {
        let idx = position.index().ok_or(MoveError::OutOfBounds(position))?;
        if self.cells[idx] != Cell::Empty {
            return Err(MoveError::Occupied(position));
        }

        let mut next = self.clone();
        next.cells[idx] = Cell::Occupied(mark);
        Ok(next)
    }

    /// Renders the board as text, one row per line.
    ///
    /// Marks appear as `X`/`O` and empty cells as `-`.
    pub fn render(&self) -> String {
        self.cells
            .chunks(3)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
