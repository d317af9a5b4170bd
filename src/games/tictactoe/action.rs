//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record which mark was
//! placed where, and can be validated independently of execution.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a player placing their mark at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The mark being placed.
    pub player: Mark,
    /// Where the mark is placed.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Mark, position: Position) -> Self {
        Self { player, position }
    }

    /// Returns the mark placed by this move.
    pub fn player(&self) -> Mark {
        self.player
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// Error raised by the board rules when a move cannot be made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Row or column lies outside 0-2.
    #[display("Position {} is off the board", _0)]
    OutOfBounds(Position),

    /// The cell at the position already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(Position),

    /// Every cell is occupied, so no move exists.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

impl std::error::Error for MoveError {}
