//! Win detection and outcome evaluation for tic-tac-toe.

use super::super::{Board, Cell, Mark, Outcome, Position};
use super::draw::is_full;
use tracing::instrument;

/// The eight winning lines, checked in this order.
///
/// Rows top to bottom, then columns left to right, then the two diagonals.
/// Each line lists its cells in row-then-column scan order.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)],
    [Position::new(1, 0), Position::new(1, 1), Position::new(1, 2)],
    [Position::new(2, 0), Position::new(2, 1), Position::new(2, 2)],
    // Columns
    [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
    [Position::new(0, 1), Position::new(1, 1), Position::new(2, 1)],
    [Position::new(0, 2), Position::new(1, 2), Position::new(2, 2)],
    // Diagonals
    [Position::new(0, 0), Position::new(1, 1), Position::new(2, 2)],
    [Position::new(0, 2), Position::new(1, 1), Position::new(2, 0)],
];

/// Returns the first completed line and its mark, if any.
///
/// When several lines are complete (only possible on boards not produced
/// by legal play) the earliest one in [`LINES`] is reported.
pub fn check_winner(board: &Board) -> Option<(Mark, [Position; 3])> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        match board.get(a)? {
            Cell::Occupied(mark)
                if board.get(b) == Some(Cell::Occupied(mark))
                    && board.get(c) == Some(Cell::Occupied(mark)) =>
            {
                Some((mark, *line))
            }
            _ => None,
        }
    })
}

/// Evaluates a board into exactly one [`Outcome`].
#[instrument(skip(board), fields(occupied = board.occupied_count()))]
pub fn evaluate(board: &Board) -> Outcome {
    if let Some((player, line)) = check_winner(board) {
        return Outcome::Won { player, line };
    }

    if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}
