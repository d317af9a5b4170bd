//! Simple AI that picks the first available cell.

use crate::games::tictactoe::{Board, MoveError, Position};
use tracing::{debug, instrument};

/// Returns the first empty position in row-major order.
///
/// This is the fallback used whenever no valid suggestion is available. It
/// is deterministic and makes no attempt to play well.
///
/// # Errors
///
/// Returns [`MoveError::NoLegalMove`] if the board is full.
#[instrument(skip(board))]
pub fn select_move(board: &Board) -> Result<Position, MoveError> {
    let position = Position::ALL
        .iter()
        .copied()
        .find(|&pos| board.is_empty(pos))
        .ok_or(MoveError::NoLegalMove)?;

    debug!(%position, "Fallback chose position");
    Ok(position)
}
