//! Monotonic board invariant: each entry extends the previous one by its move.

use super::super::state::SessionState;
use super::Invariant;

/// Invariant: every history entry's board is the previous board with exactly
/// that entry's move applied.
///
/// Cells therefore only go from empty to occupied along the history and are
/// never overwritten.
pub struct MonotonicBoardInvariant;

impl Invariant<SessionState> for MonotonicBoardInvariant {
    fn holds(state: &SessionState) -> bool {
        state.history().windows(2).all(|pair| {
            let [before, after] = pair else { return false };
            match after.placed() {
                Some(mov) => before
                    .board()
                    .apply(mov.position, mov.player)
                    .is_ok_and(|expected| expected == *after.board()),
                None => false,
            }
        })
    }

    fn description() -> &'static str {
        "Each history entry applies exactly its move to the previous board"
    }
}
