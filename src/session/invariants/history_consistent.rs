//! History consistency invariant: history shape matches the boards it holds.

use super::super::state::{HistoryEntry, SessionState};
use super::Invariant;

/// Invariant: history starts at the empty board, entry `i` holds exactly `i`
/// marks, and the cursor points at an existing entry.
pub struct HistoryConsistentInvariant;

impl Invariant<SessionState> for HistoryConsistentInvariant {
    fn holds(state: &SessionState) -> bool {
        let history = state.history();

        history.first() == Some(&HistoryEntry::initial())
            && *state.current_index() < history.len()
            && history
                .iter()
                .enumerate()
                .all(|(i, entry)| entry.board().occupied_count() == i)
    }

    fn description() -> &'static str {
        "History starts empty, entry i has i marks, cursor is in range"
    }
}
