//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::super::state::SessionState;
use super::Invariant;
use crate::games::tictactoe::Mark;

/// Invariant: the move recorded at history index `i` was made by the mark
/// due after `i - 1` moves, so X always moves first. The initial entry
/// records no move.
pub struct AlternatingTurnInvariant;

impl Invariant<SessionState> for AlternatingTurnInvariant {
    fn holds(state: &SessionState) -> bool {
        state.history().iter().enumerate().all(|(i, entry)| match (i, entry.placed()) {
            (0, None) => true,
            (0, Some(_)) | (_, None) => false,
            (i, Some(mov)) => mov.player == Mark::to_move_after(i - 1),
        })
    }

    fn description() -> &'static str {
        "Marks alternate starting with X"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Board, Move, Position};
    use crate::session::state::{GameMode, HistoryEntry};

    #[test]
    fn test_empty_session_holds() {
        assert!(AlternatingTurnInvariant::holds(&SessionState::new(GameMode::HumanVsHuman)));
    }

    #[test]
    fn test_o_first_violates() {
        let board = Board::empty().apply(Position::new(0, 0), Mark::O).unwrap();
        let history = vec![
            HistoryEntry::initial(),
            HistoryEntry::after(board, Move::new(Mark::O, Position::new(0, 0))),
        ];
        let state = SessionState::from_parts(history, 1, GameMode::HumanVsHuman);
        assert!(!AlternatingTurnInvariant::holds(&state));
    }

    #[test]
    fn test_repeated_mark_violates() {
        let first = Board::empty().apply(Position::new(0, 0), Mark::X).unwrap();
        let second = first.apply(Position::new(0, 1), Mark::X).unwrap();
        let history = vec![
            HistoryEntry::initial(),
            HistoryEntry::after(first, Move::new(Mark::X, Position::new(0, 0))),
            HistoryEntry::after(second, Move::new(Mark::X, Position::new(0, 1))),
        ];
        let state = SessionState::from_parts(history, 2, GameMode::HumanVsHuman);
        assert!(!AlternatingTurnInvariant::holds(&state));
    }
}
