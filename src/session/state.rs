//! Session state: mode, linear history and the history cursor.

use crate::games::tictactoe::{Board, Mark, Move};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Who controls each mark.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum GameMode {
    /// Both marks are placed by humans.
    #[default]
    HumanVsHuman,
    /// The human plays X, the computer plays O.
    HumanVsComputer,
}

impl GameMode {
    /// Mark played by the computer, if any.
    pub fn computer_mark(self) -> Option<Mark> {
        match self {
            GameMode::HumanVsHuman => None,
            GameMode::HumanVsComputer => Some(Mark::O),
        }
    }
}

/// One point in the game history.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Board after this entry's move.
    board: Board,
    /// The move that produced this board; `None` only for the initial entry.
    placed: Option<Move>,
}

impl HistoryEntry {
    /// The empty starting entry.
    pub fn initial() -> Self {
        Self {
            board: Board::empty(),
            placed: None,
        }
    }

    /// Entry recording `placed` and the board it produced.
    pub(crate) fn after(board: Board, placed: Move) -> Self {
        Self {
            board,
            placed: Some(placed),
        }
    }
}

/// Mutable session data owned by the controller.
///
/// `history[0]` is always the empty board and `current_index` always
/// points into `history`.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct SessionState {
    /// Every board reached so far, oldest first.
    history: Vec<HistoryEntry>,
    /// Index of the entry being shown and played from.
    current_index: usize,
    /// Current game mode.
    mode: GameMode,
}

impl SessionState {
    /// Fresh state with only the initial entry.
    pub fn new(mode: GameMode) -> Self {
        Self {
            history: vec![HistoryEntry::initial()],
            current_index: 0,
            mode,
        }
    }

    /// Entry at the cursor.
    pub fn current(&self) -> &HistoryEntry {
        &self.history[self.current_index]
    }

    /// Mark to move, derived from the cursor: X on even indices, O on odd.
    pub fn turn(&self) -> Mark {
        Mark::to_move_after(self.current_index)
    }

    /// Drops entries after the cursor, appends `entry` and moves onto it.
    pub(crate) fn branch(&mut self, entry: HistoryEntry) {
        self.history.truncate(self.current_index + 1);
        self.history.push(entry);
        self.current_index = self.history.len() - 1;
    }

    /// Moves the cursor. Callers check bounds first.
    pub(crate) fn set_cursor(&mut self, index: usize) {
        debug_assert!(index < self.history.len());
        self.current_index = index;
    }

    #[cfg(test)]
    pub(crate) fn from_parts(
        history: Vec<HistoryEntry>,
        current_index: usize,
        mode: GameMode,
    ) -> Self {
        Self {
            history,
            current_index,
            mode,
        }
    }
}
