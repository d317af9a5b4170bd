//! Game session controller.
//!
//! [`GameController`] owns the only mutable copy of a session. Every
//! operation that changes state recomputes the [`Outcome`] of the entry
//! under the cursor before returning it.
//!
//! Computer turns suspend while a [`MoveSuggester`] is consulted, so they
//! are split into three steps that never hold the controller across the
//! await:
//!
//! 1. [`GameController::begin_computer_turn`] marks the session as awaiting
//!    the computer and captures what the suggester needs.
//! 2. [`PendingTurn::resolve`] runs the suggestion with its time budget.
//! 3. [`GameController::finish_computer_turn`] applies exactly one move,
//!    unless the session was reset, re-moded or navigated in the meantime.
//!
//! [`GameController::run_computer_turn`] chains the three for callers that
//! own the controller outright.

mod invariants;
mod state;

pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation,
    MonotonicBoardInvariant, SessionInvariants,
};
pub use state::{GameMode, HistoryEntry, SessionState};

use crate::games::tictactoe::{Board, Mark, Move, MoveError, Outcome, Position, rules};
use crate::players::{
    FallbackReason, LlmSuggester, MoveSuggester, Suggestion, select_move, suggest_within,
};
use crate::suggester_config::SuggesterConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Time budget for one suggestion when none is configured.
pub const DEFAULT_SUGGESTION_BUDGET: Duration = Duration::from_secs(10);

/// Why a human move was not applied. Session state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveRejected {
    /// The game at the cursor is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// A computer turn is in flight.
    #[display("Waiting for the computer's move")]
    AwaitingComputer,

    /// The mark to move belongs to the computer.
    #[display("It is not the human's turn ({} to move)", _0)]
    NotYourTurn(Mark),

    /// The board rejected the move.
    #[display("{}", _0)]
    Illegal(MoveError),
}

impl std::error::Error for MoveRejected {}

/// Why a computer turn was not started or not applied. Session state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum TurnRejected {
    /// The session has no computer player.
    #[display("No computer player in this mode")]
    WrongMode,

    /// The game at the cursor is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// The mark to move belongs to the human.
    #[display("It is not the computer's turn")]
    NotComputerTurn,

    /// Another computer turn is already in flight.
    #[display("A computer turn is already pending")]
    AlreadyPending,

    /// The reply was issued before a reset, mode change or history jump.
    #[display("Discarded reply for an abandoned turn")]
    Stale,

    /// No move could be applied.
    #[display("{}", _0)]
    Illegal(MoveError),
}

impl std::error::Error for TurnRejected {}

/// Error from history navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum HistoryError {
    /// The requested entry does not exist.
    #[display("History index {} out of range (history has {} entries)", index, len)]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of history entries.
        len: usize,
    },
}

impl std::error::Error for HistoryError {}

/// Where a computer move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveSource {
    /// The suggester's move was legal and was played.
    Suggested,
    /// The fallback player chose the move.
    Fallback(FallbackReason),
}

/// A computer move that was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputerMove {
    /// The move that was played.
    pub placed: Move,
    /// Whether the suggestion or the fallback produced it.
    pub source: MoveSource,
    /// Outcome after the move.
    pub outcome: Outcome,
}

/// A computer turn waiting on its suggestion.
///
/// Holds its own copy of the board, so it can be resolved while the
/// controller remains available for reads.
#[derive(Debug)]
pub struct PendingTurn {
    generation: u64,
    board: Board,
    mark: Mark,
    suggester: Option<Arc<dyn MoveSuggester>>,
    budget: Duration,
}

impl PendingTurn {
    /// Board the suggestion is requested for.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark the computer is playing.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Asks the suggester, if any, for a move within the time budget.
    #[instrument(skip(self), fields(generation = self.generation, mark = %self.mark))]
    pub async fn resolve(self) -> ComputerReply {
        let suggestion = match &self.suggester {
            Some(suggester) => {
                suggest_within(suggester.as_ref(), &self.board, self.mark, self.budget).await
            }
            None => Suggestion::Unavailable(FallbackReason::NotConfigured),
        };

        ComputerReply {
            generation: self.generation,
            suggestion,
        }
    }
}

/// Resolved suggestion, tagged with the session generation it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerReply {
    generation: u64,
    suggestion: Suggestion,
}

impl ComputerReply {
    /// The suggestion carried by this reply.
    pub fn suggestion(&self) -> Suggestion {
        self.suggestion
    }
}

/// State machine for one tic-tac-toe session.
#[derive(Debug)]
pub struct GameController {
    state: SessionState,
    outcome: Outcome,
    suggester: Option<Arc<dyn MoveSuggester>>,
    budget: Duration,
    generation: u64,
    pending: Option<u64>,
    last_advisory: Option<FallbackReason>,
}

impl GameController {
    /// Creates a session with no suggester; computer moves use the fallback.
    #[instrument]
    pub fn new(mode: GameMode) -> Self {
        info!("Creating game session");
        Self {
            state: SessionState::new(mode),
            outcome: Outcome::InProgress,
            suggester: None,
            budget: DEFAULT_SUGGESTION_BUDGET,
            generation: 0,
            pending: None,
            last_advisory: None,
        }
    }

    /// Creates a session whose computer player consults `suggester`.
    #[instrument(skip(suggester))]
    pub fn with_suggester(
        mode: GameMode,
        suggester: Arc<dyn MoveSuggester>,
        budget: Duration,
    ) -> Self {
        Self {
            suggester: Some(suggester),
            budget,
            ..Self::new(mode)
        }
    }

    /// Creates a session using an LLM suggester if its API key is set.
    #[instrument(skip(config))]
    pub fn from_env(mode: GameMode, config: &SuggesterConfig) -> Self {
        match LlmSuggester::from_env(config) {
            Some(suggester) => Self::with_suggester(mode, Arc::new(suggester), config.timeout()),
            None => Self::new(mode),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Accessors
    // ─────────────────────────────────────────────────────────────

    /// Board at the cursor.
    pub fn board(&self) -> &Board {
        self.state.current().board()
    }

    /// Outcome of the board at the cursor.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Full history, including entries after the cursor.
    pub fn history(&self) -> &[HistoryEntry] {
        self.state.history()
    }

    /// Index of the entry at the cursor.
    pub fn current_index(&self) -> usize {
        *self.state.current_index()
    }

    /// Mark to move at the cursor.
    pub fn turn(&self) -> Mark {
        self.state.turn()
    }

    /// Current mode.
    pub fn mode(&self) -> GameMode {
        *self.state.mode()
    }

    /// Session state snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True while a computer turn is in flight. Input should be disabled.
    pub fn is_awaiting_computer(&self) -> bool {
        self.pending.is_some()
    }

    /// True when the caller should start a computer turn: it is the
    /// computer's mark to move and no turn is already pending.
    pub fn is_computer_turn(&self) -> bool {
        self.pending.is_none()
            && !self.outcome.is_terminal()
            && self.mode().computer_mark() == Some(self.turn())
    }

    /// Why the most recent computer move used the fallback, if it did.
    ///
    /// Cleared whenever the cursor moves through history.
    pub fn last_advisory(&self) -> Option<FallbackReason> {
        self.last_advisory
    }

    /// True when a suggester is injected.
    pub fn has_suggester(&self) -> bool {
        self.suggester.is_some()
    }

    /// One label per history entry, for rendering a move list.
    pub fn move_list(&self) -> Vec<String> {
        (0..self.history().len())
            .map(|i| match i {
                0 => "Go to game start".to_string(),
                i => format!("Go to move #{}", i),
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────
    //  Human moves and navigation
    // ─────────────────────────────────────────────────────────────

    /// Places the mark to move at `position` on behalf of a human.
    ///
    /// Entries after the cursor are discarded before the new entry is
    /// appended, so playing from a rewound position starts a new branch.
    #[instrument(skip(self), fields(turn = %self.turn(), index = self.current_index()))]
    pub fn apply_human_move(&mut self, position: Position) -> Result<Outcome, MoveRejected> {
        if self.pending.is_some() {
            warn!("Move rejected: computer turn pending");
            return Err(MoveRejected::AwaitingComputer);
        }
        if self.outcome.is_terminal() {
            warn!(outcome = %self.outcome, "Move rejected: game over");
            return Err(MoveRejected::GameOver);
        }

        let mark = self.turn();
        if self.mode().computer_mark() == Some(mark) {
            warn!("Move rejected: computer's turn");
            return Err(MoveRejected::NotYourTurn(mark));
        }

        let board = self.board().apply(position, mark).map_err(|e| {
            warn!(error = %e, "Move rejected");
            MoveRejected::Illegal(e)
        })?;

        Ok(self.commit(board, Move::new(mark, position)))
    }

    /// Moves the cursor to `index` without changing the history.
    ///
    /// A pending computer turn is abandoned and the advisory is cleared.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::IndexOutOfRange`] if no such entry exists.
    #[instrument(skip(self))]
    pub fn jump_to(&mut self, index: usize) -> Result<Outcome, HistoryError> {
        let len = self.history().len();
        if index >= len {
            warn!(len, "Jump rejected: index out of range");
            return Err(HistoryError::IndexOutOfRange { index, len });
        }

        self.cancel_pending();
        self.last_advisory = None;
        self.state.set_cursor(index);
        self.refresh();
        info!(outcome = %self.outcome, "Jumped to history entry");
        Ok(self.outcome)
    }

    /// Replaces the session with a fresh one in `mode`.
    ///
    /// Replies to computer turns started before the reset are discarded.
    #[instrument(skip(self))]
    pub fn reset(&mut self, mode: GameMode) {
        self.state = SessionState::new(mode);
        self.generation += 1;
        self.pending = None;
        self.last_advisory = None;
        self.refresh();
        info!(generation = self.generation, "Session reset");
    }

    /// Changes mode. Always restarts the session.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.reset(mode);
    }

    // ─────────────────────────────────────────────────────────────
    //  Computer turns
    // ─────────────────────────────────────────────────────────────

    /// Starts a computer turn and marks the session as awaiting it.
    ///
    /// # Errors
    ///
    /// Rejected when there is no computer player, the game is over, it is
    /// the human's turn, or a turn is already pending.
    #[instrument(skip(self))]
    pub fn begin_computer_turn(&mut self) -> Result<PendingTurn, TurnRejected> {
        let mark = self.mode().computer_mark().ok_or(TurnRejected::WrongMode)?;
        if self.pending.is_some() {
            return Err(TurnRejected::AlreadyPending);
        }
        if self.outcome.is_terminal() {
            return Err(TurnRejected::GameOver);
        }
        if self.turn() != mark {
            return Err(TurnRejected::NotComputerTurn);
        }

        self.pending = Some(self.generation);
        debug!(generation = self.generation, "Computer turn started");
        Ok(PendingTurn {
            generation: self.generation,
            board: self.board().clone(),
            mark,
            suggester: self.suggester.clone(),
            budget: self.budget,
        })
    }

    /// Applies the computer's move for a resolved turn.
    ///
    /// A legal suggestion is played as is. Anything else, including an
    /// off-board or occupied suggestion, is replaced by the fallback move
    /// and recorded as the advisory.
    ///
    /// # Errors
    ///
    /// Returns [`TurnRejected::Stale`] if the session moved on since the turn
    /// began; nothing is applied in that case.
    #[instrument(skip(self, reply), fields(generation = reply.generation))]
    pub fn finish_computer_turn(
        &mut self,
        reply: ComputerReply,
    ) -> Result<ComputerMove, TurnRejected> {
        if self.pending != Some(reply.generation) {
            warn!(current = self.generation, "Discarding stale computer reply");
            return Err(TurnRejected::Stale);
        }
        self.pending = None;

        let mark = self.turn();
        let (position, source) = match reply.suggestion {
            Suggestion::Move(position) if self.board().is_empty(position) => {
                (position, MoveSource::Suggested)
            }
            Suggestion::Move(position) => {
                warn!(%position, "Suggested position is not legal");
                self.fallback(FallbackReason::IllegalSuggestion(position))?
            }
            Suggestion::Unavailable(reason) => self.fallback(reason)?,
        };

        let board = self.board().apply(position, mark).map_err(TurnRejected::Illegal)?;
        let placed = Move::new(mark, position);
        let outcome = self.commit(board, placed);

        self.last_advisory = match source {
            MoveSource::Suggested => None,
            MoveSource::Fallback(reason) => Some(reason),
        };
        info!(%placed, ?source, "Computer move applied");

        Ok(ComputerMove {
            placed,
            source,
            outcome,
        })
    }

    /// Runs a whole computer turn: begin, resolve, finish.
    #[instrument(skip(self))]
    pub async fn run_computer_turn(&mut self) -> Result<ComputerMove, TurnRejected> {
        let pending = self.begin_computer_turn()?;
        let reply = pending.resolve().await;
        self.finish_computer_turn(reply)
    }

    fn fallback(&self, reason: FallbackReason) -> Result<(Position, MoveSource), TurnRejected> {
        info!(%reason, "Using fallback move");
        let position = select_move(self.board()).map_err(TurnRejected::Illegal)?;
        Ok((position, MoveSource::Fallback(reason)))
    }

    // ─────────────────────────────────────────────────────────────
    //  Internal state transitions
    // ─────────────────────────────────────────────────────────────

    fn commit(&mut self, board: Board, placed: Move) -> Outcome {
        let discarded = self.history().len() - self.current_index() - 1;
        if discarded > 0 {
            debug!(discarded, "Discarding future history entries");
        }

        self.state.branch(HistoryEntry::after(board, placed));
        self.refresh();
        info!(%placed, index = self.current_index(), outcome = %self.outcome, "Move applied");
        self.outcome
    }

    fn cancel_pending(&mut self) {
        if self.pending.take().is_some() {
            self.generation += 1;
            warn!(generation = self.generation, "Pending computer turn abandoned");
        }
    }

    fn refresh(&mut self) {
        self.outcome = rules::evaluate(self.board());

        debug_assert!(
            SessionInvariants::check_all(&self.state).is_ok(),
            "Session invariants violated: {:?}",
            SessionInvariants::check_all(&self.state)
        );
    }
}

impl Default for GameController {
    fn default() -> Self {
        Self::new(GameMode::default())
    }
}
