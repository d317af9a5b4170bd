//! Computer players.
//!
//! A computer move comes from an optional [`MoveSuggester`] (normally backed
//! by a text-generation service) and falls back to [`select_move`] whenever
//! the suggester is missing, slow, failing or wrong.

mod llm;
mod simple_ai;

pub use llm::{LlmSuggester, board_prompt, parse_suggestion, system_prompt};
pub use simple_ai::select_move;

use crate::games::tictactoe::{Board, Mark, Position};
use crate::llm_client::LlmError;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Source of move suggestions for the computer player.
#[async_trait::async_trait]
pub trait MoveSuggester: std::fmt::Debug + Send + Sync {
    /// Suggests a position for `mark` to play on `board`.
    ///
    /// The returned position is advisory and may be off the board or
    /// occupied; callers must validate it before applying.
    async fn suggest_move(&self, board: &Board, mark: Mark) -> Result<Position, SuggestionFailure>;
}

/// Failure reported by a [`MoveSuggester`].
#[derive(Debug, Clone, derive_more::Display)]
pub enum SuggestionFailure {
    /// The service call failed.
    #[display("{}", _0)]
    Service(LlmError),

    /// The reply contained no `[row, col]` pair.
    #[display("No coordinate pair in reply: {:?}", _0)]
    Unparseable(String),
}

impl std::error::Error for SuggestionFailure {}

impl SuggestionFailure {
    /// Maps this failure to the advisory reported by the controller.
    pub fn reason(&self) -> FallbackReason {
        match self {
            SuggestionFailure::Service(_) => FallbackReason::ServiceError,
            SuggestionFailure::Unparseable(_) => FallbackReason::Unparseable,
        }
    }
}

/// Why the computer's move came from the fallback player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum FallbackReason {
    /// No suggester is configured (for example, no API key).
    #[display("no move suggester configured")]
    NotConfigured,
    /// The suggester did not answer within the time budget.
    #[display("suggestion timed out")]
    TimedOut,
    /// The suggestion service returned an error.
    #[display("suggestion service error")]
    ServiceError,
    /// The reply could not be parsed into a coordinate pair.
    #[display("suggestion could not be parsed")]
    Unparseable,
    /// The suggested position is off the board or occupied.
    #[display("suggested position {} is not a legal move", _0)]
    IllegalSuggestion(Position),
}

/// Result of asking a suggester for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    /// A parsed, not yet validated, position.
    Move(Position),
    /// No usable answer.
    Unavailable(FallbackReason),
}

/// Asks `suggester` for a move, giving up after `budget`.
///
/// Every failure mode is folded into [`Suggestion::Unavailable`].
#[instrument(skip(suggester, board), fields(budget_ms = budget.as_millis() as u64))]
pub async fn suggest_within(
    suggester: &dyn MoveSuggester,
    board: &Board,
    mark: Mark,
    budget: Duration,
) -> Suggestion {
    match tokio::time::timeout(budget, suggester.suggest_move(board, mark)).await {
        Ok(Ok(position)) => {
            debug!(%position, "Suggester proposed position");
            Suggestion::Move(position)
        }
        Ok(Err(failure)) => {
            warn!(error = %failure, "Suggester failed");
            Suggestion::Unavailable(failure.reason())
        }
        Err(_) => {
            warn!("Suggester timed out");
            Suggestion::Unavailable(FallbackReason::TimedOut)
        }
    }
}
