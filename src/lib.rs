//! Tic-tac-toe session core with history navigation and a computer opponent.
//!
//! This library holds the game rules and session state machine a UI shell
//! drives. It renders nothing itself.
//!
//! # Architecture
//!
//! - **Games**: immutable board snapshots, outcome evaluation, move rules
//! - **Players**: the first-empty-cell fallback and the LLM move suggester
//! - **Session**: [`GameController`], which owns history, mode and turn, and
//!   resolves computer turns with fallback and cancellation
//!
//! # Example
//!
//! ```no_run
//! use tictactoe_rewind::{GameController, GameMode, Position, SuggesterConfig};
//!
//! # async fn example() {
//! let mut game = GameController::from_env(GameMode::HumanVsComputer, &SuggesterConfig::default());
//! game.apply_human_move(Position::new(1, 1)).ok();
//! if game.is_computer_turn() {
//!     let reply = game.run_computer_turn().await;
//!     println!("{:?}", reply);
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod games;
mod llm_client;
mod players;
mod session;
mod suggester_config;

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{Board, Cell, Mark, Move, MoveError, Outcome, Position, rules};

// Crate-level exports - Computer players
pub use players::{
    FallbackReason, LlmSuggester, MoveSuggester, Suggestion, SuggestionFailure, board_prompt,
    parse_suggestion, select_move, suggest_within, system_prompt,
};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Configuration
pub use suggester_config::{ConfigError, SuggesterConfig, default_model};

// Crate-level exports - Session management
pub use session::{
    AlternatingTurnInvariant, ComputerMove, ComputerReply, DEFAULT_SUGGESTION_BUDGET,
    GameController, GameMode, HistoryConsistentInvariant, HistoryEntry, HistoryError, Invariant,
    InvariantSet, InvariantViolation, MonotonicBoardInvariant, MoveRejected, MoveSource,
    PendingTurn, SessionInvariants, SessionState, TurnRejected,
};
