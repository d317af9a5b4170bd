//! Move suggester backed by a text-generation service.

use super::{MoveSuggester, SuggestionFailure};
use crate::games::tictactoe::{Board, Mark, Position};
use crate::llm_client::LlmClient;
use crate::suggester_config::SuggesterConfig;
use tracing::{debug, info, instrument, warn};

/// System instruction sent with every board.
pub fn system_prompt(mark: Mark) -> String {
    format!(
        "You are playing tic-tac-toe as {mark}. \
         Reply with your next move as a JSON array [row, col] of zero-based \
         indices (0-2) pointing at an empty cell, and nothing else."
    )
}

/// User message describing the board.
pub fn board_prompt(board: &Board, mark: Mark) -> String {
    format!(
        "Current board (rows top to bottom, X and O are marks, - is empty):\n\
         {}\n\n\
         Your move as {mark}:",
        board.render()
    )
}

/// Finds the first `[row, col]` pair in free-form text.
///
/// Whitespace is allowed around both numbers and any text may surround the
/// brackets. Candidates whose numbers are not plain non-negative integers
/// are skipped in favour of later ones.
pub fn parse_suggestion(text: &str) -> Option<Position> {
    text.match_indices('[')
        .find_map(|(start, _)| parse_pair(&text[start + 1..]))
}

fn parse_pair(rest: &str) -> Option<Position> {
    let (row, rest) = leading_integer(rest.trim_start())?;
    let rest = rest.trim_start().strip_prefix(',')?;
    let (col, rest) = leading_integer(rest.trim_start())?;
    rest.trim_start().strip_prefix(']')?;
    Some(Position::new(row, col))
}

fn leading_integer(s: &str) -> Option<(usize, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

/// [`MoveSuggester`] that prompts an LLM with the board.
#[derive(Debug, Clone)]
pub struct LlmSuggester {
    client: LlmClient,
}

impl LlmSuggester {
    /// Creates a suggester around an existing client.
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    /// Builds a suggester if the provider's API key is set.
    ///
    /// Returns `None` when the credential is missing, in which case the
    /// computer player always uses the fallback.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn from_env(config: &SuggesterConfig) -> Option<Self> {
        match config.create_llm_config() {
            Ok(llm_config) => {
                info!(model = %llm_config.model(), "Move suggester configured");
                Some(Self::new(LlmClient::new(llm_config)))
            }
            Err(e) => {
                info!(reason = %e.message, "Move suggester unavailable");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl MoveSuggester for LlmSuggester {
    #[instrument(skip(self, board))]
    async fn suggest_move(&self, board: &Board, mark: Mark) -> Result<Position, SuggestionFailure> {
        let reply = self
            .client
            .generate(&system_prompt(mark), &board_prompt(board, mark))
            .await
            .map_err(SuggestionFailure::Service)?;

        debug!(reply = %reply, "Received suggestion reply");
        parse_suggestion(&reply).ok_or_else(|| {
            warn!(reply = %reply, "No coordinate pair in reply");
            SuggestionFailure::Unparseable(reply)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Cell;

    #[test]
    fn test_parse_with_surrounding_text() {
        assert_eq!(parse_suggestion("Sure! [1, 2] is my move."), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_parse_tight_and_loose_whitespace() {
        assert_eq!(parse_suggestion("[0,0]"), Some(Position::new(0, 0)));
        assert_eq!(parse_suggestion("[ 2 ,\t1 ]"), Some(Position::new(2, 1)));
    }

    #[test]
    fn test_parse_takes_first_pair() {
        assert_eq!(parse_suggestion("[2, 2] or maybe [0, 1]"), Some(Position::new(2, 2)));
    }

    #[test]
    fn test_parse_skips_non_pairs() {
        assert_eq!(parse_suggestion("[x] then [1] then [1, 0]"), Some(Position::new(1, 0)));
        assert_eq!(parse_suggestion("[-1, 2] [0, 2]"), Some(Position::new(0, 2)));
    }

    #[test]
    fn test_parse_out_of_range_is_still_parsed() {
        assert_eq!(parse_suggestion("[5, 9]"), Some(Position::new(5, 9)));
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(parse_suggestion("invalid"), None);
        assert_eq!(parse_suggestion("row 1, col 2"), None);
        assert_eq!(parse_suggestion("[1, 2, 3]"), None);
        assert_eq!(parse_suggestion("[1, 2"), None);
        assert_eq!(parse_suggestion(""), None);
    }

    #[test]
    fn test_board_prompt_contains_rendering() {
        let board = Board::from_rows([
            [Cell::Occupied(Mark::X), Cell::Empty, Cell::Empty],
            [Cell::Empty, Cell::Occupied(Mark::O), Cell::Empty],
            [Cell::Empty, Cell::Empty, Cell::Empty],
        ]);
        let prompt = board_prompt(&board, Mark::O);
        assert!(prompt.contains("X--\n-O-\n---"));
        assert!(prompt.ends_with("Your move as O:"));
        assert!(system_prompt(Mark::O).contains("as O"));
    }
}
