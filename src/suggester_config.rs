//! Configuration for the service-backed move suggester.

use crate::llm_client::{LlmConfig, LlmProvider};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Settings for asking a text-generation service for computer moves.
///
/// The API credential is never stored here; it is read from the
/// environment by [`SuggesterConfig::create_llm_config`]. When the model
/// is omitted it defaults to the provider's [`default_model`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[serde(from = "SuggesterConfigFile")]
#[setters(prefix = "with_")]
pub struct SuggesterConfig {
    /// LLM provider (openai or anthropic).
    provider: LlmProvider,

    /// Model name (e.g., "gpt-4o-mini", "claude-3-5-haiku-20241022").
    #[setters(into)]
    model: String,

    /// Maximum tokens for the reply.
    max_tokens: u32,

    /// Time budget for one suggestion, in milliseconds.
    timeout_ms: u64,
}

/// On-disk form of [`SuggesterConfig`]; every key is optional.
#[derive(Deserialize)]
struct SuggesterConfigFile {
    #[serde(default)]
    provider: LlmProvider,
    model: Option<String>,
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

impl From<SuggesterConfigFile> for SuggesterConfig {
    fn from(file: SuggesterConfigFile) -> Self {
        Self {
            model: file
                .model
                .unwrap_or_else(|| default_model(file.provider).to_string()),
            provider: file.provider,
            max_tokens: file.max_tokens,
            timeout_ms: file.timeout_ms,
        }
    }
}

/// Model used when a configuration names only the provider.
pub fn default_model(provider: LlmProvider) -> &'static str {
    match provider {
        LlmProvider::OpenAI => "gpt-4o-mini",
        LlmProvider::Anthropic => "claude-3-5-haiku-20241022",
    }
}

fn default_max_tokens() -> u32 {
    50
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for SuggesterConfig {
    fn default() -> Self {
        let provider = LlmProvider::default();
        Self {
            provider,
            model: default_model(provider).to_string(),
            max_tokens: default_max_tokens(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl SuggesterConfig {
    /// Time budget for one suggestion.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading suggester config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(provider = ?config.provider, model = %config.model, "Config loaded successfully");
        Ok(config)
    }

    /// Creates LLM connection settings using the provider's API key.
    ///
    /// Reads `OPENAI_API_KEY` or `ANTHROPIC_API_KEY` from the process
    /// environment, after loading a `.env` file if one is present.
    #[instrument(skip(self), fields(provider = ?self.provider, model = %self.model))]
    pub fn create_llm_config(&self) -> Result<LlmConfig, ConfigError> {
        dotenvy::dotenv().ok();
        let var = self.provider.api_key_var();
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::new(format!("{} environment variable not set", var)))?;

        Ok(LlmConfig::new(
            self.provider,
            api_key,
            self.model.clone(),
            self.max_tokens,
        ))
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
