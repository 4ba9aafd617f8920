//! Error types for toolchat
//!
//! Centralized error handling using thiserror. Per-tool failures have their own
//! type (`tools::ToolError`) because they never escape a turn.

use thiserror::Error;

/// All error types that can end a turn or prevent startup
#[derive(Debug, Error)]
pub enum ChatError {
    /// Missing or invalid settings/credential
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model client failure (transport, malformed response)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Non-success HTTP status from the model endpoint
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The model kept requesting tools past the configured round cap
    #[error("Turn aborted: model requested tools for more than {limit} rounds")]
    RoundLimitExceeded { limit: usize },

    /// Conversation history invariant violated
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ChatError {
    /// Whether the error came from the model endpoint rather than local state
    pub fn is_model_error(&self) -> bool {
        matches!(self, ChatError::Llm(_) | ChatError::Api { .. })
    }
}

/// Result type alias for toolchat operations
pub type Result<T> = std::result::Result<T, ChatError>;
