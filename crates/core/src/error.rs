//! Error types for the slide intent engine.

use thiserror::Error;

/// Result type alias using the engine's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type.
///
/// Most of these never reach a caller of the router: extraction errors are
/// the `Err` arm that selects a fallback path, and merge errors select the
/// best prior configuration.
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Model Gateway Errors (LLM transport)
    // =========================================================================
    #[error("Model provider error: {0}")]
    ModelProvider(String),

    #[error("LLM disabled: {0}")]
    LlmDisabled(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    // =========================================================================
    // Extraction Errors (untrusted LLM output)
    // =========================================================================
    #[error("Malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("Unknown component type: {0}")]
    UnknownComponent(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    // =========================================================================
    // Resolution Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Generation backend error: {0}")]
    Backend(String),

    // =========================================================================
    // Generic Errors
    // =========================================================================
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    /// Create a model provider error.
    pub fn model_provider(msg: impl Into<String>) -> Self {
        Self::ModelProvider(msg.into())
    }

    /// Create a malformed response error.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an invalid request error.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create a generation backend error.
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether this error came from talking to the LLM rather than from what it said.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ModelProvider(_) | Self::LlmDisabled(_) | Self::Timeout(_)
        )
    }
}
