//! Error types for the Pokemon evaluation server

use thiserror::Error;

/// Main error type for the evaluation server
#[derive(Error, Debug)]
pub enum EvalError {
    /// No game session is running; the caller must POST /initialize first
    #[error("Environment not initialized. Call /initialize first.")]
    NotInitialized,

    /// Request is malformed (missing action parameter, unknown action type)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The underlying game environment failed to initialize or step
    #[error("Environment error: {0}")]
    Environment(String),

    /// JSON decode error when parsing persisted rows or payloads
    #[error("JSON decode error: {0}")]
    JsonDecode(#[from] serde_json::Error),

    /// CSV read/write error from the step log
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for evaluation server operations
pub type Result<T> = std::result::Result<T, EvalError>;

impl EvalError {
    /// Create a bad request error
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an environment error
    pub fn environment(msg: impl Into<String>) -> Self {
        Self::Environment(msg.into())
    }
}
