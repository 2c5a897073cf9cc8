use thiserror::Error;

/// Message reported when a failure carries no usable structure.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Unified error type for tag cleanup operations
#[derive(Error, Debug)]
pub enum CleanupError {
    /// The hosting API answered with an error it described itself.
    #[error("{message}")]
    Api { status: Option<u16>, message: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A failure with no structure to report. The payload is kept for
    /// debug logging only.
    #[error("An unknown error occurred")]
    Unknown(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Repository context error: {0}")]
    Context(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results in orphan-tags
pub type Result<T> = std::result::Result<T, CleanupError>;

impl CleanupError {
    /// Create an API error without an HTTP status
    pub fn api(msg: impl Into<String>) -> Self {
        CleanupError::Api {
            status: None,
            message: msg.into(),
        }
    }

    /// Create an API error carrying the HTTP status it came with
    pub fn api_status(status: u16, msg: impl Into<String>) -> Self {
        CleanupError::Api {
            status: Some(status),
            message: msg.into(),
        }
    }

    /// Create an unstructured error from a raw payload
    pub fn unknown(payload: impl Into<String>) -> Self {
        CleanupError::Unknown(payload.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        CleanupError::Config(msg.into())
    }

    /// Create a repository context error
    pub fn context(msg: impl Into<String>) -> Self {
        CleanupError::Context(msg.into())
    }

    /// Whether this error carries a message worth showing as-is
    pub fn is_structured(&self) -> bool {
        !matches!(self, CleanupError::Unknown(_))
    }
}
