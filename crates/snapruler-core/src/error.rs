//! Error types for session setup and input validation.

use thiserror::Error;

/// Errors surfaced by the drawing session.
///
/// Gesture edge cases (short pen strokes, empty history) are not errors;
/// these only cover input the session refuses to accept.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Invalid scale: {0} (must be finite and > 0)")]
    InvalidScale(f64),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
