use std::time::Duration;

use thiserror::Error;

/// Result type for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors from one transform invocation.
///
/// These are recoverable by design: a failed item becomes an error
/// outcome for its own sequence index and never fails the mapping run.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Transport-level failure talking to the model service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The model service answered with a non-success status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The per-item deadline elapsed before the transform returned
    #[error("Timed out after {0:.1?}")]
    Timeout(Duration),

    /// No API key available in the environment
    #[error("Missing API key: set PROMPTMAP_API_KEY or OPENAI_API_KEY")]
    MissingApiKey,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
