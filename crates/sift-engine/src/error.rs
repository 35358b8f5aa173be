//! Error types for engine access and search operations.

use thiserror::Error;

/// Failures talking to the search engine.
///
/// None of these are retried; the relaxation pass reshapes queries, it never repeats a
/// failed transport call.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("search engine unavailable: {0}")]
    Unavailable(String),

    /// The engine did not answer within the configured timeout.
    #[error("search engine timed out: {0}")]
    Timeout(String),

    /// The engine answered with a non-success status.
    #[error("search engine returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The engine answered with a body that does not have the expected shape.
    #[error("malformed engine response: {0}")]
    MalformedResponse(String),

    /// The client could not be built from the given settings.
    #[error("invalid engine configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

/// Failures of a search-level operation.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The engine call failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The request was rejected before reaching the engine.
    #[error("invalid request: {0}")]
    Validation(String),
}
