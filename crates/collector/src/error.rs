//! Error types for collection operations.

use thiserror::Error;

/// Errors that can occur while fetching or decoding one exchange's tickers.
///
/// These never cross the collector boundary: a failed exchange contributes
/// an empty price map for the cycle and the error is logged.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for CollectError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollectError::Timeout
        } else if let Some(status) = err.status() {
            CollectError::Status(status.as_u16())
        } else {
            CollectError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CollectError {
    fn from(err: serde_json::Error) -> Self {
        CollectError::Decode(err.to_string())
    }
}
