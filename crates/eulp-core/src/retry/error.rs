//! Fetch error type for retry classification.

use thiserror::Error;

/// Error returned by a single file fetch (curl failure, HTTP status, or local write).
/// Kept typed so the retry policy can classify it before it lands in a report.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (timeout, DNS, connection reset, bad URL).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The server answered with something other than 200.
    #[error("HTTP {0}")]
    Http(u32),
    /// Creating, writing or renaming the destination failed. Not retried.
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}
