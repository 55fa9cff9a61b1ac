//! Error types.
//!
//! Only collaborator failures and cancellation surface as errors. Record
//! level problems are reported as [`ValidationError`](crate::validation::ValidationError)s
//! and the record is skipped; advisory failures never leave the scorer.

use thiserror::Error;

/// Company store failure.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing store could not be reached or read.
    #[error("Company store unavailable: {0}")]
    Unavailable(String),
}

/// Advisory service failure. Caught by the scorer and logged.
#[derive(Error, Debug)]
pub enum AdvisoryError {
    /// No advisory service is configured.
    #[error("Advisory service not configured")]
    NotConfigured,

    /// The request did not complete in time.
    #[error("Advisory request timed out")]
    Timeout,

    /// The service could not be reached or returned an error status.
    #[error("Advisory transport failed: {0}")]
    Transport(String),

    /// The response did not contain a usable boost value.
    #[error("Malformed advisory response: {0}")]
    Malformed(String),
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for AdvisoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Malformed(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Matching run failure.
#[derive(Error, Debug)]
pub enum MatchError {
    /// Loading the catalog failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The caller abandoned the request; partial results were discarded.
    #[error("Matching run cancelled")]
    Cancelled,
}
