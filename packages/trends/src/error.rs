//! Typed errors for the trends library.
//!
//! Extraction itself never fails; these cover the collaborators around it.

use thiserror::Error;

/// Errors that can occur while producing a trend analysis.
#[derive(Debug, Error)]
pub enum TrendsError {
    /// Scrape job could not be submitted, polled or fetched
    #[error("scrape failed: {0}")]
    Scrape(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Language model call failed
    #[error("summarizer error: {0}")]
    Summarizer(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Search term is unusable
    #[error("invalid search term: {reason}")]
    InvalidTerm { reason: String },
}

/// Result type alias for trends operations.
pub type Result<T> = std::result::Result<T, TrendsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_cause() {
        let err = TrendsError::Scrape("run start rejected".into());
        assert_eq!(err.to_string(), "scrape failed: run start rejected");
        assert!(std::error::Error::source(&err).is_some());

        let err = TrendsError::InvalidTerm {
            reason: "search term is empty".into(),
        };
        assert_eq!(err.to_string(), "invalid search term: search term is empty");
    }
}
