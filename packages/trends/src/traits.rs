//! Seams to the two hosted services an analysis depends on.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::ScrapeOutcome;

/// Runs a hashtag scrape job to a terminal status and returns its raw items.
///
/// A job that ends FAILED, ABORTED or TIMED-OUT is an `Ok` outcome carrying
/// that status; `Err` is reserved for transport and API failures.
#[async_trait]
pub trait ScrapeSource: Send + Sync {
    async fn scrape(&self, term: &str) -> Result<ScrapeOutcome>;
}

/// Prompt in, generated text out.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}
