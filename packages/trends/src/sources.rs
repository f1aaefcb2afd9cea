//! [`ScrapeSource`] and [`Summarizer`] backed by the real API clients.

use apify_client::{ApifyClient, RunStatus, SearchLimits};
use async_trait::async_trait;
use llm_client::LlmClient;
use serde_json::Value;

use crate::error::{Result, TrendsError};
use crate::traits::{ScrapeSource, Summarizer};
use crate::types::{JobStatus, ScrapeOutcome};

/// Hashtag scrapes through the Apify instagram-scraper actor.
#[derive(Clone)]
pub struct ApifySource {
    client: ApifyClient,
    limits: SearchLimits,
}

impl ApifySource {
    pub fn new(client: ApifyClient, limits: SearchLimits) -> Self {
        Self { client, limits }
    }
}

#[async_trait]
impl ScrapeSource for ApifySource {
    async fn scrape(&self, term: &str) -> Result<ScrapeOutcome> {
        let scrape = self
            .client
            .search_hashtag(term, &self.limits)
            .await
            .map_err(|e| TrendsError::Scrape(Box::new(e)))?;

        Ok(ScrapeOutcome {
            status: JobStatus::from(&scrape.run.status),
            run_id: Some(scrape.run.id),
            items: Value::Array(scrape.items),
        })
    }
}

impl From<&RunStatus> for JobStatus {
    fn from(status: &RunStatus) -> Self {
        match status {
            RunStatus::Succeeded => JobStatus::Succeeded,
            RunStatus::Failed => JobStatus::Failed,
            RunStatus::Aborted => JobStatus::Aborted,
            RunStatus::TimedOut => JobStatus::TimedOut,
            RunStatus::Ready
            | RunStatus::Running
            | RunStatus::Aborting
            | RunStatus::TimingOut
            | RunStatus::Other(_) => JobStatus::Running,
        }
    }
}

#[async_trait]
impl Summarizer for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.complete(prompt)
            .await
            .map_err(|e| TrendsError::Summarizer(Box::new(e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_status_mapping() {
        assert_eq!(JobStatus::from(&RunStatus::Succeeded), JobStatus::Succeeded);
        assert_eq!(JobStatus::from(&RunStatus::Failed), JobStatus::Failed);
        assert_eq!(JobStatus::from(&RunStatus::Aborted), JobStatus::Aborted);
        assert_eq!(JobStatus::from(&RunStatus::TimedOut), JobStatus::TimedOut);
        assert_eq!(JobStatus::from(&RunStatus::TimingOut), JobStatus::Running);
        assert_eq!(
            JobStatus::from(&RunStatus::Other("PAUSED".into())),
            JobStatus::Running
        );
    }

    #[test]
    fn test_unreachable_api_is_scrape_error() {
        let client = ApifyClient::new("t".into()).with_base_url("http://127.0.0.1:9");
        let source = ApifySource::new(client, SearchLimits::default());

        let err = tokio_test::block_on(source.scrape("coffee")).unwrap_err();
        assert!(matches!(err, TrendsError::Scrape(_)), "{err:?}");
    }
}
