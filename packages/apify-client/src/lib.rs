//! Apify REST API client for hashtag scrape jobs.
//!
//! Starts an instagram-scraper actor run in hashtag search mode, polls the
//! run at a fixed interval until it reaches a terminal status, and fetches
//! the run's default dataset as raw JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use apify_client::{ApifyClient, SearchLimits};
//!
//! let client = ApifyClient::new("your-api-token".into());
//!
//! let scrape = client.search_hashtag("travel", &SearchLimits::default()).await?;
//! println!("{} finished with {} items", scrape.run.status, scrape.items.len());
//! ```

pub mod error;
pub mod types;

pub use error::{ApifyError, Result};
pub use types::{HashtagScrape, HashtagSearchInput, RunData, RunStatus, SearchLimits};

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use types::ApiResponse;

const BASE_URL: &str = "https://api.apify.com/v2";

/// Actor for apify/instagram-scraper (supports hashtag search).
const INSTAGRAM_SCRAPER: &str = "apify~instagram-scraper";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct ApifyClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
    poll_interval: Duration,
}

impl ApifyClient {
    pub fn new(token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            token,
            base_url: BASE_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Point the client at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the delay between run status checks.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Start a hashtag search run. Returns immediately with run metadata.
    pub async fn start_hashtag_search(
        &self,
        term: &str,
        limits: &SearchLimits,
    ) -> Result<RunData> {
        let input = HashtagSearchInput::new(term, limits);
        self.start_run(INSTAGRAM_SCRAPER, &input).await
    }

    /// Start a run of any actor with the given JSON input.
    pub async fn start_run<I: Serialize + ?Sized>(&self, actor: &str, input: &I) -> Result<RunData> {
        let url = format!("{}/acts/{}/runs", self.base_url, actor);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(input)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = Self::success(resp).await?.json().await?;
        Ok(api_resp.data)
    }

    /// Fetch the current state of a run.
    pub async fn get_run(&self, run_id: &str) -> Result<RunData> {
        let url = format!("{}/actor-runs/{}", self.base_url, run_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let api_resp: ApiResponse<RunData> = Self::success(resp).await?.json().await?;
        Ok(api_resp.data)
    }

    /// Poll at the configured interval until the run reaches a terminal status.
    ///
    /// Failed, aborted and timed-out runs are returned, not raised; callers
    /// decide what a non-success status means for them.
    pub async fn wait_for_run(&self, run_id: &str) -> Result<RunData> {
        loop {
            let run = self.get_run(run_id).await?;
            if run.status.is_terminal() {
                return Ok(run);
            }

            tracing::debug!(run_id, status = %run.status, "Run still in progress");
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetch dataset items from a run's dataset.
    pub async fn get_dataset_items<T: DeserializeOwned>(&self, dataset_id: &str) -> Result<Vec<T>> {
        let url = format!("{}/datasets/{}/items?format=json", self.base_url, dataset_id);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let items: Vec<T> = Self::success(resp).await?.json().await?;
        Ok(items)
    }

    /// Run a hashtag search end-to-end: start run, poll, fetch raw items.
    ///
    /// A run that ends without success yields no items; its dataset is not
    /// requested.
    pub async fn search_hashtag(&self, term: &str, limits: &SearchLimits) -> Result<HashtagScrape> {
        tracing::info!(
            term,
            results_limit = limits.results_limit,
            search_limit = limits.search_limit,
            "Starting hashtag scrape"
        );

        let run = self.start_hashtag_search(term, limits).await?;
        tracing::info!(run_id = %run.id, "Apify run started, polling for completion");

        let run = self.wait_for_run(&run.id).await?;
        if !run.status.is_success() {
            tracing::warn!(
                run_id = %run.id,
                status = %run.status,
                "Run ended without success, skipping dataset fetch"
            );
            return Ok(HashtagScrape {
                run,
                items: Vec::new(),
            });
        }

        tracing::info!(
            run_id = %run.id,
            dataset_id = %run.default_dataset_id,
            "Run finished, fetching results"
        );

        let items: Vec<serde_json::Value> = self.get_dataset_items(&run.default_dataset_id).await?;
        tracing::info!(count = items.len(), "Fetched dataset items");

        Ok(HashtagScrape { run, items })
    }

    async fn success(resp: reqwest::Response) -> Result<reqwest::Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        Err(ApifyError::Api {
            status: status.as_u16(),
            message: body,
        })
    }
}
