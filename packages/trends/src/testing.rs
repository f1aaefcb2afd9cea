//! Mock scrape source and summarizer for tests.
//!
//! Both record their calls so tests can assert on what was asked.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::error::{Result, TrendsError};
use crate::traits::{ScrapeSource, Summarizer};
use crate::types::{JobStatus, ScrapeOutcome};

/// A scrape source returning a fixed outcome.
#[derive(Clone)]
pub struct MockScrapeSource {
    status: JobStatus,
    items: Value,
    error: Option<String>,
    terms: Arc<RwLock<Vec<String>>>,
}

impl MockScrapeSource {
    /// A succeeded job with the given raw items.
    pub fn new(items: Value) -> Self {
        Self {
            status: JobStatus::Succeeded,
            items,
            error: None,
            terms: Arc::default(),
        }
    }

    /// Override the terminal status reported for the job.
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    /// Fail every scrape with a transport-style error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::new(Value::Array(Vec::new()))
        }
    }

    /// Terms passed to `scrape`, in call order.
    pub fn terms(&self) -> Vec<String> {
        self.terms.read().unwrap().clone()
    }
}

#[async_trait]
impl ScrapeSource for MockScrapeSource {
    async fn scrape(&self, term: &str) -> Result<ScrapeOutcome> {
        self.terms.write().unwrap().push(term.to_string());

        if let Some(message) = &self.error {
            return Err(TrendsError::Scrape(message.clone().into()));
        }

        Ok(ScrapeOutcome {
            run_id: Some(format!("mock-run-{}", self.terms.read().unwrap().len())),
            status: self.status,
            items: self.items.clone(),
        })
    }
}

/// A summarizer with scripted answers.
///
/// Queued responses are returned first; after that each call answers
/// `"summary {n}"` with a 1-based call number.
#[derive(Clone, Default)]
pub struct MockSummarizer {
    responses: Arc<RwLock<VecDeque<String>>>,
    prompts: Arc<RwLock<Vec<String>>>,
    fail: bool,
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue answers returned in order.
    pub fn with_responses<I, T>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.responses
            .write()
            .unwrap()
            .extend(responses.into_iter().map(Into::into));
        self
    }

    /// Fail every call.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Prompts received, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.read().unwrap().len()
    }
}

#[async_trait]
impl Summarizer for MockSummarizer {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.write().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if self.fail {
            return Err(TrendsError::Summarizer("mock summarizer failure".into()));
        }

        let queued = self.responses.write().unwrap().pop_front();
        Ok(queued.unwrap_or_else(|| format!("summary {call}")))
    }
}
