//! Search → extract → summarize.

use serde_json::Value;

use crate::aggregate::compute_aggregates;
use crate::error::{Result, TrendsError};
use crate::extract::extract_posts;
use crate::prompts::{format_caption_prompt, format_hashtag_prompt, format_insight_prompt};
use crate::rank::filter_and_rank;
use crate::traits::{ScrapeSource, Summarizer};
use crate::types::{AnalysisResult, JobStatus, ScrapeOutcome};

/// Trim a user-typed term and drop a leading `#`.
pub fn normalize_term(term: &str) -> Result<String> {
    let term = term.trim().trim_start_matches('#').trim();
    if term.is_empty() {
        return Err(TrendsError::InvalidTerm {
            reason: "search term is empty".into(),
        });
    }
    Ok(term.to_string())
}

/// Build an analysis from raw scrape items, without insight text.
///
/// A job that did not succeed contributes no data, whatever its dataset
/// holds. `job_status` is `None` for saved datasets.
pub fn build_analysis(
    term: &str,
    items: &Value,
    job_status: Option<JobStatus>,
    min_likes: u64,
) -> AnalysisResult {
    let empty = Value::Array(Vec::new());
    let items = match job_status {
        Some(status) if !status.is_success() => {
            tracing::warn!(%status, term, "Scrape job did not succeed, no usable data");
            &empty
        }
        _ => items,
    };

    let posts = filter_and_rank(extract_posts(items), min_likes);
    let aggregates = compute_aggregates(&posts, items);

    tracing::info!(
        term,
        min_likes,
        posts = posts.len(),
        captions = aggregates.captions.len(),
        hashtags = aggregates.hashtags.len(),
        locations = aggregates.locations.len(),
        "Built analysis"
    );

    AnalysisResult::new(term, min_likes, job_status, posts.len(), aggregates)
}

/// Generate the insight report for an analysis.
///
/// Empty when the analysis has neither captions nor hashtags; the
/// summarizer is not called in that case.
pub async fn generate_insight<M>(summarizer: &M, result: &AnalysisResult) -> Result<String>
where
    M: Summarizer + ?Sized,
{
    if !result.has_text() {
        tracing::info!(term = %result.searched_term, "Nothing to summarize");
        return Ok(String::new());
    }

    let term = result.searched_term.as_str();

    let caption_analysis = summarizer
        .generate(&format_caption_prompt(term, &result.captions))
        .await?;
    tracing::debug!(chars = caption_analysis.len(), "Caption analysis done");

    let hashtag_analysis = summarizer
        .generate(&format_hashtag_prompt(term, &result.hashtags))
        .await?;
    tracing::debug!(chars = hashtag_analysis.len(), "Hashtag analysis done");

    summarizer
        .generate(&format_insight_prompt(term, &caption_analysis, &hashtag_analysis))
        .await
}

/// Runs a full analysis against a scrape source and a summarizer.
pub struct TrendAnalyzer<S, M> {
    source: S,
    summarizer: M,
}

impl<S: ScrapeSource, M: Summarizer> TrendAnalyzer<S, M> {
    pub fn new(source: S, summarizer: M) -> Self {
        Self { source, summarizer }
    }

    /// Scrape the term and analyze the result.
    ///
    /// The outcome is returned alongside so the caller can re-filter the
    /// same items later without scraping again.
    pub async fn analyze(&self, term: &str, min_likes: u64) -> Result<(ScrapeOutcome, AnalysisResult)> {
        let term = normalize_term(term)?;

        let outcome = self.source.scrape(&term).await?;
        tracing::info!(
            term = %term,
            run_id = outcome.run_id.as_deref().unwrap_or("-"),
            status = %outcome.status,
            "Scrape finished"
        );

        let result = self
            .analyze_items(&term, &outcome.items, Some(outcome.status), min_likes)
            .await?;
        Ok((outcome, result))
    }

    /// Analyze already-fetched items, e.g. after the filter changed.
    pub async fn analyze_items(
        &self,
        term: &str,
        items: &Value,
        job_status: Option<JobStatus>,
        min_likes: u64,
    ) -> Result<AnalysisResult> {
        let result = build_analysis(term, items, job_status, min_likes);
        let insight = generate_insight(&self.summarizer, &result).await?;
        Ok(result.with_insight(insight))
    }
}
