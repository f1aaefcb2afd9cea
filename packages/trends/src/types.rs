//! Records produced by extraction and the per-search analysis result.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One normalized scraped post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub location: Option<String>,
    pub url: String,
    pub caption: String,
    pub hashtags: Vec<String>,
    /// Empty when the source had no thumbnail.
    pub thumbnail: String,
    pub likes: u64,
}

/// A post eligible for a display card: it has both a url and a caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPost {
    pub url: String,
    pub caption: String,
    pub thumbnail: String,
    pub location: Option<String>,
    pub likes: u64,
}

impl From<&PostRecord> for DisplayPost {
    fn from(post: &PostRecord) -> Self {
        Self {
            url: post.url.clone(),
            caption: post.caption.clone(),
            thumbnail: post.thumbnail.clone(),
            location: post.location.clone(),
            likes: post.likes,
        }
    }
}

/// Status of a scrape job as seen by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    #[serde(rename = "RUNNING")]
    Running,
    #[serde(rename = "SUCCEEDED")]
    Succeeded,
    #[serde(rename = "FAILED")]
    Failed,
    #[serde(rename = "ABORTED")]
    Aborted,
    #[serde(rename = "TIMED-OUT")]
    TimedOut,
}

impl JobStatus {
    pub fn is_success(self) -> bool {
        self == JobStatus::Succeeded
    }

    pub fn is_terminal(self) -> bool {
        self != JobStatus::Running
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JobStatus::Running => "RUNNING",
            JobStatus::Succeeded => "SUCCEEDED",
            JobStatus::Failed => "FAILED",
            JobStatus::Aborted => "ABORTED",
            JobStatus::TimedOut => "TIMED-OUT",
        };
        f.write_str(s)
    }
}

/// Raw output of one scrape job.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub run_id: Option<String>,
    pub status: JobStatus,
    /// The raw result collection, normally a JSON array of items.
    pub items: Value,
}

/// Everything derived from a ranked post list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub captions: Vec<String>,
    pub hashtags: Vec<String>,
    pub urls: Vec<String>,
    pub thumbnails: Vec<String>,
    pub display_posts: Vec<DisplayPost>,
    pub hashtag_string: String,
    pub locations: BTreeSet<String>,
}

/// The result of one search at one minimum-likes setting.
///
/// Built fresh on every search or filter change and never mutated in
/// place; callers replace the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub searched_term: String,
    pub min_likes: u64,
    /// `None` for analyses of a saved dataset.
    pub job_status: Option<JobStatus>,
    pub post_count: usize,
    pub captions: Vec<String>,
    pub hashtags: Vec<String>,
    pub insight: String,
    pub locations: BTreeSet<String>,
    pub hashtag_string: String,
    pub post_display_data: Vec<DisplayPost>,
    pub url_list: Vec<String>,
    pub thumbnails: Vec<String>,
}

impl AnalysisResult {
    pub fn new(
        searched_term: impl Into<String>,
        min_likes: u64,
        job_status: Option<JobStatus>,
        post_count: usize,
        aggregates: Aggregates,
    ) -> Self {
        Self {
            searched_term: searched_term.into(),
            min_likes,
            job_status,
            post_count,
            captions: aggregates.captions,
            hashtags: aggregates.hashtags,
            insight: String::new(),
            locations: aggregates.locations,
            hashtag_string: aggregates.hashtag_string,
            post_display_data: aggregates.display_posts,
            url_list: aggregates.urls,
            thumbnails: aggregates.thumbnails,
        }
    }

    pub fn with_insight(mut self, insight: impl Into<String>) -> Self {
        self.insight = insight.into();
        self
    }

    /// True when there is nothing to summarize.
    pub fn has_text(&self) -> bool {
        !self.captions.is_empty() || !self.hashtags.is_empty()
    }
}
