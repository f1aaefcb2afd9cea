use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the apify/instagram-scraper actor in hashtag search mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HashtagSearchInput {
    pub add_parent_data: bool,
    pub enhance_user_search_with_facebook_page: bool,
    #[serde(rename = "isUserReelFeedURL")]
    pub is_user_reel_feed_url: bool,
    #[serde(rename = "isUserTaggedFeedURL")]
    pub is_user_tagged_feed_url: bool,
    pub results_limit: u32,
    pub results_type: String,
    pub search: String,
    pub search_limit: u32,
    pub search_type: String,
}

impl HashtagSearchInput {
    pub fn new(term: impl Into<String>, limits: &SearchLimits) -> Self {
        Self {
            add_parent_data: false,
            enhance_user_search_with_facebook_page: false,
            is_user_reel_feed_url: false,
            is_user_tagged_feed_url: false,
            results_limit: limits.results_limit,
            results_type: "details".to_string(),
            search: term.into(),
            search_limit: limits.search_limit,
            search_type: "hashtag".to_string(),
        }
    }
}

/// How much the scraper fetches per search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    /// Max results per matched hashtag page.
    pub results_limit: u32,
    /// Max hashtag pages matched by the search term.
    pub search_limit: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            results_limit: 200,
            search_limit: 5,
        }
    }
}

/// Lifecycle status of an actor run, as reported by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum RunStatus {
    Ready,
    Running,
    Succeeded,
    Failed,
    Aborting,
    Aborted,
    TimingOut,
    TimedOut,
    Other(String),
}

impl RunStatus {
    /// Terminal statuses need no further polling.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            RunStatus::Succeeded | RunStatus::Failed | RunStatus::Aborted | RunStatus::TimedOut
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunStatus::Succeeded)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Ready => "READY",
            RunStatus::Running => "RUNNING",
            RunStatus::Succeeded => "SUCCEEDED",
            RunStatus::Failed => "FAILED",
            RunStatus::Aborting => "ABORTING",
            RunStatus::Aborted => "ABORTED",
            RunStatus::TimingOut => "TIMING-OUT",
            RunStatus::TimedOut => "TIMED-OUT",
            RunStatus::Other(s) => s,
        }
    }
}

impl From<String> for RunStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "READY" => RunStatus::Ready,
            "RUNNING" => RunStatus::Running,
            "SUCCEEDED" => RunStatus::Succeeded,
            "FAILED" => RunStatus::Failed,
            "ABORTING" => RunStatus::Aborting,
            "ABORTED" => RunStatus::Aborted,
            "TIMING-OUT" => RunStatus::TimingOut,
            "TIMED-OUT" => RunStatus::TimedOut,
            _ => RunStatus::Other(s),
        }
    }
}

impl From<RunStatus> for String {
    fn from(status: RunStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: RunStatus,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// A finished hashtag scrape: the terminal run plus its raw dataset items.
#[derive(Debug, Clone)]
pub struct HashtagScrape {
    pub run: RunData,
    pub items: Vec<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hashtag_input_wire_names() {
        let input = HashtagSearchInput::new("travel", &SearchLimits::default());
        let value = serde_json::to_value(&input).unwrap();

        assert_eq!(
            value,
            json!({
                "addParentData": false,
                "enhanceUserSearchWithFacebookPage": false,
                "isUserReelFeedURL": false,
                "isUserTaggedFeedURL": false,
                "resultsLimit": 200,
                "resultsType": "details",
                "search": "travel",
                "searchLimit": 5,
                "searchType": "hashtag"
            })
        );
    }

    #[test]
    fn test_run_status_parsing() {
        let cases = [
            ("READY", RunStatus::Ready, false),
            ("RUNNING", RunStatus::Running, false),
            ("SUCCEEDED", RunStatus::Succeeded, true),
            ("FAILED", RunStatus::Failed, true),
            ("ABORTING", RunStatus::Aborting, false),
            ("ABORTED", RunStatus::Aborted, true),
            ("TIMING-OUT", RunStatus::TimingOut, false),
            ("TIMED-OUT", RunStatus::TimedOut, true),
        ];

        for (raw, expected, terminal) in cases {
            let status: RunStatus = serde_json::from_value(json!(raw)).unwrap();
            assert_eq!(status, expected);
            assert_eq!(status.is_terminal(), terminal, "{raw}");
            assert_eq!(status.to_string(), raw);
        }
    }

    #[test]
    fn test_unknown_status_is_not_terminal() {
        let status: RunStatus = serde_json::from_value(json!("PAUSED")).unwrap();
        assert_eq!(status, RunStatus::Other("PAUSED".into()));
        assert!(!status.is_terminal());
        assert_eq!(status.as_str(), "PAUSED");
    }

    #[test]
    fn test_run_data_deserialize() {
        let body = json!({
            "data": {
                "id": "run-1",
                "actId": "ignored",
                "status": "SUCCEEDED",
                "defaultDatasetId": "ds-9",
                "startedAt": "2024-05-01T10:00:00.000Z",
                "finishedAt": null
            }
        });

        let resp: ApiResponse<RunData> = serde_json::from_value(body).unwrap();
        assert_eq!(resp.data.id, "run-1");
        assert!(resp.data.status.is_success());
        assert_eq!(resp.data.default_dataset_id, "ds-9");
        assert!(resp.data.started_at.is_some());
        assert!(resp.data.finished_at.is_none());
    }
}
