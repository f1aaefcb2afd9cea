//! Hashtag trend analysis.
//!
//! Turns the loosely-structured result of a social-media scrape job into
//! ranked post records and the aggregates a trend report needs, then asks a
//! language model for an insight report.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trends::{ApifySource, TrendAnalyzer};
//!
//! let analyzer = TrendAnalyzer::new(ApifySource::new(apify, limits), llm);
//! let (outcome, result) = analyzer.analyze("#travel", 100).await?;
//!
//! // Filter changed: rebuild from the same items, no new scrape.
//! let stricter = analyzer
//!     .analyze_items(&result.searched_term, &outcome.items, Some(outcome.status), 1_000)
//!     .await?;
//! ```
//!
//! # Modules
//!
//! - [`json`] - Key search and lenient field reads over raw JSON
//! - [`extract`] - Post extraction strategies
//! - [`rank`] - Minimum-likes filter and ranking
//! - [`aggregate`] - Captions, hashtag frequencies, locations, display subset
//! - [`prompts`] - Insight prompts
//! - [`pipeline`] - Scrape → extract → summarize orchestration
//! - [`traits`] - `ScrapeSource` and `Summarizer` seams
//! - [`sources`] - Implementations backed by the Apify and LLM clients
//! - [`testing`] - Mock implementations for testing

pub mod aggregate;
pub mod error;
pub mod extract;
pub mod json;
pub mod pipeline;
pub mod prompts;
pub mod rank;
pub mod sources;
pub mod testing;
pub mod traits;
pub mod types;

pub use aggregate::{compute_aggregates, hashtag_frequencies, top_hashtags, unique_locations};
pub use error::{Result, TrendsError};
pub use extract::{extract_posts, ExtractionStrategy};
pub use json::find_all_values;
pub use pipeline::{build_analysis, generate_insight, normalize_term, TrendAnalyzer};
pub use rank::filter_and_rank;
pub use sources::ApifySource;
pub use traits::{ScrapeSource, Summarizer};
pub use types::{AnalysisResult, Aggregates, DisplayPost, JobStatus, PostRecord, ScrapeOutcome};
