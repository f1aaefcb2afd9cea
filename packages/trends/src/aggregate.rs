//! Aggregates over a ranked post list.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::json::find_all_values;
use crate::types::{Aggregates, DisplayPost, PostRecord};

/// How many hashtags go into the word-cloud string.
pub const HASHTAG_STRING_LIMIT: usize = 15;

/// Derive every aggregate the report needs.
///
/// `raw` is the unfiltered scrape result; locations come from the whole
/// tree, not from the posts, so the two can disagree.
pub fn compute_aggregates(posts: &[PostRecord], raw: &Value) -> Aggregates {
    let captions = non_empty(posts.iter().map(|p| p.caption.as_str()));
    let urls = non_empty(posts.iter().map(|p| p.url.as_str()));
    let thumbnails = non_empty(posts.iter().map(|p| p.thumbnail.as_str()));

    let hashtags: Vec<String> = posts
        .iter()
        .flat_map(|p| p.hashtags.iter().cloned())
        .collect();

    let display_posts = posts
        .iter()
        .filter(|p| !p.url.is_empty() && !p.caption.is_empty())
        .map(DisplayPost::from)
        .collect();

    let hashtag_string = top_hashtags(&hashtags, HASHTAG_STRING_LIMIT).join(" ");

    Aggregates {
        captions,
        hashtags,
        urls,
        thumbnails,
        display_posts,
        hashtag_string,
        locations: unique_locations(raw),
    }
}

/// `(hashtag, count)` pairs, most frequent first; ties keep first-seen order.
pub fn hashtag_frequencies(hashtags: &[String]) -> Vec<(String, usize)> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for tag in hashtags {
        *counts.entry(tag.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

/// The `limit` most frequent distinct hashtags.
pub fn top_hashtags(hashtags: &[String], limit: usize) -> Vec<String> {
    hashtag_frequencies(hashtags)
        .into_iter()
        .take(limit)
        .map(|(tag, _)| tag)
        .collect()
}

/// Every non-empty string `locationName` anywhere in the raw result.
pub fn unique_locations(raw: &Value) -> BTreeSet<String> {
    find_all_values(raw, "locationName")
        .into_iter()
        .filter_map(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.filter(|v| !v.is_empty()).map(str::to_string).collect()
}
