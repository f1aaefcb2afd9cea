//! Turning a raw scrape result collection into post records.
//!
//! The scraper returns one of two shapes. Usually the top level is an array
//! of hashtag pages, each carrying its own `topPosts` and `locationName`.
//! Sometimes the posts only show up nested elsewhere in the tree. Each shape
//! has its own [`ExtractionStrategy`]; strategies are tried in order and the
//! first one producing posts wins.

use serde_json::{Map, Value};

use crate::json::{count_field, find_all_values, opt_str_field, str_field, string_list_field};
use crate::types::PostRecord;

const TOP_POSTS_KEY: &str = "topPosts";
const LOCATION_KEY: &str = "locationName";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// `topPosts` of each top-level item, tagged with that item's location.
    PerItem,
    /// Every `topPosts` anywhere in the tree, no location.
    GlobalTopPosts,
}

impl ExtractionStrategy {
    /// Strategies in the order they are tried.
    pub const ORDERED: [ExtractionStrategy; 2] =
        [ExtractionStrategy::PerItem, ExtractionStrategy::GlobalTopPosts];

    /// The two response shapes store thumbnails under different keys.
    pub fn thumbnail_key(self) -> &'static str {
        match self {
            ExtractionStrategy::PerItem => "cover_artwork_thumbnail_uri",
            ExtractionStrategy::GlobalTopPosts => "thumbnailUrl",
        }
    }

    /// `None` when this strategy finds nothing to work with.
    pub fn extract(self, items: &Value) -> Option<Vec<PostRecord>> {
        let posts = match self {
            ExtractionStrategy::PerItem => self.per_item(items),
            ExtractionStrategy::GlobalTopPosts => self.global(items),
        };
        posts.filter(|p| !p.is_empty())
    }

    fn per_item(self, items: &Value) -> Option<Vec<PostRecord>> {
        let items = items.as_array()?;

        let mut posts = Vec::new();
        for item in items.iter().filter_map(Value::as_object) {
            let location = opt_str_field(item, LOCATION_KEY);
            let Some(top_posts) = item.get(TOP_POSTS_KEY).and_then(Value::as_array) else {
                continue;
            };

            posts.extend(
                top_posts
                    .iter()
                    .filter_map(Value::as_object)
                    .map(|post| self.record(post, location.clone())),
            );
        }
        Some(posts)
    }

    fn global(self, items: &Value) -> Option<Vec<PostRecord>> {
        let matches = find_all_values(items, TOP_POSTS_KEY);
        if matches.is_empty() {
            return None;
        }

        let posts = matches
            .into_iter()
            .flat_map(|found| -> Vec<&Map<String, Value>> {
                match found {
                    Value::Array(entries) => entries.iter().filter_map(Value::as_object).collect(),
                    Value::Object(post) => vec![post],
                    _ => Vec::new(),
                }
            })
            .map(|post| self.record(post, None))
            .collect();
        Some(posts)
    }

    fn record(self, post: &Map<String, Value>, location: Option<String>) -> PostRecord {
        PostRecord {
            location,
            url: str_field(post, "url"),
            caption: str_field(post, "caption"),
            hashtags: string_list_field(post, "hashtags"),
            thumbnail: str_field(post, self.thumbnail_key()),
            likes: count_field(post, "likesCount"),
        }
    }
}

/// Extract posts in encounter order. Never fails; an unrecognizable payload
/// yields no posts.
pub fn extract_posts(items: &Value) -> Vec<PostRecord> {
    for strategy in ExtractionStrategy::ORDERED {
        if let Some(posts) = strategy.extract(items) {
            tracing::debug!(?strategy, count = posts.len(), "Extracted posts");
            return posts;
        }
    }

    tracing::debug!("No posts found in scrape result");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_per_item_uses_cover_artwork_and_item_location() {
        let items = json!([
            {
                "locationName": "Lisbon",
                "topPosts": [
                    {
                        "url": "https://instagram.com/p/1",
                        "caption": "tram ride",
                        "hashtags": ["lisbon", "travel"],
                        "cover_artwork_thumbnail_uri": "https://cdn/cover1.jpg",
                        "thumbnailUrl": "https://cdn/wrong.jpg",
                        "likesCount": 120
                    }
                ]
            },
            {
                "topPosts": [{"url": "https://instagram.com/p/2", "caption": "no place"}]
            }
        ]);

        let posts = extract_posts(&items);
        assert_eq!(posts.len(), 2);

        assert_eq!(posts[0].location.as_deref(), Some("Lisbon"));
        assert_eq!(posts[0].thumbnail, "https://cdn/cover1.jpg");
        assert_eq!(posts[0].hashtags, ["lisbon", "travel"]);
        assert_eq!(posts[0].likes, 120);

        assert_eq!(posts[1].location, None);
        assert_eq!(posts[1].thumbnail, "");
        assert!(posts[1].hashtags.is_empty());
        assert_eq!(posts[1].likes, 0);
    }

    #[test]
    fn test_fallback_uses_thumbnail_url_and_no_location() {
        let items = json!([
            {
                "locationName": "Porto",
                "related": {
                    "topPosts": [
                        {
                            "url": "https://instagram.com/p/9",
                            "caption": "river",
                            "thumbnailUrl": "https://cdn/thumb9.jpg",
                            "cover_artwork_thumbnail_uri": "https://cdn/wrong.jpg",
                            "likesCount": 7
                        }
                    ]
                }
            }
        ]);

        assert_eq!(ExtractionStrategy::PerItem.extract(&items), None);

        let posts = extract_posts(&items);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].location, None);
        assert_eq!(posts[0].thumbnail, "https://cdn/thumb9.jpg");
        assert_eq!(posts[0].likes, 7);
    }

    #[test]
    fn test_fallback_not_used_when_primary_has_posts() {
        let items = json!([
            {"topPosts": [{"url": "a", "caption": "first"}]},
            {"nested": {"topPosts": [{"url": "b", "caption": "second"}]}}
        ]);

        let posts = extract_posts(&items);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].url, "a");
    }

    #[test]
    fn test_fallback_flattens_matches_in_tree_order() {
        let items = json!({
            "first": {"topPosts": [{"url": "a"}, "not a post", {"url": "b"}]},
            "second": [{"topPosts": {"url": "c"}}]
        });

        let urls: Vec<_> = extract_posts(&items).into_iter().map(|p| p.url).collect();
        assert_eq!(urls, ["a", "b", "c"]);
    }

    #[test]
    fn test_non_object_posts_are_skipped() {
        let items = json!([
            {"topPosts": [null, 3, "x", {"url": "ok", "likesCount": "15"}]}
        ]);

        let posts = extract_posts(&items);
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].likes, 15);
    }

    #[test]
    fn test_unexpected_payloads_yield_nothing() {
        for payload in [json!(null), json!("text"), json!(42), json!({}), json!([])] {
            assert!(extract_posts(&payload).is_empty(), "{payload}");
        }
        assert!(extract_posts(&json!([{"topPosts": "oops"}])).is_empty());
        assert!(extract_posts(&json!([{"topPosts": []}])).is_empty());
    }

    #[test]
    fn test_non_string_location_is_none() {
        let items = json!([{"locationName": 5, "topPosts": [{"url": "a"}]}]);
        assert_eq!(extract_posts(&items)[0].location, None);
    }
}
