//! Minimum-likes filtering and likes ranking.

use crate::types::PostRecord;

/// Keep posts with at least `min_likes`, most-liked first.
///
/// When the threshold would drop every post, the threshold is ignored and
/// all posts are ranked instead. Equal likes keep their incoming order.
pub fn filter_and_rank(posts: Vec<PostRecord>, min_likes: u64) -> Vec<PostRecord> {
    let total = posts.len();
    let (kept, dropped): (Vec<_>, Vec<_>) =
        posts.into_iter().partition(|post| post.likes >= min_likes);

    let mut ranked = if kept.is_empty() {
        if total > 0 {
            tracing::debug!(min_likes, total, "No post meets the threshold, using all posts");
        }
        dropped
    } else {
        kept
    };

    ranked.sort_by(|a, b| b.likes.cmp(&a.likes));
    ranked
}
