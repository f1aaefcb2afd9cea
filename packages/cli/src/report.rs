//! Terminal rendering of an analysis: insight, captions, hashtags, posts.

use clap::ValueEnum;
use colored::Colorize;
use console::{measure_text_width, pad_str, truncate_str, Alignment};
use trends::{hashtag_frequencies, AnalysisResult, DisplayPost};

pub const TOP_CAPTIONS: usize = 10;
pub const TOP_HASHTAGS: usize = 10;
pub const MAX_POST_CARDS: usize = 9;
const GRID_COLUMNS: usize = 3;
const GRID_GAP: &str = "   ";
const CAPTION_PREVIEW_CHARS: usize = 100;
const CARD_CAPTION_LINES: usize = 4;
const BAR_WIDTH: usize = 30;
const MIN_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    /// Most liked first
    Likes,
    /// Order the posts were collected in
    Added,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Render the full report for a terminal `width` columns wide.
pub fn render(result: &AnalysisResult, sort: SortOrder, width: usize) -> String {
    let width = width.max(MIN_WIDTH);
    let mut lines = Vec::new();

    lines.extend(header(result, width));

    lines.extend(section("Insight", width));
    lines.push("Trending topics".bold().to_string());
    lines.extend(word_cloud(&result.hashtag_string, width));
    lines.push(String::new());
    lines.push("Trend analysis".bold().to_string());
    if result.insight.trim().is_empty() {
        lines.push(notice("No insight generated."));
    } else {
        for paragraph in result.insight.lines() {
            lines.extend(wrap(paragraph, width));
        }
    }

    lines.extend(section("Top captions", width));
    lines.extend(caption_cards(&result.captions, width));

    lines.extend(section("Top hashtags", width));
    lines.extend(hashtag_chart(&result.hashtags, width));

    lines.extend(section("Top posts", width));
    lines.extend(post_grid(&result.post_display_data, sort, width));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn header(result: &AnalysisResult, width: usize) -> Vec<String> {
    let rule = "═".repeat(width);
    let mut lines = vec![
        rule.bright_magenta().to_string(),
        format!("Instagram Trends: #{}", result.searched_term)
            .bright_magenta()
            .bold()
            .to_string(),
        rule.bright_magenta().to_string(),
    ];

    let mut meta = format!(
        "min likes: {}  ·  posts: {}",
        result.min_likes, result.post_count
    );
    if let Some(status) = result.job_status {
        meta.push_str(&format!("  ·  job: {}", status));
    }
    lines.push(meta.dimmed().to_string());

    if let Some(status) = result.job_status.filter(|s| !s.is_success()) {
        lines.push(
            format!("Scrape job ended {}: no usable data.", status)
                .bright_red()
                .to_string(),
        );
    }

    if !result.locations.is_empty() {
        let locations: Vec<&str> = result.locations.iter().map(String::as_str).collect();
        lines.extend(wrap(&format!("Locations: {}", locations.join(", ")), width));
    }

    lines
}

fn section(title: &str, width: usize) -> Vec<String> {
    let title = format!("── {} ", title);
    let fill = width.saturating_sub(measure_text_width(&title));
    vec![
        String::new(),
        format!("{}{}", title, "─".repeat(fill)).bright_cyan().bold().to_string(),
    ]
}

fn notice(text: &str) -> String {
    format!("  {}", text).yellow().to_string()
}

/// Hashtags in frequency order, earlier ones louder.
fn word_cloud(hashtag_string: &str, width: usize) -> Vec<String> {
    if hashtag_string.trim().is_empty() {
        return vec![notice("No hashtags available to generate word cloud.")];
    }

    let mut lines = Vec::new();
    let mut line = String::from(" ");
    let mut line_width = 1;

    for (rank, word) in hashtag_string.split_whitespace().enumerate() {
        let word_width = measure_text_width(word) + 2;
        if line_width + word_width > width && line_width > 1 {
            lines.push(std::mem::replace(&mut line, String::from(" ")));
            line_width = 1;
        }

        let styled = match rank {
            0..=2 => word.bright_magenta().bold().to_string(),
            3..=7 => word.magenta().to_string(),
            _ => word.dimmed().to_string(),
        };
        line.push(' ');
        line.push_str(&styled);
        line.push(' ');
        line_width += word_width;
    }
    lines.push(line);
    lines
}

fn caption_cards(captions: &[String], width: usize) -> Vec<String> {
    if captions.is_empty() {
        return vec![notice("No captions available.")];
    }

    let mut lines = Vec::new();
    for (i, caption) in captions.iter().take(TOP_CAPTIONS).enumerate() {
        lines.push(format!("[{}] Post #{}", i + 1, i + 1).bold().to_string());
        for text in caption.lines().filter(|l| !l.trim().is_empty()) {
            lines.extend(wrap(text, width.saturating_sub(4)).into_iter().map(|l| format!("    {}", l)));
        }
        lines.push(String::new());
    }
    lines.pop();
    lines
}

fn hashtag_chart(hashtags: &[String], width: usize) -> Vec<String> {
    let top: Vec<(String, usize)> = hashtag_frequencies(hashtags)
        .into_iter()
        .take(TOP_HASHTAGS)
        .collect();
    let Some(max_count) = top.first().map(|(_, count)| *count) else {
        return vec![notice("No hashtags available.")];
    };

    let label_width = top
        .iter()
        .map(|(tag, _)| measure_text_width(tag) + 1)
        .max()
        .unwrap_or(1)
        .min(width / 3);
    let bar_width = BAR_WIDTH.min(width.saturating_sub(label_width + 10)).max(1);

    top.iter()
        .map(|(tag, count)| {
            let filled = (count * bar_width / max_count).max(1);
            let tag = format!("#{}", tag);
            let label = fit(&tag, label_width);
            format!(
                "{} {} {}",
                label,
                "█".repeat(filled).bright_magenta(),
                count
            )
        })
        .collect()
}

fn post_grid(posts: &[DisplayPost], sort: SortOrder, width: usize) -> Vec<String> {
    if posts.is_empty() {
        return vec![notice("No post data available to display.")];
    }

    let mut ordered: Vec<&DisplayPost> = posts.iter().collect();
    if sort == SortOrder::Likes {
        ordered.sort_by(|a, b| b.likes.cmp(&a.likes));
    }

    let gap_width = measure_text_width(GRID_GAP) * (GRID_COLUMNS - 1);
    let card_width = (width.saturating_sub(gap_width) / GRID_COLUMNS).max(16);

    let cards: Vec<Vec<String>> = ordered
        .iter()
        .take(MAX_POST_CARDS)
        .enumerate()
        .map(|(i, post)| post_card(i + 1, post, card_width))
        .collect();

    let mut lines = Vec::new();
    for row in cards.chunks(GRID_COLUMNS) {
        let height = row.iter().map(Vec::len).max().unwrap_or(0);
        for line_no in 0..height {
            let cells: Vec<String> = row
                .iter()
                .map(|card| {
                    let text = card.get(line_no).map(String::as_str).unwrap_or("");
                    fit(text, card_width)
                })
                .collect();
            lines.push(cells.join(GRID_GAP).trim_end().to_string());
        }
        lines.push(String::new());
    }
    lines.pop();
    lines
}

fn post_card(number: usize, post: &DisplayPost, width: usize) -> Vec<String> {
    let mut lines = vec![
        format!("Post #{}  ♥ {}", number, post.likes),
        format!("Location: {}", post.location.as_deref().unwrap_or("Unknown")),
    ];

    let preview = caption_preview(&post.caption);
    let mut caption_lines = wrap(&format!("Caption: {}", preview), width);
    caption_lines.truncate(CARD_CAPTION_LINES);
    lines.extend(caption_lines);
    while lines.len() < 2 + CARD_CAPTION_LINES {
        lines.push(String::new());
    }

    lines.push(post.url.clone());
    lines
}

/// Pad `text` to exactly `width` columns; only text wider than that is cut.
fn fit(text: &str, width: usize) -> String {
    if measure_text_width(text) > width {
        let cut = truncate_str(text, width, "…");
        pad_str(&cut, width, Alignment::Left, None).into_owned()
    } else {
        pad_str(text, width, Alignment::Left, None).into_owned()
    }
}

/// First 100 characters of a caption, with `...` when cut.
pub fn caption_preview(caption: &str) -> String {
    let flat = caption.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > CAPTION_PREVIEW_CHARS {
        let cut: String = flat.chars().take(CAPTION_PREVIEW_CHARS).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

/// Greedy word wrap by display width; overlong words get their own line.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            measure_text_width(word)
        } else {
            measure_text_width(&line) + 1 + measure_text_width(word)
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use trends::JobStatus;

    fn plain() {
        colored::control::set_override(false);
    }

    fn display_post(n: u64, caption: &str) -> DisplayPost {
        DisplayPost {
            url: format!("https://www.instagram.com/p/{}/", n),
            caption: caption.to_string(),
            thumbnail: String::new(),
            location: None,
            likes: n,
        }
    }

    fn empty_result() -> AnalysisResult {
        AnalysisResult {
            searched_term: "travel".into(),
            min_likes: 0,
            job_status: Some(JobStatus::Failed),
            post_count: 0,
            captions: Vec::new(),
            hashtags: Vec::new(),
            insight: String::new(),
            locations: BTreeSet::new(),
            hashtag_string: String::new(),
            post_display_data: Vec::new(),
            url_list: Vec::new(),
            thumbnails: Vec::new(),
        }
    }

    #[test]
    fn test_empty_result_shows_notices() {
        plain();
        let out = render(&empty_result(), SortOrder::Likes, 100);

        assert!(out.contains("Instagram Trends: #travel"));
        assert!(out.contains("Scrape job ended FAILED: no usable data."));
        assert!(out.contains("No hashtags available to generate word cloud."));
        assert!(out.contains("No insight generated."));
        assert!(out.contains("No captions available."));
        assert!(out.contains("No hashtags available."));
        assert!(out.contains("No post data available to display."));
    }

    #[test]
    fn test_full_result_sections() {
        plain();
        let mut result = empty_result();
        result.job_status = Some(JobStatus::Succeeded);
        result.captions = (1..=12).map(|i| format!("caption number {}", i)).collect();
        result.hashtags = vec!["beach".into(), "sun".into(), "beach".into()];
        result.hashtag_string = "beach sun".into();
        result.insight = "Beaches dominate.".into();
        result.locations = ["Nice".to_string()].into_iter().collect();

        let out = render(&result, SortOrder::Likes, 100);

        assert!(!out.contains("no usable data"));
        assert!(out.contains("Locations: Nice"));
        assert!(out.contains("Beaches dominate."));
        assert!(out.contains("[10] Post #10"));
        assert!(!out.contains("[11] Post #11"));
        assert!(out.contains("#beach"));
        assert!(out.contains("████"));
    }

    #[test]
    fn test_grid_caps_at_nine_cards() {
        plain();
        let posts: Vec<DisplayPost> = (1..=12).map(|n| display_post(n, "hello")).collect();
        let lines = post_grid(&posts, SortOrder::Likes, 120);
        let out = lines.join("\n");

        assert!(out.contains("Post #9"));
        assert!(!out.contains("Post #10"));
        assert!(out.contains("♥ 12"));
        assert!(!out.contains("♥ 3 "));
        assert!(lines[0].contains("Post #1") && lines[0].contains("Post #3"));
    }

    #[test]
    fn test_grid_sort_orders() {
        plain();
        let posts = vec![display_post(5, "a"), display_post(50, "b")];

        let by_likes = post_grid(&posts, SortOrder::Likes, 120);
        assert!(by_likes[0].starts_with("Post #1  ♥ 50"));

        let as_added = post_grid(&posts, SortOrder::Added, 120);
        assert!(as_added[0].starts_with("Post #1  ♥ 5 "));
    }

    #[test]
    fn test_caption_preview_truncates() {
        let long = "x".repeat(150);
        let preview = caption_preview(&long);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));

        assert_eq!(caption_preview("short\ncaption"), "short caption");
        assert_eq!(caption_preview(&"é".repeat(100)), "é".repeat(100));
    }

    #[test]
    fn test_hashtag_chart_scales_to_top_count() {
        plain();
        let tags: Vec<String> = ["a", "a", "a", "a", "b", "b", "c"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let lines = hashtag_chart(&tags, 100);

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#a"));
        assert!(lines[0].ends_with(&format!("{} 4", "█".repeat(BAR_WIDTH))));
        assert!(lines[2].ends_with("█ 1") || lines[2].contains("███████ 1"));
    }

    #[test]
    fn test_hashtag_chart_keeps_full_labels() {
        plain();
        let tags: Vec<String> = ["a", "a", "beach"].iter().map(|s| s.to_string()).collect();
        let lines = hashtag_chart(&tags, 100);

        assert!(lines[0].starts_with("#a     █"), "{:?}", lines[0]);
        assert!(lines[1].starts_with("#beach █"), "{:?}", lines[1]);
        assert!(!lines.join("\n").contains('…'));
    }

    #[test]
    fn test_hashtag_chart_cuts_overlong_labels() {
        plain();
        let tags = vec!["x".repeat(80)];
        let lines = hashtag_chart(&tags, 60);

        assert!(lines[0].contains('…'));
        assert!(lines[0].ends_with("█ 1"));
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("abcd", 4), "abcd");
        assert_eq!(fit("ab", 4), "ab  ");
        let cut = fit("abcdefgh", 4);
        assert!(cut.ends_with('…'));
        assert_eq!(measure_text_width(&cut), 4);
    }

    #[test]
    fn test_grid_keeps_line_that_fills_card() {
        plain();
        // 114 columns: (114 - 6) / 3 = 36 per card
        let caption = format!("{} {}", "c".repeat(8), "w".repeat(36));
        let lines = post_grid(&[display_post(1, &caption)], SortOrder::Likes, 114);

        assert!(lines.iter().any(|l| l == &"w".repeat(36)), "{:?}", lines);
        assert!(!lines.join("\n").contains('…'));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), ["one two", "three"]);
        assert_eq!(wrap("", 10), [""]);
        assert_eq!(wrap("supercalifragilistic word", 5), ["supercalifragilistic", "word"]);
    }
}
