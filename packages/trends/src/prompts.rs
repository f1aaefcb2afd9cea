//! LLM prompts for trend insight.
//!
//! Three calls per analysis: captions, hashtags, then a combined report
//! built from the first two answers.

/// Prompt over the captions of the top posts.
pub const CAPTION_TRENDS_PROMPT: &str = r#"Below are captions from top-performing Instagram posts for the hashtag "{term}".

Use them to identify the underlying trends in the "{term}" space. Do not summarize individual captions. Instead describe:

* The activities, ideas and content themes people engage with
* What is driving attention and interaction
* How people express or showcase "{term}"

Answer in en-US English and keep it insightful.

Captions:
"#;

/// Prompt over the hashtags attached to the top posts.
pub const HASHTAG_TRENDS_PROMPT: &str = r#"Below are hashtags used on top-performing Instagram posts for the hashtag "{term}".

Use them to identify real-world trends in the "{term}" space. Focus on:

* Recurring patterns and subtopics
* Emerging communities, movements or events
* The kind of content these hashtags are attached to

Hashtags:
"#;

/// Prompt combining the caption and hashtag analyses into one report.
pub const INSIGHT_REPORT_PROMPT: &str = r#"I analyzed trending Instagram posts for the hashtag "{term}" twice: once from their captions and once from their hashtags. Both analyses follow.

Combine them into a single insight report on what is actually trending in "{term}", based on real post behavior rather than wording alone. Make it comprehensive, engaging and clearly structured, in en-US English.
"#;

fn with_term(template: &str, term: &str) -> String {
    template.replace("{term}", term)
}

/// Caption prompt with captions appended one per line.
pub fn format_caption_prompt(term: &str, captions: &[String]) -> String {
    let mut prompt = with_term(CAPTION_TRENDS_PROMPT, term);
    prompt.push_str(&captions.join("\n"));
    prompt
}

/// Hashtag prompt with hashtags appended one per line.
pub fn format_hashtag_prompt(term: &str, hashtags: &[String]) -> String {
    let mut prompt = with_term(HASHTAG_TRENDS_PROMPT, term);
    prompt.push_str(&hashtags.join("\n"));
    prompt
}

/// Final report prompt embedding both earlier answers.
pub fn format_insight_prompt(term: &str, caption_analysis: &str, hashtag_analysis: &str) -> String {
    format!(
        "{}\nCaption analysis:\n{}\n\nHashtag analysis:\n{}",
        with_term(INSIGHT_REPORT_PROMPT, term),
        caption_analysis,
        hashtag_analysis
    )
}
