//! # Excerpts
//!
//! Website pages are long; a matched page is answered with the few sentences
//! that mention the words of the question.

use regex::Regex;
use std::{cmp::Reverse, sync::OnceLock};

/// How many sentences a search answer quotes from the matched page.
pub const DEFAULT_EXCERPT_SENTENCES: usize = 3;

fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"[.?!]\s+").expect("sentence boundary pattern is valid"))
}

/// Splits text into sentences at whitespace following `.`, `?` or `!`.
///
/// The terminating punctuation stays with its sentence.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let text = text.trim();
    let mut sentences = Vec::new();
    let mut start = 0;
    for boundary in sentence_boundary().find_iter(text) {
        sentences.push(&text[start..boundary.start() + 1]);
        start = boundary.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Picks the sentences of `content` most relevant to `query`.
///
/// A sentence scores one point for every query word it contains. Sentences that
/// contain none are dropped; the rest are ordered by score (ties by text, in
/// descending order) and the first `max_sentences` are joined with spaces. When
/// nothing matches, the opening `max_sentences` sentences are returned instead.
pub fn excerpt(content: &str, query: &str, max_sentences: usize) -> String {
    let sentences = split_sentences(content);
    let query_lower = query.to_lowercase();
    let query_words: Vec<&str> = query_lower.split_whitespace().collect();

    let mut scored: Vec<(usize, &str)> = sentences
        .iter()
        .filter_map(|sentence| {
            let lowered = sentence.to_lowercase();
            let score = query_words
                .iter()
                .filter(|word| lowered.contains(*word))
                .count();
            (score > 0).then_some((score, *sentence))
        })
        .collect();

    if scored.is_empty() {
        return sentences
            .into_iter()
            .take(max_sentences)
            .collect::<Vec<_>>()
            .join(" ");
    }

    scored.sort_by_key(|&(score, sentence)| Reverse((score, sentence)));
    scored
        .into_iter()
        .take(max_sentences)
        .map(|(_, sentence)| sentence)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the answer for a matched page: the excerpt, plus a link when the page has one.
pub fn format_search_answer(
    content: &str,
    url: Option<&str>,
    query: &str,
    max_sentences: usize,
) -> String {
    let mut answer = excerpt(content, query, max_sentences);
    if let Some(url) = url.filter(|u| !u.is_empty()) {
        answer.push_str(&format!("\n\n🔗 [More Info]({url})"));
    }
    answer
}
