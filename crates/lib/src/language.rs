//! Language detection for picking the reply language of the generative fallback.

use std::ops::RangeInclusive;

/// The Devanagari Unicode block.
const DEVANAGARI: RangeInclusive<char> = '\u{0900}'..='\u{097F}';

/// The language a message is answered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
}

/// Returns true if the text contains any Devanagari character.
pub fn is_hindi(text: &str) -> bool {
    text.chars().any(|c| DEVANAGARI.contains(&c))
}

pub fn detect_language(text: &str) -> Language {
    if is_hindi(text) {
        Language::Hindi
    } else {
        Language::English
    }
}
