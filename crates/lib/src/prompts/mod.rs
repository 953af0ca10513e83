//! # Prompt Templates
//!
//! System prompts for the generative fallback, one per reply language.

use crate::language::Language;

/// The system prompt for messages written in English (or any non-Devanagari script).
pub const ENGLISH_SYSTEM_PROMPT: &str =
    "You are ONLY an AI assistant for Dhonk Craft. Be concise and helpful.";

/// The system prompt for messages containing Devanagari text.
pub const HINDI_SYSTEM_PROMPT: &str =
    "आप Dhonk Craft के लिए एक सहायक बॉट हैं। संक्षिप्त और मददगार जवाब दें।";

/// System prompts keyed by reply language. Both can be overridden from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemPrompts {
    pub english: String,
    pub hindi: String,
}

impl Default for SystemPrompts {
    fn default() -> Self {
        Self {
            english: ENGLISH_SYSTEM_PROMPT.to_string(),
            hindi: HINDI_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl SystemPrompts {
    pub fn for_language(&self, language: Language) -> &str {
        match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        }
    }
}
