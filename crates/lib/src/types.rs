//! # Shared Types
//!
//! Data structures passed between the storage, search, and pipeline layers.

use serde::{Deserialize, Serialize};

/// A row of the content store: one page of the brand's website.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl Document {
    pub fn new(title: impl Into<String>, url: Option<&str>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.map(String::from),
            content: Some(content.into()),
        }
    }

    /// The document text, or `None` when it is missing or only whitespace.
    pub fn searchable_content(&self) -> Option<&str> {
        self.content.as_deref().filter(|c| !c.trim().is_empty())
    }
}

/// The best document found by a similarity search together with its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// Configuration for a generative AI provider instance.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// The type of provider ("openai" or "gemini").
    #[serde(default = "default_provider")]
    pub provider: String,
    /// The API URL. Optional when it can be derived from the provider type.
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_chat_model")]
    pub model_name: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_url: None,
            api_key: None,
            model_name: default_chat_model(),
            temperature: default_temperature(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    crate::providers::ai::openai::DEFAULT_TEMPERATURE
}
