//! # Application Configuration
//!
//! This module defines the configuration structure for `dhonkbot-server` and the
//! logic for loading it from an optional `config.yml` file and environment
//! variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use dhonkbot::{
    excerpt::DEFAULT_EXCERPT_SENTENCES,
    providers::{
        ai::embedding::DEFAULT_EMBEDDING_MODEL,
        db::{postgres::DEFAULT_DOCUMENTS_TABLE, storage::DEFAULT_DOCUMENT_LIMIT},
    },
    search::DEFAULT_SIMILARITY_THRESHOLD,
    ProviderConfig,
};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use tracing::info;

/// The environment prefix for nested overrides, e.g. `DHONKBOT_CHAT__MODEL_NAME`.
pub const ENV_PREFIX: &str = "DHONKBOT";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Deserialize, Clone)]
pub struct AppConfig {
    /// Loaded from the `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_db_host")]
    pub db_host: String,
    #[serde(default)]
    pub db_name: String,
    #[serde(default)]
    pub db_user: String,
    #[serde(default)]
    pub db_password: Option<String>,
    #[serde(default = "default_db_port")]
    pub db_port: u16,
    /// Used for the chat and embedding endpoints unless they carry their own key.
    #[serde(default)]
    pub openai_api_key: Option<String>,
    #[serde(default)]
    pub chat: ProviderConfig,
    #[serde(default)]
    pub embedding: EmbeddingConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

// Secrets stay out of the startup log.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("db_host", &self.db_host)
            .field("db_name", &self.db_name)
            .field("db_user", &self.db_user)
            .field("db_port", &self.db_port)
            .field("chat_provider", &self.chat.provider)
            .field("chat_model", &self.chat.model_name)
            .field("embedding_model", &self.embedding.model_name)
            .field("search", &self.search)
            .finish_non_exhaustive()
    }
}

fn default_port() -> u16 {
    5000
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    5432
}

/// Configuration for the text embedding endpoint.
#[derive(Debug, Deserialize, Clone)]
pub struct EmbeddingConfig {
    #[serde(default = "default_embedding_url")]
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_embedding_model")]
    pub model_name: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            api_url: default_embedding_url(),
            api_key: None,
            model_name: default_embedding_model(),
        }
    }
}

fn default_embedding_url() -> String {
    "https://api.openai.com/v1/embeddings".to_string()
}

fn default_embedding_model() -> String {
    DEFAULT_EMBEDDING_MODEL.to_string()
}

/// Tuning for the semantic search stage.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    #[serde(default = "default_excerpt_sentences")]
    pub excerpt_sentences: usize,
    #[serde(default)]
    pub cache_embeddings: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            table: default_table(),
            limit: default_limit(),
            threshold: default_threshold(),
            excerpt_sentences: default_excerpt_sentences(),
            cache_embeddings: false,
        }
    }
}

fn default_table() -> String {
    DEFAULT_DOCUMENTS_TABLE.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_DOCUMENT_LIMIT
}

fn default_threshold() -> f32 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_excerpt_sentences() -> usize {
    DEFAULT_EXCERPT_SENTENCES
}

/// Optional replacements for the generative fallback's system prompts.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct PromptsConfig {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub hindi: Option<String>,
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// - Without an override, `config.yml` next to the crate manifest is used when it
///   exists; otherwise the compiled-in defaults apply.
/// - Top-level keys are overridden by `PORT`, `DB_HOST`, `DB_NAME`, `DB_USER`,
///   `DB_PASSWORD`, `DB_PORT` and `OPENAI_API_KEY`.
/// - Nested keys are overridden by `DHONKBOT_...` variables (e.g.
///   `DHONKBOT_SEARCH__THRESHOLD`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            let default_path = format!("{}/config.yml", env!("CARGO_MANIFEST_DIR"));
            if let Some(content) = read_and_substitute(&default_path)? {
                info!("Loading configuration from '{default_path}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            } else {
                info!("'{default_path}' not found. Using defaults and environment only.");
            }
        }
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // An empty substitution leaves an empty string behind; treat it as unset.
    config.openai_api_key = config.openai_api_key.filter(|key| !key.is_empty());
    config.db_password = config.db_password.filter(|password| !password.is_empty());
    if config.chat.api_key.as_deref().map_or(true, str::is_empty) {
        config.chat.api_key = config.openai_api_key.clone();
    }
    if config.embedding.api_key.as_deref().map_or(true, str::is_empty) {
        config.embedding.api_key = config.openai_api_key.clone();
    }

    Ok(config)
}
