//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup. The state holds the configuration and the chat
//! pipeline, with its providers and content store already wired in, so every
//! request handler works from the same instances.

use crate::config::AppConfig;
use dhonkbot::{
    providers::{
        ai::ApiEmbeddingProvider,
        db::{
            postgres::{PostgresDocumentStore, PostgresSettings},
            storage::DocumentStore,
        },
        factory::create_ai_provider,
    },
    prompts::SystemPrompts,
    search::SearchOptions,
    ChatPipeline,
};
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The application's configuration.
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<ChatPipeline>,
}

/// Builds the shared application state, reading pages from PostgreSQL.
pub fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let settings = PostgresSettings {
        host: config.db_host.clone(),
        port: config.db_port,
        database: config.db_name.clone(),
        user: config.db_user.clone(),
        password: config.db_password.clone(),
    };
    let store = PostgresDocumentStore::new(settings, &config.search.table)?;
    build_app_state_with_store(config, Box::new(store))
}

/// Builds the shared application state around an already constructed content store.
///
/// - The chat provider comes from the `chat` section.
/// - The embedder speaks to the `embedding` endpoint.
/// - Search tuning comes from the `search` section.
/// - Prompts left out of the `prompts` section keep their built-in text.
pub fn build_app_state_with_store(
    config: AppConfig,
    store: Box<dyn DocumentStore>,
) -> anyhow::Result<AppState> {
    let ai_provider = create_ai_provider(&config.chat)?;
    let embedder = ApiEmbeddingProvider::new(
        config.embedding.api_url.clone(),
        config.embedding.model_name.clone(),
        config.embedding.api_key.clone(),
    )?;

    let defaults = SystemPrompts::default();
    let system_prompts = SystemPrompts {
        english: config.prompts.english.clone().unwrap_or(defaults.english),
        hindi: config.prompts.hindi.clone().unwrap_or(defaults.hindi),
    };

    let pipeline = ChatPipeline::builder()
        .ai_provider(ai_provider)
        .embedding_provider(Box::new(embedder))
        .document_store(store)
        .search_options(SearchOptions {
            limit: config.search.limit,
            threshold: config.search.threshold,
        })
        .cache_embeddings(config.search.cache_embeddings)
        .excerpt_sentences(config.search.excerpt_sentences)
        .system_prompts(system_prompts)
        .build()?;
    info!(?pipeline, "Chat pipeline ready");

    Ok(AppState {
        config: Arc::new(config),
        pipeline: Arc::new(pipeline),
    })
}
