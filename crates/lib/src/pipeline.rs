//! # Response Pipeline
//!
//! Resolves a customer message through a fixed chain of stages. Each stage either
//! answers, which ends the chain, or defers to the next one:
//!
//! 1.  **Rules**: scripted intents, then contact lookups (see [`RuleTable`]).
//! 2.  **Search**: semantic search over the website pages. Failures here are logged
//!     and treated as "no match".
//! 3.  **Generative**: a single call to the chat model with a system prompt in the
//!     language of the message. Failures here are returned to the caller.
//!
//! An empty message is rejected before any stage runs.

use crate::{
    excerpt::{format_search_answer, DEFAULT_EXCERPT_SENTENCES},
    language::detect_language,
    prompts::SystemPrompts,
    providers::{
        ai::{AiProvider, EmbeddingProvider},
        db::storage::DocumentStore,
    },
    rules::{RuleKind, RuleTable},
    search::{find_best_match, EmbeddingCache, SearchOptions},
    PromptError,
};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that end a conversation turn without an answer.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Generative fallback failed: {0}")]
    Generation(#[from] PromptError),
}

/// Where an answer came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum AnswerSource {
    Rule(RuleKind),
    Search {
        title: String,
        url: Option<String>,
        score: f32,
    },
    Generative,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

/// Everything a conversation turn needs, built once at startup and shared.
#[derive(Clone)]
pub struct ChatPipeline {
    rules: RuleTable,
    ai_provider: Box<dyn AiProvider>,
    embedding_provider: Option<Box<dyn EmbeddingProvider>>,
    document_store: Option<Box<dyn DocumentStore>>,
    search_options: SearchOptions,
    embedding_cache: Option<EmbeddingCache>,
    excerpt_sentences: usize,
    system_prompts: SystemPrompts,
}

impl fmt::Debug for ChatPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatPipeline")
            .field("rules", &self.rules.rules().len())
            .field("ai_provider", &self.ai_provider)
            .field("document_store", &self.document_store)
            .field("search_options", &self.search_options)
            .field("cache_embeddings", &self.embedding_cache.is_some())
            .finish_non_exhaustive()
    }
}

impl ChatPipeline {
    pub fn builder() -> ChatPipelineBuilder {
        ChatPipelineBuilder::default()
    }

    /// Answers a single customer message.
    pub async fn respond(&self, message: &str) -> Result<Answer, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        if let Some(matched) = self.rules.resolve(message) {
            info!(rule = matched.rule, "Answered by rule");
            return Ok(Answer {
                text: matched.text,
                source: AnswerSource::Rule(matched.kind),
            });
        }
        debug!("No rule matched; moving on to search");

        if let Some(answer) = self.search(message).await {
            return Ok(answer);
        }
        debug!("Search found nothing; using generative fallback");

        self.generate(message).await
    }

    /// Runs the search stage, swallowing any error as "no match".
    async fn search(&self, message: &str) -> Option<Answer> {
        let (Some(store), Some(embedder)) = (&self.document_store, &self.embedding_provider)
        else {
            return None;
        };

        let found = match find_best_match(
            store.as_ref(),
            embedder.as_ref(),
            message,
            &self.search_options,
            self.embedding_cache.as_ref(),
        )
        .await
        {
            Ok(found) => found?,
            Err(e) => {
                warn!("Semantic search failed, continuing without it: {e}");
                return None;
            }
        };

        let content = found.document.content.as_deref().unwrap_or_default();
        let text = format_search_answer(
            content,
            found.document.url.as_deref(),
            message,
            self.excerpt_sentences,
        );
        Some(Answer {
            text,
            source: AnswerSource::Search {
                title: found.document.title,
                url: found.document.url,
                score: found.score,
            },
        })
    }

    async fn generate(&self, message: &str) -> Result<Answer, ChatError> {
        let language = detect_language(message);
        let system_prompt = self.system_prompts.for_language(language);
        info!(?language, "Calling generative fallback");

        let text = self
            .ai_provider
            .generate(system_prompt, message)
            .await
            .inspect_err(|e| error!("Generative fallback failed: {e}"))?;

        Ok(Answer {
            text,
            source: AnswerSource::Generative,
        })
    }
}

/// A builder for [`ChatPipeline`].
///
/// Only the AI provider is required. The search stage runs when both a document
/// store and an embedding provider are set.
#[derive(Default)]
pub struct ChatPipelineBuilder {
    rules: Option<RuleTable>,
    ai_provider: Option<Box<dyn AiProvider>>,
    embedding_provider: Option<Box<dyn EmbeddingProvider>>,
    document_store: Option<Box<dyn DocumentStore>>,
    search_options: SearchOptions,
    cache_embeddings: bool,
    excerpt_sentences: Option<usize>,
    system_prompts: Option<SystemPrompts>,
}

impl ChatPipelineBuilder {
    pub fn rules(mut self, rules: RuleTable) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    pub fn embedding_provider(mut self, embedding_provider: Box<dyn EmbeddingProvider>) -> Self {
        self.embedding_provider = Some(embedding_provider);
        self
    }

    pub fn document_store(mut self, document_store: Box<dyn DocumentStore>) -> Self {
        self.document_store = Some(document_store);
        self
    }

    pub fn search_options(mut self, search_options: SearchOptions) -> Self {
        self.search_options = search_options;
        self
    }

    /// Reuses document embeddings across requests, keyed by content hash.
    pub fn cache_embeddings(mut self, enabled: bool) -> Self {
        self.cache_embeddings = enabled;
        self
    }

    pub fn excerpt_sentences(mut self, sentences: usize) -> Self {
        self.excerpt_sentences = Some(sentences);
        self
    }

    pub fn system_prompts(mut self, system_prompts: SystemPrompts) -> Self {
        self.system_prompts = Some(system_prompts);
        self
    }

    pub fn build(self) -> Result<ChatPipeline, PromptError> {
        let ai_provider = self.ai_provider.ok_or_else(|| {
            PromptError::MissingAiProvider("the chat pipeline needs an AI provider".to_string())
        })?;

        if self.document_store.is_none() || self.embedding_provider.is_none() {
            warn!("Document store or embedding provider missing; semantic search is disabled");
        }

        Ok(ChatPipeline {
            rules: self.rules.unwrap_or_default(),
            ai_provider,
            embedding_provider: self.embedding_provider,
            document_store: self.document_store,
            search_options: self.search_options,
            embedding_cache: self.cache_embeddings.then(EmbeddingCache::new),
            excerpt_sentences: self.excerpt_sentences.unwrap_or(DEFAULT_EXCERPT_SENTENCES),
            system_prompts: self.system_prompts.unwrap_or_default(),
        })
    }
}
