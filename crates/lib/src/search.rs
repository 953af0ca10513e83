//! # Search Logic
//!
//! Brute-force semantic search over the content store:
//! 1.  **Fetch**: read a bounded set of candidate documents.
//! 2.  **Embed**: embed the query once, then every candidate with non-empty content,
//!     one request at a time.
//! 3.  **Rank**: keep the candidate with the highest cosine similarity and return it
//!     only if the score clears the threshold.
//!
//! Document embeddings can optionally be reused across requests through an
//! [`EmbeddingCache`] keyed by the md5 hash of the document content.

use crate::{
    providers::{
        ai::EmbeddingProvider,
        db::storage::{DocumentStore, DEFAULT_DOCUMENT_LIMIT},
    },
    similarity::cosine_similarity,
    types::ScoredDocument,
    PromptError,
};
use std::{collections::HashMap, sync::Arc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// The score a document must exceed to be returned as an answer.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;

/// Custom error types for the search process.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Failed to fetch documents: {0}")]
    Storage(PromptError),
    #[error("Embedding generation failed: {0}")]
    Embedding(PromptError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOptions {
    /// The maximum number of candidate documents to read.
    pub limit: u32,
    /// Results must score strictly above this value.
    pub threshold: f32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_DOCUMENT_LIMIT,
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

/// Document embeddings shared across requests, keyed by a hash of the content.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingCache {
    entries: Arc<RwLock<HashMap<String, Arc<Vec<f32>>>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(content: &str) -> String {
        format!("{:x}", md5::compute(content.as_bytes()))
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the cached embedding for `content`, computing and storing it on a miss.
    async fn get_or_embed(
        &self,
        embedder: &dyn EmbeddingProvider,
        content: &str,
    ) -> Result<Arc<Vec<f32>>, PromptError> {
        let key = Self::key(content);
        if let Some(vector) = self.entries.read().await.get(&key) {
            debug!(%key, "Embedding cache hit");
            return Ok(vector.clone());
        }

        let vector = Arc::new(embedder.embed(content).await?);
        self.entries.write().await.insert(key, vector.clone());
        Ok(vector)
    }
}

async fn embed_document(
    embedder: &dyn EmbeddingProvider,
    cache: Option<&EmbeddingCache>,
    content: &str,
) -> Result<Arc<Vec<f32>>, PromptError> {
    match cache {
        Some(cache) => cache.get_or_embed(embedder, content).await,
        None => embedder.embed(content).await.map(Arc::new),
    }
}

/// Finds the stored document most similar to `query`.
///
/// Returns `Ok(None)` when the store is empty, no candidate has content, or the
/// best score does not exceed `options.threshold`. Candidates whose similarity is
/// undefined (zero-norm or mismatched vectors) are skipped. On equal scores the
/// earlier candidate wins.
pub async fn find_best_match(
    store: &dyn DocumentStore,
    embedder: &dyn EmbeddingProvider,
    query: &str,
    options: &SearchOptions,
    cache: Option<&EmbeddingCache>,
) -> Result<Option<ScoredDocument>, SearchError> {
    let documents = store
        .fetch_documents(options.limit)
        .await
        .map_err(SearchError::Storage)?;

    if documents.is_empty() {
        info!(store = store.name(), "Content store returned no documents");
        return Ok(None);
    }

    let query_vector = embedder
        .embed(query)
        .await
        .map_err(SearchError::Embedding)?;

    let mut best: Option<ScoredDocument> = None;
    for document in documents {
        let Some(content) = document.searchable_content() else {
            debug!(title = %document.title, "Skipping document without content");
            continue;
        };

        let doc_vector = embed_document(embedder, cache, content)
            .await
            .map_err(SearchError::Embedding)?;

        let Some(score) = cosine_similarity(&query_vector, &doc_vector) else {
            debug!(title = %document.title, "Skipping document with undefined similarity");
            continue;
        };
        debug!(title = %document.title, score, "Scored candidate document");

        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(ScoredDocument { document, score });
        }
    }

    match best {
        Some(found) if found.score > options.threshold => {
            info!(title = %found.document.title, score = found.score, "Found matching document");
            Ok(Some(found))
        }
        Some(found) => {
            info!(
                best_score = found.score,
                threshold = options.threshold,
                "No document cleared the similarity threshold"
            );
            Ok(None)
        }
        None => Ok(None),
    }
}
