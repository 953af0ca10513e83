use crate::{errors::PromptError, types::Document};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// The number of candidate documents a search reads from the content store.
pub const DEFAULT_DOCUMENT_LIMIT: u32 = 20;

/// A trait for reading candidate documents from a content store.
///
/// Implementations return a fresh snapshot on every call; nothing is cached
/// across requests.
#[async_trait]
pub trait DocumentStore: Send + Sync + DynClone + Debug {
    /// Returns the name of the storage provider (e.g., "PostgreSQL").
    fn name(&self) -> &str;

    /// Fetches at most `limit` documents.
    async fn fetch_documents(&self, limit: u32) -> Result<Vec<Document>, PromptError>;
}

dyn_clone::clone_trait_object!(DocumentStore);
