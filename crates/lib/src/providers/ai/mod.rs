pub mod embedding;
pub mod gemini;
pub mod openai;

use crate::errors::PromptError;
use async_trait::async_trait;
use dyn_clone::DynClone;
pub use embedding::ApiEmbeddingProvider;
use std::fmt::Debug;

/// A trait for interacting with a generative AI provider.
///
/// The assistant only ever sends one system prompt and one user message, so the
/// interface is a single call returning the model's text.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    /// Generates a response from a given system and user prompt.
    async fn generate(&self, system_prompt: &str, user_prompt: &str)
        -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);

/// A trait for services that turn text into a vector embedding.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug + DynClone {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, PromptError>;
}

dyn_clone::clone_trait_object!(EmbeddingProvider);
