//! # Test Utilities
//!
//! Recording mocks for the three external collaborators of the pipeline. Every
//! mock keeps a log of the calls it received so tests can assert which stages
//! ran.

use async_trait::async_trait;
use dhonkbot::{
    providers::{
        ai::{AiProvider, EmbeddingProvider},
        db::storage::DocumentStore,
    },
    Document, PromptError,
};
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

// --- Mock AI Provider ---

#[derive(Clone, Debug)]
pub struct MockAiProvider {
    response: Result<String, String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockAiProvider {
    /// A provider that always answers with `response`.
    pub fn new(response: &str) -> Self {
        Self {
            response: Ok(response.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A provider whose every call fails with an API error carrying `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Retrieves the recorded `(system_prompt, user_prompt)` calls.
    pub fn get_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AiProvider for MockAiProvider {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, PromptError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        self.response.clone().map_err(PromptError::AiApi)
    }
}

// --- Mock Embedding Provider ---

/// Returns pre-programmed vectors for known inputs and `default_vector` otherwise.
#[derive(Clone, Debug)]
pub struct MockEmbeddingProvider {
    vectors: Arc<Mutex<HashMap<String, Vec<f32>>>>,
    default_vector: Vec<f32>,
    fail: bool,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockEmbeddingProvider {
    pub fn new(default_vector: Vec<f32>) -> Self {
        Self {
            vectors: Arc::new(Mutex::new(HashMap::new())),
            default_vector,
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    /// Pre-programs the vector returned for an exact input text.
    pub fn with_vector(self, input: &str, vector: Vec<f32>) -> Self {
        self.vectors
            .lock()
            .unwrap()
            .insert(input.to_string(), vector);
        self
    }

    /// Retrieves every input that was embedded, in call order.
    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, PromptError> {
        self.calls.lock().unwrap().push(input.to_string());
        if self.fail {
            return Err(PromptError::AiApi("mock embedding failure".to_string()));
        }
        let vectors = self.vectors.lock().unwrap();
        Ok(vectors
            .get(input)
            .cloned()
            .unwrap_or_else(|| self.default_vector.clone()))
    }
}

// --- In-Memory Document Store ---

#[derive(Clone, Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: Vec<Document>,
    fail: bool,
    fetches: Arc<Mutex<Vec<u32>>>,
}

impl InMemoryDocumentStore {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            ..Default::default()
        }
    }

    /// A store whose every fetch fails with a connection error.
    pub fn unreachable() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    /// The `limit` passed to each fetch, in call order.
    pub fn get_fetches(&self) -> Vec<u32> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &str {
        "InMemory"
    }

    async fn fetch_documents(&self, limit: u32) -> Result<Vec<Document>, PromptError> {
        self.fetches.lock().unwrap().push(limit);
        if self.fail {
            return Err(PromptError::StorageConnection(
                "connection refused".to_string(),
            ));
        }
        Ok(self
            .documents
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
