//! # Embeddings Provider
//!
//! Turns text into vectors by calling a hosted embeddings endpoint. The wire
//! protocol is picked once from the endpoint URL: Google's `embedContent` for
//! `generativelanguage.googleapis.com`, the OpenAI `/v1/embeddings` shape for
//! everything else.

use crate::{errors::PromptError, providers::ai::EmbeddingProvider};
use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, RequestBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The embedding model used when none is configured.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

const GEMINI_HOST: &str = "generativelanguage.googleapis.com";

#[derive(Serialize)]
struct OpenAiEmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct OpenAiEmbeddingResponse {
    data: Vec<OpenAiEmbedding>,
}

#[derive(Deserialize)]
struct OpenAiEmbedding {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct GeminiEmbeddingRequest<'a> {
    model: &'a str,
    content: GeminiContent<'a>,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GeminiEmbeddingResponse {
    embedding: GeminiValues,
}

#[derive(Deserialize)]
struct GeminiValues {
    values: Vec<f32>,
}

/// The request/response shape an embeddings endpoint speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmbeddingProtocol {
    OpenAi,
    Gemini,
}

impl EmbeddingProtocol {
    pub fn for_url(api_url: &str) -> Self {
        if api_url.contains(GEMINI_HOST) {
            EmbeddingProtocol::Gemini
        } else {
            EmbeddingProtocol::OpenAi
        }
    }
}

/// An [`EmbeddingProvider`] backed by a hosted embeddings endpoint.
#[derive(Clone, Debug)]
pub struct ApiEmbeddingProvider {
    client: ReqwestClient,
    api_url: String,
    model: String,
    api_key: Option<String>,
    protocol: EmbeddingProtocol,
}

impl ApiEmbeddingProvider {
    pub fn new(
        api_url: String,
        model: String,
        api_key: Option<String>,
    ) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        let protocol = EmbeddingProtocol::for_url(&api_url);
        // Gemini expects fully qualified model names.
        let model = match protocol {
            EmbeddingProtocol::Gemini if !model.starts_with("models/") => {
                format!("models/{model}")
            }
            _ => model,
        };
        Ok(Self {
            client,
            api_url,
            model,
            api_key,
            protocol,
        })
    }

    pub fn protocol(&self) -> EmbeddingProtocol {
        self.protocol
    }

    fn request(&self, input: &str) -> RequestBuilder {
        let request = self.client.post(&self.api_url);
        match (self.protocol, self.api_key.as_deref()) {
            (EmbeddingProtocol::OpenAi, key) => {
                let request = request.json(&OpenAiEmbeddingRequest {
                    model: &self.model,
                    input,
                });
                match key {
                    Some(key) => request.bearer_auth(key),
                    None => request,
                }
            }
            (EmbeddingProtocol::Gemini, key) => {
                let request = request.json(&GeminiEmbeddingRequest {
                    model: &self.model,
                    content: GeminiContent {
                        parts: [GeminiPart { text: input }],
                    },
                });
                match key {
                    Some(key) => request.header("x-goog-api-key", key),
                    None => request,
                }
            }
        }
    }
}

#[async_trait]
impl EmbeddingProvider for ApiEmbeddingProvider {
    async fn embed(&self, input: &str) -> Result<Vec<f32>, PromptError> {
        debug!(protocol = ?self.protocol, chars = input.len(), "--> Requesting embedding");
        let response = self
            .request(input)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(error_text));
        }

        match self.protocol {
            EmbeddingProtocol::OpenAi => {
                let body: OpenAiEmbeddingResponse = response
                    .json()
                    .await
                    .map_err(PromptError::AiDeserialization)?;
                body.data
                    .into_iter()
                    .next()
                    .map(|d| d.embedding)
                    .ok_or_else(|| {
                        PromptError::AiApi("embeddings endpoint returned no vectors".to_string())
                    })
            }
            EmbeddingProtocol::Gemini => {
                let body: GeminiEmbeddingResponse = response
                    .json()
                    .await
                    .map_err(PromptError::AiDeserialization)?;
                Ok(body.embedding.values)
            }
        }
    }
}
