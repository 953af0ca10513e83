//! # AI Provider Factory
//!
//! Builds the chat provider from its configuration so the server (and tests)
//! never construct concrete provider types themselves.

use crate::{
    errors::PromptError,
    providers::ai::{gemini::GeminiProvider, openai::OpenAiProvider, AiProvider},
    types::ProviderConfig,
};
use tracing::info;

/// The OpenAI chat completions endpoint, used when `api_url` is not set.
pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Creates the generative AI provider described by `config`.
///
/// - `openai` (the default) talks to any OpenAI-compatible endpoint.
/// - `gemini` derives its URL from the model name when none is given, and requires a key.
pub fn create_ai_provider(config: &ProviderConfig) -> Result<Box<dyn AiProvider>, PromptError> {
    let provider: Box<dyn AiProvider> = match config.provider.as_str() {
        "openai" | "local" => {
            let api_url = config
                .api_url
                .clone()
                .unwrap_or_else(|| OPENAI_CHAT_COMPLETIONS_URL.to_string());
            info!(%api_url, model = %config.model_name, "Configuring OpenAI-compatible chat provider");
            Box::new(
                OpenAiProvider::new(
                    api_url,
                    config.api_key.clone(),
                    Some(config.model_name.clone()),
                )?
                .with_temperature(config.temperature),
            )
        }
        "gemini" => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                PromptError::MissingAiProvider(
                    "api_key is required for the gemini provider".to_string(),
                )
            })?;
            let api_url = config.api_url.clone().unwrap_or_else(|| {
                format!(
                    "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
                    config.model_name
                )
            });
            info!(%api_url, "Configuring Gemini chat provider");
            Box::new(GeminiProvider::new(api_url, api_key)?.with_temperature(config.temperature))
        }
        other => {
            return Err(PromptError::MissingAiProvider(format!(
                "Unsupported AI provider type '{other}'"
            )))
        }
    };

    Ok(provider)
}
