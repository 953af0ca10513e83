//! # Dhonk Craft Support Assistant
//!
//! This crate answers customer messages for the Dhonk Craft store. A message is
//! resolved by the first stage able to answer it: scripted intents, contact
//! details, semantic search over the website pages, and finally a generative
//! model. See [`pipeline::ChatPipeline`] for the entry point.

pub mod contacts;
pub mod errors;
pub mod excerpt;
pub mod intents;
pub mod language;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod rules;
pub mod search;
pub mod similarity;
pub mod types;

pub use errors::PromptError;
pub use pipeline::{Answer, AnswerSource, ChatError, ChatPipeline, ChatPipelineBuilder};
pub use types::{Document, ProviderConfig, ScoredDocument};
