// src/llm/mod.rs
// Remote text-generation clients

mod gemini;
mod http_client;
mod logging;
mod provider;

pub use gemini::GeminiClient;
pub use http_client::LlmHttpClient;
pub use provider::{GenerationRequest, ModelClient, Provider};
