// src/llm/provider.rs
// Model client abstraction: one call, text back

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported text-generation providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Gemini,
}

impl Provider {
    pub fn default_model(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
        }
    }
}

/// A single-turn generation request
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>, temperature: f32, max_output_tokens: u32) -> Self {
        Self {
            prompt: prompt.into(),
            temperature,
            max_output_tokens,
        }
    }
}

/// Trait for remote text-generation clients
///
/// Implementations return the model's raw text, or an error for transport
/// failures and empty payloads. The wire protocol stays behind this call.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;

    fn provider_type(&self) -> Provider;

    fn model_name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::Gemini.to_string(), "gemini");
        assert_eq!(Provider::Gemini.default_model(), "gemini-2.5-flash");
    }

    #[test]
    fn test_generation_request_new() {
        let req = GenerationRequest::new("prompt", 0.3, 500);
        assert_eq!(req.prompt, "prompt");
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.max_output_tokens, 500);
    }
}
