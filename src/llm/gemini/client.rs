// src/llm/gemini/client.rs
// Google Gemini generateContent client (single-turn, non-streaming)

use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

use crate::http::create_shared_client;
use crate::llm::gemini::extraction::{first_candidate_text, first_finish_reason};
use crate::llm::gemini::types::{GeminiContent, GeminiRequest, GeminiResponse, GenerationConfig};
use crate::llm::http_client::LlmHttpClient;
use crate::llm::logging::{log_completion, log_usage};
use crate::llm::provider::{GenerationRequest, ModelClient, Provider};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Gemini API client
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    http: LlmHttpClient,
}

impl GeminiClient {
    /// Create a new Gemini client with default model
    pub fn new(api_key: String) -> Self {
        Self::with_model(api_key, DEFAULT_MODEL.to_string())
    }

    /// Create a new Gemini client with custom model
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::with_http_client(api_key, model, create_shared_client())
    }

    /// Create a new Gemini client with a shared HTTP client
    pub fn with_http_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            api_key,
            model,
            base_url: GEMINI_API_BASE.to_string(),
            http: LlmHttpClient::from_client(client),
        }
    }

    /// Point the client at another endpoint (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override retry behaviour of the underlying HTTP client
    pub fn with_retry(mut self, max_attempts: u32, base_backoff: Duration) -> Self {
        self.http = self.http.with_retry(max_attempts, base_backoff);
        self
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn provider_type(&self) -> Provider {
        Provider::Gemini
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }

    #[instrument(skip(self, request), fields(request_id, model = %self.model, prompt_len = request.prompt.len()))]
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        Span::current().record("request_id", request_id.as_str());

        info!(
            request_id = %request_id,
            model = %self.model,
            temperature = request.temperature,
            max_output_tokens = request.max_output_tokens,
            "Starting Gemini generate request"
        );

        let payload = GeminiRequest {
            contents: vec![GeminiContent::user(request.prompt)],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
            },
        };

        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let body = serde_json::to_string(&payload)?;
        debug!(request_id = %request_id, "Gemini request: {}", body);

        // Key travels in a header so it never appears in a URL or its errors
        let response_body = self
            .http
            .execute_request_with_retry(&request_id, body, |client, body| {
                client
                    .post(&url)
                    .header("Content-Type", "application/json")
                    .header(API_KEY_HEADER, &self.api_key)
                    .body(body)
            })
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;

        let data: GeminiResponse = serde_json::from_str(&response_body)
            .map_err(|e| anyhow!("Failed to parse Gemini response: {}", e))?;

        if let Some(error) = data.error {
            bail!("Gemini error: {}", error.message);
        }

        if let Some(ref u) = data.usage_metadata {
            log_usage(
                &request_id,
                "Gemini",
                u.prompt_token_count,
                u.candidates_token_count.unwrap_or(0),
            );
        }

        let text = match first_candidate_text(&data) {
            Some(text) if !text.trim().is_empty() => text,
            _ => match first_finish_reason(&data) {
                Some(reason) => bail!("Empty response from model (finish reason: {})", reason),
                None => bail!("Empty response from model"),
            },
        };

        log_completion(&request_id, "Gemini", duration_ms, text.len());

        Ok(text)
    }
}
