// src/sentiment/analyzer.rs
// Orchestrates prompt -> model -> parser -> cache for a single review

use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::cache::ResultCache;
use super::parser::{Parsed, ResponseParser};
use super::prompt::PromptBuilder;
use super::types::SentimentResult;
use crate::config::AnalyzerConfig;
use crate::error::SentimentError;
use crate::llm::{GenerationRequest, ModelClient};

const INVALID_INPUT_MESSAGE: &str = "invalid input: review text must be a non-empty string";

/// Classifies reviews through a remote model.
///
/// Every outcome is a `SentimentResult`: invalid input and remote failures
/// come back labelled `Error`, unparseable output as the Neutral fallback.
/// Share across tasks with `Arc`; concurrent calls for the same uncached
/// review wait on a single remote call.
pub struct Analyzer {
    client: Arc<dyn ModelClient>,
    prompt: PromptBuilder,
    parser: ResponseParser,
    cache: ResultCache,
    in_flight: InFlight,
    config: AnalyzerConfig,
}

/// Per-review locks for calls currently waiting on the model
type InFlight = StdMutex<HashMap<String, Arc<Mutex<()>>>>;

impl Analyzer {
    pub fn new(client: Arc<dyn ModelClient>, config: AnalyzerConfig) -> Self {
        Self {
            client,
            prompt: PromptBuilder::new(config.few_shot_examples.clone()),
            parser: ResponseParser::new(config.neutral_threshold),
            cache: ResultCache::new(config.cache_capacity),
            in_flight: StdMutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn model_name(&self) -> String {
        self.client.model_name()
    }

    pub async fn cache_len(&self) -> usize {
        self.cache.len().await
    }

    /// Analyze one review. Never fails; see the type-level docs.
    pub async fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            warn!("Rejected empty review");
            return SentimentResult::error(INVALID_INPUT_MESSAGE);
        }

        let digest = review_digest(text);

        if let Some(hit) = self.cache.get(text).await {
            debug!(review_digest = %digest, "Cache hit");
            return hit;
        }

        // Released on drop, including when this future is cancelled
        let slot = InFlightSlot::claim(&self.in_flight, text);
        let _guard = slot.lock.lock().await;

        // Another caller may have finished while we waited
        if let Some(hit) = self.cache.get(text).await {
            debug!(review_digest = %digest, "Cache hit after waiting on in-flight call");
            return hit;
        }

        info!(review_digest = %digest, review_len = text.len(), "Analyzing review");
        let (result, cacheable) = self.run(text).await;
        if cacheable || self.config.cache_failures {
            self.cache.put(text, result.clone()).await;
        }
        result
    }

    /// One remote round trip. The flag marks schema-valid results.
    async fn run(&self, text: &str) -> (SentimentResult, bool) {
        let request = GenerationRequest::new(
            self.prompt.build(text),
            self.config.temperature,
            self.config.max_output_tokens,
        );

        let raw = match self.call_model(request).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(error = %e, "Error during sentiment analysis");
                return (SentimentResult::error(format!("Analysis failed: {}", e)), false);
            }
        };

        match self.parser.parse(&raw) {
            Parsed::Valid(result) => {
                debug!(label = %result.label, confidence = result.confidence, "Parsed model response");
                (result, true)
            }
            Parsed::Fallback(result) => (result, false),
        }
    }

    async fn call_model(&self, request: GenerationRequest) -> Result<String, SentimentError> {
        let timeout = self.config.request_timeout;
        let raw = tokio::time::timeout(timeout, self.client.generate(request))
            .await
            .map_err(|_| SentimentError::Timeout(timeout.as_secs()))?
            .map_err(|e| SentimentError::Llm(e.to_string()))?;

        if raw.trim().is_empty() {
            return Err(SentimentError::Llm("Empty response from model".to_string()));
        }
        Ok(raw)
    }
}

/// A caller's share of the per-review lock; the map entry goes away with
/// the last share.
struct InFlightSlot<'a> {
    table: &'a InFlight,
    key: &'a str,
    lock: Arc<Mutex<()>>,
}

impl<'a> InFlightSlot<'a> {
    fn claim(table: &'a InFlight, key: &'a str) -> Self {
        let mut map = table.lock().unwrap_or_else(PoisonError::into_inner);
        let lock = map
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        Self { table, key, lock }
    }
}

impl Drop for InFlightSlot<'_> {
    fn drop(&mut self) {
        let mut map = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        // Shares are only cloned under the map lock, so the count is stable here
        let last_share = map
            .get(self.key)
            .is_some_and(|existing| Arc::ptr_eq(existing, &self.lock) && Arc::strong_count(&self.lock) <= 2);
        if last_share {
            map.remove(self.key);
        }
    }
}

/// Short SHA-256 digest used to correlate log lines without logging review text
pub fn review_digest(text: &str) -> String {
    let hash = format!("{:x}", Sha256::digest(text.as_bytes()));
    hash[..12].to_string()
}
