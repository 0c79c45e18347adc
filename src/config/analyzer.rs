// src/config/analyzer.rs
// Analyzer settings, fixed at construction time

use std::time::Duration;

use crate::llm::Provider;
use crate::sentiment::cache::DEFAULT_CACHE_CAPACITY;
use crate::sentiment::parser::DEFAULT_NEUTRAL_THRESHOLD;
use crate::sentiment::types::{FewShotExample, default_examples};

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.3;
/// Default cap on generated tokens
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 500;
/// Default wall-clock limit for one model call
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub model: String,
    pub temperature: f32,
    /// Predictions with confidence below this become Neutral
    pub neutral_threshold: f32,
    pub max_output_tokens: u32,
    pub cache_capacity: usize,
    pub request_timeout: Duration,
    /// Also cache parse fallbacks and remote failures (off: they are retried)
    pub cache_failures: bool,
    pub few_shot_examples: Vec<FewShotExample>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            model: Provider::Gemini.default_model().to_string(),
            temperature: DEFAULT_TEMPERATURE,
            neutral_threshold: DEFAULT_NEUTRAL_THRESHOLD,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_failures: false,
            few_shot_examples: default_examples(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_neutral_threshold(mut self, threshold: f32) -> Self {
        self.neutral_threshold = threshold;
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_cache_failures(mut self, enabled: bool) -> Self {
        self.cache_failures = enabled;
        self
    }

    pub fn with_examples(mut self, examples: Vec<FewShotExample>) -> Self {
        self.few_shot_examples = examples;
        self
    }

    /// Check ranges; errors make the config unusable, warnings do not
    pub fn validate(&self) -> ConfigValidation {
        let mut v = ConfigValidation::new();

        if self.model.trim().is_empty() {
            v.add_error("model name is empty");
        }
        if !(0.0..=1.0).contains(&self.neutral_threshold) {
            v.add_error(format!(
                "neutral_threshold {} must be within 0.0..=1.0",
                self.neutral_threshold
            ));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            v.add_error(format!(
                "temperature {} must be within 0.0..=2.0",
                self.temperature
            ));
        }
        if self.max_output_tokens == 0 {
            v.add_error("max_output_tokens must be greater than 0");
        }
        if self.cache_capacity == 0 {
            v.add_error("cache_capacity must be greater than 0");
        }
        if self.request_timeout.is_zero() {
            v.add_error("request_timeout must be greater than 0");
        }
        if self.few_shot_examples.is_empty() {
            v.add_warning("no few-shot examples configured; output format may drift");
        }

        v
    }
}

/// Configuration validation result
#[derive(Debug, Default)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();
        for e in &self.errors {
            lines.push(format!("error: {}", e));
        }
        for w in &self.warnings {
            lines.push(format!("warning: {}", w));
        }
        lines.join("\n")
    }
}
