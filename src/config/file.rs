// src/config/file.rs
// File-based configuration from ~/.reviewsense/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use super::analyzer::AnalyzerConfig;
use crate::sentiment::types::FewShotExample;

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    /// Gemini API key (environment and CLI take precedence)
    pub gemini_api_key: Option<String>,

    #[serde(default)]
    pub analyzer: AnalyzerSection,

    /// Replaces the built-in few-shot set when non-empty
    #[serde(default)]
    pub few_shot: Vec<FewShotExample>,
}

/// `[analyzer]` section; every field is optional
#[derive(Debug, Deserialize, Default)]
pub struct AnalyzerSection {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub neutral_threshold: Option<f32>,
    pub max_output_tokens: Option<u32>,
    pub cache_capacity: Option<usize>,
    pub timeout_secs: Option<u64>,
    pub cache_failures: Option<bool>,
}

impl FileConfig {
    /// Load config from ~/.reviewsense/config.toml
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from an explicit path; missing or invalid files yield defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Layer file values over `base`
    pub fn apply(&self, base: AnalyzerConfig) -> AnalyzerConfig {
        let section = &self.analyzer;
        let mut config = base;

        if let Some(ref model) = section.model {
            config.model = model.clone();
        }
        if let Some(t) = section.temperature {
            config.temperature = t;
        }
        if let Some(n) = section.neutral_threshold {
            config.neutral_threshold = n;
        }
        if let Some(m) = section.max_output_tokens {
            config.max_output_tokens = m;
        }
        if let Some(c) = section.cache_capacity {
            config.cache_capacity = c;
        }
        if let Some(secs) = section.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(enabled) = section.cache_failures {
            config.cache_failures = enabled;
        }
        if !self.few_shot.is_empty() {
            config.few_shot_examples = self.few_shot.clone();
        }

        config
    }
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".reviewsense")
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::types::Label;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
gemini_api_key = "abc"

[analyzer]
model = "gemini-2.5-pro"
neutral_threshold = 0.65
timeout_secs = 15

[[few_shot]]
review = "A tedious slog."
label = "Negative"
explanation = "Calls the film tedious."
evidence_phrases = ["tedious slog"]
"#;
        let file: FileConfig = toml::from_str(toml).unwrap();
        assert_eq!(file.gemini_api_key.as_deref(), Some("abc"));
        assert_eq!(file.few_shot.len(), 1);
        assert_eq!(file.few_shot[0].label, Label::Negative);

        let config = file.apply(AnalyzerConfig::default());
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.neutral_threshold, 0.65);
        assert_eq!(config.request_timeout, Duration::from_secs(15));
        // untouched fields keep their defaults
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.few_shot_examples[0].review, "A tedious slog.");
    }

    #[test]
    fn test_parse_empty_config() {
        let file: FileConfig = toml::from_str("").unwrap();
        let config = file.apply(AnalyzerConfig::default());
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.few_shot_examples.len(), 1);
    }

    #[test]
    fn test_load_from_missing_file() {
        let file = FileConfig::load_from(Path::new("/nonexistent/reviewsense/config.toml"));
        assert!(file.gemini_api_key.is_none());
    }

    #[test]
    fn test_load_from_invalid_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "this is = = not toml").unwrap();
        let file = FileConfig::load_from(tmp.path());
        assert!(file.analyzer.model.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        writeln!(tmp, "[analyzer]\ntemperature = 0.0").unwrap();
        let file = FileConfig::load_from(tmp.path());
        assert_eq!(file.analyzer.temperature, Some(0.0));
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.to_string_lossy().contains(".reviewsense"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }
}
