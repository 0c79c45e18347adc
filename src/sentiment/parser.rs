// src/sentiment/parser.rs
// Turns free-form model output into a normalized SentimentResult

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{Label, SentimentResult};

/// Fields the model must return
const REQUIRED_FIELDS: [&str; 4] = ["label", "confidence", "explanation", "evidence_phrases"];

/// Confidence used when the model's value cannot be read as a number
const DEFAULT_CONFIDENCE: f32 = 0.5;

/// Characters of raw output quoted in the fallback explanation
const FALLBACK_EXCERPT_CHARS: usize = 100;

/// Default confidence below which a prediction is forced to Neutral
pub const DEFAULT_NEUTRAL_THRESHOLD: f32 = 0.5;

/// Why a model response could not be turned into a result
#[derive(Error, Debug)]
pub enum ParseFailure {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("invalid label: {0}")]
    InvalidLabel(String),
}

/// Outcome of `ResponseParser::parse`
#[derive(Debug, Clone, PartialEq)]
pub enum Parsed {
    /// Output matched the schema
    Valid(SentimentResult),
    /// Output was unusable; carries the Neutral fallback
    Fallback(SentimentResult),
}

impl Parsed {
    pub fn is_valid(&self) -> bool {
        matches!(self, Parsed::Valid(_))
    }

    pub fn into_result(self) -> SentimentResult {
        match self {
            Parsed::Valid(result) | Parsed::Fallback(result) => result,
        }
    }
}

/// Validates and repairs model output, then applies the neutral override.
#[derive(Debug, Clone, Copy)]
pub struct ResponseParser {
    neutral_threshold: f32,
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new(DEFAULT_NEUTRAL_THRESHOLD)
    }
}

impl ResponseParser {
    pub fn new(neutral_threshold: f32) -> Self {
        Self { neutral_threshold }
    }

    /// Parse model output, degrading to the fallback result on any failure.
    pub fn parse(&self, raw: &str) -> Parsed {
        match self.try_parse(raw) {
            Ok(result) => Parsed::Valid(result),
            Err(e) => {
                warn!(error = %e, "Failed to parse sentiment response");
                debug!(raw = %raw, "Unparseable model output");
                Parsed::Fallback(Self::fallback(raw))
            }
        }
    }

    /// Parse model output, reporting why it was rejected.
    pub fn try_parse(&self, raw: &str) -> Result<SentimentResult, ParseFailure> {
        let cleaned = raw.trim();
        let span = extract_json_object(cleaned).ok_or(ParseFailure::NoJsonObject)?;

        // The span always starts with '{', so a successful decode is an object
        let value: Value = serde_json::from_str(span)?;
        let empty = Map::new();
        let obj = value.as_object().unwrap_or(&empty);

        for field in REQUIRED_FIELDS {
            if !obj.contains_key(field) {
                return Err(ParseFailure::MissingField(field));
            }
        }

        let label_value = &obj["label"];
        let mut label = label_value
            .as_str()
            .and_then(Label::from_model)
            .ok_or_else(|| ParseFailure::InvalidLabel(display_value(label_value)))?;

        let confidence = coerce_confidence(&obj["confidence"]);

        if confidence < self.neutral_threshold {
            debug!(
                confidence,
                threshold = self.neutral_threshold,
                reported = %label,
                "Confidence below threshold, overriding label to Neutral"
            );
            label = Label::Neutral;
        }

        Ok(SentimentResult {
            label,
            confidence,
            explanation: coerce_explanation(&obj["explanation"]),
            evidence_phrases: coerce_phrases(&obj["evidence_phrases"]),
        })
    }

    /// Universal safety net for unparseable output
    pub fn fallback(raw: &str) -> SentimentResult {
        let excerpt: String = raw.chars().take(FALLBACK_EXCERPT_CHARS).collect();
        SentimentResult {
            label: Label::Neutral,
            confidence: DEFAULT_CONFIDENCE,
            explanation: format!(
                "Could not parse sentiment analysis response. Raw: {}...",
                excerpt
            ),
            evidence_phrases: Vec::new(),
        }
    }
}

/// Extract the first balanced `{...}` block from a string.
///
/// Braces inside JSON string literals are ignored. Output cut off before the
/// object closes yields `None`.
pub fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;

    let bytes = s.as_bytes();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &b) in bytes.iter().enumerate().skip(start) {
        if escape_next {
            escape_next = false;
            continue;
        }

        match b {
            b'\\' if in_string => escape_next = true,
            b'"' => in_string = !in_string,
            _ if in_string => {}
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&s[start..=i]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Read a confidence value, clamped to 0.0..=1.0
fn coerce_confidence(value: &Value) -> f32 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed {
        Some(c) if !c.is_nan() => c.clamp(0.0, 1.0) as f32,
        _ => DEFAULT_CONFIDENCE,
    }
}

fn coerce_explanation(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}

/// Keep string and scalar entries; anything that is not a list becomes empty
fn coerce_phrases(value: &Value) -> Vec<String> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .collect()
}

/// Strings without surrounding quotes, everything else as JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
