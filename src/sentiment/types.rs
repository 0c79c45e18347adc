// src/sentiment/types.rs
// Core sentiment types: labels, results, few-shot examples

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentiment classification assigned to a review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
    /// Analysis could not run (invalid input or remote failure)
    Error,
}

impl Label {
    /// The three sentiment classes, in report order
    pub const CLASSES: [Label; 3] = [Label::Positive, Label::Negative, Label::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Neutral => "Neutral",
            Self::Error => "Error",
        }
    }

    /// Parse a sentiment class exactly as the model is instructed to emit it.
    /// `Error` is never accepted from model output.
    pub fn from_model(s: &str) -> Option<Self> {
        match s {
            "Positive" => Some(Self::Positive),
            "Negative" => Some(Self::Negative),
            "Neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Parse a dataset label: trimmed, case-insensitive
    pub fn from_dataset(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }

    /// Index into `CLASSES`, `None` for `Error`
    pub fn class_index(&self) -> Option<usize> {
        match self {
            Self::Positive => Some(0),
            Self::Negative => Some(1),
            Self::Neutral => Some(2),
            Self::Error => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured outcome of analyzing one review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub label: Label,
    /// Self-reported certainty, always within 0.0..=1.0
    pub confidence: f32,
    pub explanation: String,
    /// Phrases the model cites as support; not verified against the review
    pub evidence_phrases: Vec<String>,
}

impl SentimentResult {
    /// An `Error`-labelled result carrying a human-readable reason
    pub fn error(explanation: impl Into<String>) -> Self {
        Self {
            label: Label::Error,
            confidence: 0.0,
            explanation: explanation.into(),
            evidence_phrases: Vec::new(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.label == Label::Error
    }
}

/// A worked example embedded in the prompt to steer output format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub review: String,
    pub label: Label,
    pub explanation: String,
    #[serde(default)]
    pub evidence_phrases: Vec<String>,
}

/// Built-in few-shot set used when no examples are configured
pub fn default_examples() -> Vec<FewShotExample> {
    vec![FewShotExample {
        review: "This movie was absolutely fantastic! The acting was superb and the plot kept me engaged throughout.".to_string(),
        label: Label::Positive,
        explanation: "The review contains strongly positive words like 'fantastic', 'superb', and 'engaged'.".to_string(),
        evidence_phrases: vec![
            "absolutely fantastic".to_string(),
            "acting was superb".to_string(),
            "plot kept me engaged".to_string(),
        ],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_model_is_exact() {
        assert_eq!(Label::from_model("Positive"), Some(Label::Positive));
        assert_eq!(Label::from_model("Neutral"), Some(Label::Neutral));
        assert_eq!(Label::from_model("positive"), None);
        assert_eq!(Label::from_model("Error"), None);
        assert_eq!(Label::from_model("Mixed"), None);
    }

    #[test]
    fn test_from_dataset_normalizes() {
        assert_eq!(Label::from_dataset(" positive "), Some(Label::Positive));
        assert_eq!(Label::from_dataset("NEGATIVE"), Some(Label::Negative));
        assert_eq!(Label::from_dataset("Neutral"), Some(Label::Neutral));
        assert_eq!(Label::from_dataset("unknown"), None);
    }

    #[test]
    fn test_label_serializes_capitalized() {
        let json = serde_json::to_string(&Label::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
    }

    #[test]
    fn test_class_index_matches_classes() {
        for (i, label) in Label::CLASSES.iter().enumerate() {
            assert_eq!(label.class_index(), Some(i));
        }
        assert_eq!(Label::Error.class_index(), None);
    }

    #[test]
    fn test_error_result() {
        let result = SentimentResult::error("boom");
        assert!(result.is_error());
        assert_eq!(result.confidence, 0.0);
        assert!(result.evidence_phrases.is_empty());
    }

    #[test]
    fn test_default_examples() {
        let examples = default_examples();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].label, Label::Positive);
        assert_eq!(examples[0].evidence_phrases.len(), 3);
    }
}
