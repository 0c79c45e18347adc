// src/sentiment/prompt.rs
// PromptBuilder for the sentiment classification request

use super::types::{FewShotExample, default_examples};

/// Static task instructions shared by every request
const TASK_INSTRUCTIONS: &str = r#"You are a highly-tuned sentiment analysis system specializing in movie reviews.
You must be aware that movie reviews can contain mixed sentiments, sarcasm, and nuanced opinions.
Your task is to classify the sentiment of the given review as Positive, Negative, or Neutral."#;

/// Output schema the model must follow
const OUTPUT_SCHEMA: &str = r#"IMPORTANT: You MUST respond with ONLY a valid JSON object with the following structure:
{
  "label": "Positive | Negative | Neutral",
  "confidence": 0.00,
  "explanation": "Short reason grounded in the text",
  "evidence_phrases": ["phrase1", "phrase2"]
}

Field rules:
- "label" must be exactly one of: Positive, Negative, Neutral
- "confidence" is a float between 0 and 1
- "explanation" is a short reason grounded in the review text
- "evidence_phrases" is a list of phrases from the review that support your conclusion

Do not include any other text before or after the JSON object."#;

/// Builds the single-turn prompt: instructions, schema, few-shot examples, target review.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    examples: Vec<FewShotExample>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(default_examples())
    }
}

impl PromptBuilder {
    pub fn new(examples: Vec<FewShotExample>) -> Self {
        Self { examples }
    }

    pub fn examples(&self) -> &[FewShotExample] {
        &self.examples
    }

    /// Render the few-shot block
    fn render_examples(&self) -> String {
        let mut out = String::new();
        for example in &self.examples {
            out.push_str(&format!("Review: {}\n", example.review));
            out.push_str(&format!("Label: {}\n", example.label));
            out.push_str(&format!("Explanation: {}\n", example.explanation));
            out.push_str(&format!(
                "Evidence Phrases: {}\n\n",
                serde_json::to_string(&example.evidence_phrases).unwrap_or_default()
            ));
        }
        out
    }

    /// Build the complete prompt for one review
    pub fn build(&self, review: &str) -> String {
        let mut prompt = String::with_capacity(1024 + review.len());
        prompt.push_str(TASK_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_SCHEMA);
        prompt.push_str("\n\n");

        if !self.examples.is_empty() {
            prompt.push_str("Here are some examples:\n\n");
            prompt.push_str(&self.render_examples());
        }

        prompt.push_str("Now analyze this review:\n\n");
        prompt.push_str(&format!("Review: {}\n\n", review));
        prompt.push_str("JSON Response:\n");
        prompt
    }
}
