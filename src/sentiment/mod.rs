// src/sentiment/mod.rs
// Review sentiment classification: prompt, parse, cache, orchestrate

pub mod analyzer;
pub mod cache;
pub mod highlight;
pub mod parser;
pub mod prompt;
pub mod types;

pub use analyzer::Analyzer;
pub use cache::ResultCache;
pub use highlight::highlight_evidence;
pub use parser::{ParseFailure, ResponseParser};
pub use prompt::PromptBuilder;
pub use types::{FewShotExample, Label, SentimentResult};
