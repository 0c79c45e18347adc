// src/lib.rs
// reviewsense - movie review sentiment classification backed by a hosted LLM

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod config;
pub mod error;
pub mod eval;
pub mod http;
pub mod llm;
pub mod repl;
pub mod sentiment;

pub use error::{Result, SentimentError};
pub use sentiment::{Analyzer, Label, SentimentResult};
