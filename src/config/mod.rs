// src/config/mod.rs
// Configuration and shared constants

pub mod analyzer;
pub mod env;
pub mod file;

pub use analyzer::{AnalyzerConfig, ConfigValidation};
pub use env::ApiKeys;
pub use file::FileConfig;
