// src/eval/mod.rs
// Batch evaluation against labelled CSV datasets

pub mod dataset;
pub mod report;

pub use dataset::{LabeledReview, load_csv, sample};
pub use report::{ClassMetrics, ConfusionMatrix, EvalReport, evaluate};
