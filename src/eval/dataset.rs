// src/eval/dataset.rs
// Labelled review datasets: CSV loading and seeded sampling

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{Result, SentimentError};
use crate::sentiment::types::Label;

pub const DEFAULT_REVIEW_COLUMN: &str = "review";
pub const DEFAULT_LABEL_COLUMN: &str = "sentiment";
pub const DEFAULT_SAMPLE_SIZE: usize = 50;
pub const DEFAULT_SEED: u64 = 42;

/// One review with its ground-truth class
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledReview {
    pub text: String,
    pub label: Label,
}

/// Load labelled reviews from a CSV file with a header row.
///
/// Rows with an empty review or a label outside Positive/Negative/Neutral
/// are skipped with a warning.
pub fn load_csv(path: &Path, review_col: &str, label_col: &str) -> Result<Vec<LabeledReview>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let review_idx = column_index(&headers, review_col)?;
    let label_idx = column_index(&headers, label_col)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let text = record.get(review_idx).unwrap_or_default();
        let raw_label = record.get(label_idx).unwrap_or_default();

        if text.trim().is_empty() {
            warn!(row = line + 1, "Skipping row with empty review");
            skipped += 1;
            continue;
        }
        let Some(label) = Label::from_dataset(raw_label) else {
            warn!(row = line + 1, label = %raw_label, "Skipping row with unknown label");
            skipped += 1;
            continue;
        };

        rows.push(LabeledReview {
            text: text.to_string(),
            label,
        });
    }

    info!(
        path = %path.display(),
        loaded = rows.len(),
        skipped,
        "Loaded evaluation dataset"
    );
    Ok(rows)
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        let available: Vec<&str> = headers.iter().collect();
        SentimentError::Dataset(format!(
            "column '{}' not found (available: {})",
            name,
            available.join(", ")
        ))
    })
}

/// Seeded random subset of `sample_size` rows, in input order.
///
/// Returns every row when `sample_size` is 0 or not smaller than the dataset.
pub fn sample(rows: Vec<LabeledReview>, sample_size: usize, seed: u64) -> Vec<LabeledReview> {
    if sample_size == 0 || rows.len() <= sample_size {
        return rows;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut picked = rand::seq::index::sample(&mut rng, rows.len(), sample_size).into_vec();
    picked.sort_unstable();
    debug!(total = rows.len(), sample_size, seed, "Sampled evaluation rows");

    let mut keep = vec![false; rows.len()];
    for idx in picked {
        keep[idx] = true;
    }
    rows.into_iter()
        .zip(keep)
        .filter_map(|(row, k)| k.then_some(row))
        .collect()
}
