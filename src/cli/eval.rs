// src/cli/eval.rs
// CLI handler for `reviewsense eval`

use anyhow::{Context, Result, bail};
use std::path::Path;
use tracing::info;

use reviewsense::eval::{evaluate, load_csv, sample};
use reviewsense::sentiment::Analyzer;

/// Load, sample, evaluate, print the report
pub async fn run_eval(
    analyzer: &Analyzer,
    csv: &Path,
    review_col: &str,
    label_col: &str,
    sample_size: usize,
    seed: u64,
) -> Result<()> {
    let rows = load_csv(csv, review_col, label_col)
        .with_context(|| format!("Failed to load {}", csv.display()))?;
    if rows.is_empty() {
        bail!("No usable rows in {}", csv.display());
    }

    let rows = sample(rows, sample_size, seed);
    info!(rows = rows.len(), "Starting evaluation");

    let report = evaluate(analyzer, &rows, csv.display().to_string()).await;
    println!("{}", report.render());
    Ok(())
}
