// src/cli/analyze.rs
// CLI handler for `reviewsense analyze`

use anyhow::{Result, bail};

use reviewsense::repl::format_result;
use reviewsense::sentiment::Analyzer;

/// Analyze one review and print it; an `Error` result fails the command
pub async fn run_analyze(analyzer: &Analyzer, review: &str, json: bool) -> Result<()> {
    let result = analyzer.analyze(review).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if !result.is_error() {
        println!("{}", format_result(review, &result));
    }

    if result.is_error() {
        bail!("{}", result.explanation);
    }
    Ok(())
}
