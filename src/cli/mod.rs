// src/cli/mod.rs
// Command-line surface: argument parsing and analyzer assembly

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use reviewsense::config::env::non_empty;
use reviewsense::config::{AnalyzerConfig, ApiKeys, FileConfig};
use reviewsense::eval::dataset::{
    DEFAULT_LABEL_COLUMN, DEFAULT_REVIEW_COLUMN, DEFAULT_SAMPLE_SIZE, DEFAULT_SEED,
};
use reviewsense::llm::GeminiClient;
use reviewsense::sentiment::Analyzer;

pub mod analyze;
pub mod eval;

pub use analyze::run_analyze;
pub use eval::run_eval;

#[derive(Parser)]
#[command(name = "reviewsense")]
#[command(about = "Classify movie reviews as Positive, Negative or Neutral using Gemini")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub options: AnalyzerArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Settings shared by every command; unset flags fall back to the config file
#[derive(Args, Debug, Default)]
pub struct AnalyzerArgs {
    /// Gemini model name
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Confidence below which predictions become Neutral
    #[arg(long, global = true)]
    pub neutral_threshold: Option<f32>,

    /// Cap on generated tokens per call
    #[arg(long, global = true)]
    pub max_output_tokens: Option<u32>,

    /// Per-call timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Config file (default: ~/.reviewsense/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single review
    Analyze {
        /// Review text
        review: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive review loop
    Repl {
        /// Do not feed the previous explanation into the next review
        #[arg(long)]
        no_chain: bool,
    },

    /// Evaluate accuracy against a labelled CSV file
    Eval {
        /// CSV file with a header row
        csv: PathBuf,

        /// Column holding the review text
        #[arg(long, default_value = DEFAULT_REVIEW_COLUMN)]
        review_col: String,

        /// Column holding the true label
        #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
        label_col: String,

        /// Rows to sample (0 = all)
        #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
        sample_size: usize,

        /// Sampling seed
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
}

impl Commands {
    /// Default log directive; interactive commands stay quiet
    pub fn default_log_directive(&self) -> &'static str {
        match self {
            Commands::Eval { .. } => "reviewsense=info",
            Commands::Analyze { .. } | Commands::Repl { .. } => "reviewsense=warn",
        }
    }
}

/// Layer CLI flags over file values over defaults
pub fn resolve_config(args: &AnalyzerArgs, file: &FileConfig) -> AnalyzerConfig {
    let mut config = file.apply(AnalyzerConfig::default());

    if let Some(ref model) = args.model {
        config = config.with_model(model.clone());
    }
    if let Some(t) = args.temperature {
        config = config.with_temperature(t);
    }
    if let Some(n) = args.neutral_threshold {
        config = config.with_neutral_threshold(n);
    }
    if let Some(m) = args.max_output_tokens {
        config = config.with_max_output_tokens(m);
    }
    if let Some(secs) = args.timeout {
        config = config.with_request_timeout(std::time::Duration::from_secs(secs));
    }

    config
}

/// CLI flag (or GEMINI_API_KEY through clap), then GOOGLE_API_KEY, then the file
pub fn resolve_api_key(args: &AnalyzerArgs, env: &ApiKeys, file: &FileConfig) -> Option<String> {
    args.api_key
        .as_deref()
        .and_then(non_empty)
        .or_else(|| env.gemini.clone())
        .or_else(|| file.gemini_api_key.as_deref().and_then(non_empty))
}

/// Build the analyzer from flags, environment and config file
pub fn build_analyzer(args: &AnalyzerArgs) -> Result<Arc<Analyzer>> {
    let file = match args.config {
        Some(ref path) => FileConfig::load_from(path),
        None => FileConfig::load(),
    };

    let config = resolve_config(args, &file);
    let validation = config.validate();
    for w in &validation.warnings {
        warn!("{}", w);
    }
    if !validation.is_valid() {
        bail!("Invalid configuration:\n{}", validation.report());
    }

    let Some(api_key) = resolve_api_key(args, &ApiKeys::from_env(), &file) else {
        bail!(
            "No API key configured. Set GEMINI_API_KEY, pass --api-key, \
             or add gemini_api_key to ~/.reviewsense/config.toml"
        );
    };

    info!(
        model = %config.model,
        temperature = config.temperature,
        neutral_threshold = config.neutral_threshold,
        "Analyzer ready"
    );

    let client = GeminiClient::with_model(api_key, config.model.clone());
    Ok(Arc::new(Analyzer::new(Arc::new(client), config)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval_defaults() {
        let cli = Cli::parse_from(["reviewsense", "eval", "reviews.csv"]);
        match cli.command {
            Commands::Eval {
                csv,
                review_col,
                label_col,
                sample_size,
                seed,
            } => {
                assert_eq!(csv, PathBuf::from("reviews.csv"));
                assert_eq!(review_col, "review");
                assert_eq!(label_col, "sentiment");
                assert_eq!(sample_size, 50);
                assert_eq!(seed, 42);
            }
            _ => panic!("expected eval"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "reviewsense",
            "analyze",
            "Great film",
            "--json",
            "--neutral-threshold",
            "0.7",
        ]);
        assert_eq!(cli.options.neutral_threshold, Some(0.7));
        assert!(matches!(cli.command, Commands::Analyze { json: true, .. }));
    }

    #[test]
    fn test_resolve_config_precedence() {
        let file: FileConfig =
            toml::from_str("[analyzer]\nmodel = \"from-file\"\ntemperature = 0.9\n").unwrap();
        let args = AnalyzerArgs {
            temperature: Some(0.1),
            timeout: Some(5),
            ..Default::default()
        };
        let config = resolve_config(&args, &file);
        assert_eq!(config.model, "from-file");
        assert_eq!(config.temperature, 0.1);
        assert_eq!(config.request_timeout, std::time::Duration::from_secs(5));
        assert_eq!(config.neutral_threshold, 0.5);
    }

    #[test]
    fn test_resolve_api_key_precedence() {
        let file: FileConfig = toml::from_str("gemini_api_key = \"file-key\"").unwrap();
        let env = ApiKeys {
            gemini: Some("env-key".to_string()),
        };
        let mut args = AnalyzerArgs {
            api_key: Some("cli-key".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_api_key(&args, &env, &file).as_deref(), Some("cli-key"));

        args.api_key = Some("  ".to_string());
        assert_eq!(resolve_api_key(&args, &env, &file).as_deref(), Some("env-key"));

        assert_eq!(
            resolve_api_key(&args, &ApiKeys::default(), &file).as_deref(),
            Some("file-key")
        );
        assert_eq!(
            resolve_api_key(&args, &ApiKeys::default(), &FileConfig::default()),
            None
        );
    }
}
