// src/main.rs
// reviewsense - movie review sentiment classification from the command line

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod cli;

use cli::{Cli, Commands, build_analyzer, run_analyze, run_eval};
use reviewsense::repl::Repl;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env files (global first, then project - project overrides)
    if let Some(home) = dirs::home_dir() {
        let _ = dotenvy::from_path(home.join(".reviewsense/.env"));
    }
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // RUST_LOG wins; otherwise quiet for interactive commands
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.command.default_log_directive()));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let analyzer = build_analyzer(&cli.options)?;

    match cli.command {
        Commands::Analyze { review, json } => {
            run_analyze(&analyzer, &review, json).await?;
        }
        Commands::Repl { no_chain } => {
            Repl::new(analyzer, !no_chain)?.run().await?;
        }
        Commands::Eval {
            csv,
            review_col,
            label_col,
            sample_size,
            seed,
        } => {
            run_eval(&analyzer, &csv, &review_col, &label_col, sample_size, seed).await?;
        }
    }

    Ok(())
}
