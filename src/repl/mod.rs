//! Interactive REPL for reviewsense
//!
//! Reads one review per line, analyzes it and prints the result with the
//! evidence highlighted. Optionally chains the previous explanation into the
//! next review as context.

pub mod colors;

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::sentiment::analyzer::Analyzer;
use crate::sentiment::highlight::highlight_evidence;
use crate::sentiment::types::SentimentResult;
use colors::ansi::RESET;

const CONTEXT_PREFIX: &str = "\n\nPrevious explanation for context: ";
const SEPARATOR_WIDTH: usize = 50;

/// A line of REPL input, classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput<'a> {
    Empty,
    Quit,
    Clear,
    Help,
    Unknown(&'a str),
    Review(&'a str),
}

impl<'a> ReplInput<'a> {
    pub fn parse(line: &'a str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        match line.to_lowercase().as_str() {
            "quit" | "exit" | "q" | "/quit" | "/exit" => Self::Quit,
            "/clear" => Self::Clear,
            "/help" => Self::Help,
            _ if line.starts_with('/') => Self::Unknown(line),
            _ => Self::Review(line),
        }
    }
}

/// Append the previous explanation to a review when chaining is active
pub fn chain_input(review: &str, previous: Option<&str>) -> String {
    match previous {
        Some(explanation) if !explanation.is_empty() => {
            format!("{}{}{}", review, CONTEXT_PREFIX, explanation)
        }
        _ => review.to_string(),
    }
}

/// Render one analysis for the terminal
pub fn format_result(review: &str, result: &SentimentResult) -> String {
    let evidence = if result.evidence_phrases.is_empty() {
        colors::status("(none)")
    } else {
        result.evidence_phrases.join(", ")
    };
    let highlighted = highlight_evidence(
        review,
        &result.evidence_phrases,
        &colors::evidence_open(result.label),
        RESET,
    );

    [
        format!("{} {}", colors::field("Sentiment"), colors::label_badge(result.label)),
        format!("{} {:.2}", colors::field("Confidence"), result.confidence),
        format!("{} {}", colors::field("Explanation"), result.explanation),
        format!("{} {}", colors::field("Evidence"), evidence),
        format!("{} {}", colors::field("Review"), highlighted),
        colors::status(&"=".repeat(SEPARATOR_WIDTH)),
    ]
    .join("\n")
}

/// REPL state
pub struct Repl {
    analyzer: Arc<Analyzer>,
    editor: DefaultEditor,
    /// Feed each explanation into the next review
    chain: bool,
    previous_explanation: Option<String>,
    history_path: PathBuf,
}

impl Repl {
    pub fn new(analyzer: Arc<Analyzer>, chain: bool) -> Result<Self> {
        let editor = DefaultEditor::new()?;
        let history_path = dirs::home_dir()
            .unwrap_or_default()
            .join(".reviewsense")
            .join("history");

        Ok(Self {
            analyzer,
            editor,
            chain,
            previous_explanation: None,
            history_path,
        })
    }

    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    fn print_banner(&self) {
        println!("{}", colors::header("Movie Review Sentiment Analyzer"));
        println!(
            "{}",
            colors::status(&format!(
                "model: {}  chaining: {}  (type /help for commands)",
                self.analyzer.model_name(),
                if self.chain { "on" } else { "off" }
            ))
        );
        println!("{}", colors::status(&"=".repeat(SEPARATOR_WIDTH)));
    }

    fn print_help(&self) {
        println!("  Enter a review to analyze it.");
        println!("  /clear   forget the chained explanation");
        println!("  /help    show this help");
        println!("  quit     exit (also: exit, q, Ctrl-D)");
    }

    /// Run until the user quits or input ends
    pub async fn run(&mut self) -> Result<()> {
        self.load_history();
        self.print_banner();

        loop {
            let line = match self.editor.readline(&colors::prompt()) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!();
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    eprintln!("{}", colors::error(&e.to_string()));
                    continue;
                }
            };

            match ReplInput::parse(&line) {
                ReplInput::Empty => {
                    println!("{}", colors::status("Please enter a review."));
                }
                ReplInput::Quit => break,
                ReplInput::Clear => {
                    self.previous_explanation = None;
                    println!("{}", colors::status("[context cleared]"));
                }
                ReplInput::Help => self.print_help(),
                ReplInput::Unknown(cmd) => {
                    println!("{}", colors::error(&format!("Unknown command: {}", cmd)));
                }
                ReplInput::Review(review) => {
                    let _ = self.editor.add_history_entry(review);
                    self.analyze(review).await;
                }
            }
        }

        self.save_history();
        println!("Goodbye!");
        Ok(())
    }

    async fn analyze(&mut self, review: &str) {
        let context = if self.chain {
            self.previous_explanation.as_deref()
        } else {
            None
        };
        let input = chain_input(review, context);
        debug!(chained = input.len() != review.len(), "Submitting review");

        println!("{}", colors::status("Analyzing..."));
        let result = self.analyzer.analyze(&input).await;

        if result.is_error() {
            println!(
                "{}",
                colors::error(&format!("Analysis failed: {}", result.explanation))
            );
            return;
        }

        println!("{}", format_result(review, &result));
        if self.chain {
            self.previous_explanation = Some(result.explanation);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::types::Label;

    #[test]
    fn test_parse_input() {
        assert_eq!(ReplInput::parse("   "), ReplInput::Empty);
        assert_eq!(ReplInput::parse("quit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(" EXIT "), ReplInput::Quit);
        assert_eq!(ReplInput::parse("q"), ReplInput::Quit);
        assert_eq!(ReplInput::parse("/clear"), ReplInput::Clear);
        assert_eq!(ReplInput::parse("/help"), ReplInput::Help);
        assert_eq!(ReplInput::parse("/nope"), ReplInput::Unknown("/nope"));
        assert_eq!(
            ReplInput::parse("  A quiet film  "),
            ReplInput::Review("A quiet film")
        );
    }

    #[test]
    fn test_chain_input() {
        assert_eq!(chain_input("Great", None), "Great");
        assert_eq!(chain_input("Great", Some("")), "Great");
        assert_eq!(
            chain_input("Great", Some("Was upbeat.")),
            "Great\n\nPrevious explanation for context: Was upbeat."
        );
    }

    #[test]
    fn test_format_result() {
        let result = SentimentResult {
            label: Label::Positive,
            confidence: 0.876,
            explanation: "Upbeat wording".to_string(),
            evidence_phrases: vec!["loved".to_string()],
        };
        let out = format_result("I loved it", &result);
        assert!(out.contains("Positive"));
        assert!(out.contains("0.88"));
        assert!(out.contains("Upbeat wording"));
        assert!(out.contains(&format!("{}loved{}", colors::evidence_open(Label::Positive), RESET)));
    }

    #[test]
    fn test_format_result_without_evidence() {
        let result = SentimentResult {
            label: Label::Neutral,
            confidence: 0.5,
            explanation: String::new(),
            evidence_phrases: Vec::new(),
        };
        assert!(format_result("meh", &result).contains("(none)"));
    }
}
