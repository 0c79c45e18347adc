//! ANSI color helpers for the REPL
//!
//! Plain escape codes; every helper resets afterwards.

/// ANSI escape codes
pub mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const UNDERLINE: &str = "\x1b[4m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const GRAY: &str = "\x1b[90m";
}

use crate::sentiment::types::Label;
use ansi::*;

/// Color keyed to a sentiment label
pub fn label_color(label: Label) -> &'static str {
    match label {
        Label::Positive => GREEN,
        Label::Negative => RED,
        Label::Neutral => YELLOW,
        Label::Error => GRAY,
    }
}

/// Bold, colored label text
pub fn label_badge(label: Label) -> String {
    format!("{}{}{}{}", BOLD, label_color(label), label, RESET)
}

/// Opening marker for highlighted evidence
pub fn evidence_open(label: Label) -> String {
    format!("{}{}", UNDERLINE, label_color(label))
}

pub fn error(msg: &str) -> String {
    format!("{}{}{}", RED, msg, RESET)
}

/// Gray/dim status text
pub fn status(msg: &str) -> String {
    format!("{}{}{}", GRAY, msg, RESET)
}

pub fn header(msg: &str) -> String {
    format!("{}{}{}", BOLD, msg, RESET)
}

pub fn prompt() -> String {
    format!("{}{}review> {}", BOLD, MAGENTA, RESET)
}

/// Dim label column for result lines
pub fn field(name: &str) -> String {
    format!("{}{:<12}{}", DIM, name, RESET)
}
