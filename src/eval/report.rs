// src/eval/report.rs
// Accuracy, confusion matrix and per-class metrics for an evaluation run

use std::fmt::Write as _;
use std::time::Instant;
use tracing::info;

use super::dataset::LabeledReview;
use crate::sentiment::analyzer::Analyzer;
use crate::sentiment::types::Label;

const RULE_WIDTH: usize = 60;

/// 3x3 counts indexed `[true][predicted]` over `Label::CLASSES`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionMatrix {
    counts: [[usize; 3]; 3],
}

impl ConfusionMatrix {
    /// Record one pair; `Error` on either side is ignored
    pub fn record(&mut self, truth: Label, predicted: Label) {
        if let (Some(t), Some(p)) = (truth.class_index(), predicted.class_index()) {
            self.counts[t][p] += 1;
        }
    }

    pub fn get(&self, truth: Label, predicted: Label) -> usize {
        match (truth.class_index(), predicted.class_index()) {
            (Some(t), Some(p)) => self.counts[t][p],
            _ => 0,
        }
    }

    fn column_total(&self, p: usize) -> usize {
        self.counts.iter().map(|row| row[p]).sum()
    }
}

/// Precision, recall and F1 for one class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    pub label: Label,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class tallies for the mini-report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassCounts {
    pub truth: usize,
    pub predicted: usize,
    pub correct: usize,
}

#[derive(Debug, Clone, Default)]
pub struct EvalReport {
    pub source: String,
    pub total: usize,
    pub correct: usize,
    /// Predictions labelled `Error`; counted wrong, kept out of the matrix
    pub errors: usize,
    pub counts: [ClassCounts; 3],
    pub matrix: ConfusionMatrix,
}

impl EvalReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    pub fn record(&mut self, truth: Label, predicted: Label) {
        self.total += 1;
        if truth == predicted {
            self.correct += 1;
        }
        if predicted == Label::Error {
            self.errors += 1;
        }

        if let Some(t) = truth.class_index() {
            self.counts[t].truth += 1;
            if truth == predicted {
                self.counts[t].correct += 1;
            }
        }
        if let Some(p) = predicted.class_index() {
            self.counts[p].predicted += 1;
        }
        self.matrix.record(truth, predicted);
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }

    pub fn counts_for(&self, label: Label) -> ClassCounts {
        label
            .class_index()
            .map(|i| self.counts[i])
            .unwrap_or_default()
    }

    /// Metrics for each class in `Label::CLASSES` order
    pub fn class_metrics(&self) -> Vec<ClassMetrics> {
        Label::CLASSES
            .iter()
            .enumerate()
            .map(|(i, &label)| {
                let tp = self.matrix.counts[i][i];
                // Recall is over every true instance, including Error predictions
                let support = self.counts[i].truth;
                let precision = ratio(tp, self.matrix.column_total(i));
                let recall = ratio(tp, support);
                ClassMetrics {
                    label,
                    precision,
                    recall,
                    f1: f1(precision, recall),
                    support,
                }
            })
            .collect()
    }

    /// Unweighted mean of (precision, recall, f1) across classes
    pub fn macro_average(&self) -> (f64, f64, f64) {
        let metrics = self.class_metrics();
        let n = metrics.len() as f64;
        let sum = metrics.iter().fold((0.0, 0.0, 0.0), |acc, m| {
            (acc.0 + m.precision, acc.1 + m.recall, acc.2 + m.f1)
        });
        (sum.0 / n, sum.1 / n, sum.2 / n)
    }

    /// Mini-report, confusion matrix and classification report as text
    pub fn render(&self) -> String {
        let mut out = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        let _ = writeln!(out, "Sentiment Analysis Mini-Report");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Dataset: {}", self.source);
        let _ = writeln!(out, "Total test samples: {}", self.total);
        let _ = writeln!(out, "Overall Accuracy: {:.2}%", self.accuracy() * 100.0);
        if self.errors > 0 {
            let _ = writeln!(out, "Failed analyses: {}", self.errors);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Per-class results:");
        for label in Label::CLASSES {
            let c = self.counts_for(label);
            let _ = writeln!(out, "  {}:", label);
            let _ = writeln!(out, "    True count:    {}", c.truth);
            let _ = writeln!(out, "    Predicted:     {}", c.predicted);
            let _ = writeln!(out, "    Correct:       {}", c.correct);
        }
        let _ = writeln!(out, "{}", rule);

        let _ = writeln!(out);
        let _ = writeln!(out, "Confusion Matrix");
        let _ = write!(out, "{:<16}", "");
        for label in Label::CLASSES {
            let _ = write!(out, "{:>16}", format!("Pred {}", label));
        }
        let _ = writeln!(out);
        for (t, truth) in Label::CLASSES.iter().enumerate() {
            let _ = write!(out, "{:<16}", format!("True {}", truth));
            for p in 0..Label::CLASSES.len() {
                let _ = write!(out, "{:>16}", self.matrix.counts[t][p]);
            }
            let _ = writeln!(out);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Classification Report");
        let _ = writeln!(
            out,
            "{:>12}{:>11}{:>10}{:>10}{:>10}",
            "", "precision", "recall", "f1-score", "support"
        );
        for m in self.class_metrics() {
            let _ = writeln!(
                out,
                "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}",
                m.label.as_str(),
                m.precision,
                m.recall,
                m.f1,
                m.support
            );
        }
        let (p, r, f) = self.macro_average();
        let support: usize = (0..Label::CLASSES.len())
            .map(|t| self.counts[t].truth)
            .sum();
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{:>12}{:>11.2}{:>10.2}{:>10.2}{:>10}",
            "macro avg", p, r, f, support
        );

        out
    }
}

/// Analyze each row in order and tally the outcome
pub async fn evaluate(
    analyzer: &Analyzer,
    rows: &[LabeledReview],
    source: impl Into<String>,
) -> EvalReport {
    let mut report = EvalReport::new(source);
    let start = Instant::now();

    for (i, row) in rows.iter().enumerate() {
        let result = analyzer.analyze(&row.text).await;
        report.record(row.label, result.label);
        info!(
            row = i + 1,
            of = rows.len(),
            truth = %row.label,
            predicted = %result.label,
            "Evaluated review"
        );
    }

    info!(
        total = report.total,
        correct = report.correct,
        accuracy = report.accuracy(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Evaluation complete"
    );
    report
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}
