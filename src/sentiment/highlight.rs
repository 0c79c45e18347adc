// src/sentiment/highlight.rs
// Marks evidence phrases inside the review text for display

use std::ops::Range;

/// Wrap every literal occurrence of each phrase in `open`/`close`.
///
/// Matching is case-sensitive. Overlapping or adjacent matches are merged
/// into one span, so markers never nest. Empty phrases are ignored.
pub fn highlight_evidence(text: &str, phrases: &[String], open: &str, close: &str) -> String {
    let spans = merged_spans(text, phrases);
    if spans.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + spans.len() * (open.len() + close.len()));
    let mut cursor = 0;
    for span in spans {
        out.push_str(&text[cursor..span.start]);
        out.push_str(open);
        out.push_str(&text[span.clone()]);
        out.push_str(close);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn merged_spans(text: &str, phrases: &[String]) -> Vec<Range<usize>> {
    let mut spans: Vec<Range<usize>> = phrases
        .iter()
        .filter(|p| !p.is_empty())
        .flat_map(|p| text.match_indices(p.as_str()).map(|(i, m)| i..i + m.len()))
        .collect();
    spans.sort_by_key(|r| (r.start, r.end));

    let mut merged: Vec<Range<usize>> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}
