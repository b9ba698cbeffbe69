//! Stage 3: whitespace canonicalization.
//!
//! Pure and total; replacement order matters for deterministic output.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(" +").expect("static pattern"));
static BLANK_LINE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("\n{3,}").expect("static pattern"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedText {
    pub normalized_text: String,
    pub original_length: usize,
    pub normalized_length: usize,
}

/// Canonicalize line breaks and whitespace. Applied in order: CRLF/CR to
/// LF, tab to space, collapse space runs, collapse 2+ blank lines to one,
/// trim. Idempotent; output never contains a tab or 3+ consecutive
/// newlines.
pub fn normalize_text(text: &str) -> NormalizedText {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n").replace('\t', " ");
    let spaced = SPACE_RUNS.replace_all(&unified, " ");
    let collapsed = BLANK_LINE_RUNS.replace_all(&spaced, "\n\n");
    let normalized = collapsed.trim().to_string();

    NormalizedText {
        original_length: text.len(),
        normalized_length: normalized.len(),
        normalized_text: normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_line_breaks() {
        let out = normalize_text("a\r\nb\rc\nd");
        assert_eq!(out.normalized_text, "a\nb\nc\nd");
    }

    #[test]
    fn tabs_become_single_spaces() {
        let out = normalize_text("a\t\tb\tc");
        assert_eq!(out.normalized_text, "a b c");
    }

    #[test]
    fn collapses_space_runs() {
        let out = normalize_text("a    b  c");
        assert_eq!(out.normalized_text, "a b c");
    }

    #[test]
    fn at_most_one_blank_line_between_paragraphs() {
        let out = normalize_text("para one\n\n\n\n\npara two\n\n\npara three");
        assert_eq!(out.normalized_text, "para one\n\npara two\n\npara three");
    }

    #[test]
    fn trims_outer_whitespace() {
        let out = normalize_text("  \n  body  \n  ");
        assert_eq!(out.normalized_text, "body");
    }

    #[test]
    fn reports_lengths() {
        let out = normalize_text("a  b");
        assert_eq!(out.original_length, 4);
        assert_eq!(out.normalized_length, 3);
    }

    #[test]
    fn idempotent_on_arbitrary_input() {
        let samples = [
            "",
            "plain",
            "a\r\n\r\n\r\nb\t\tc   d",
            "\n\n\nx\n\n\n",
            "mixed \r tabs\tand   spaces\n\n\n\n",
        ];
        for s in samples {
            let once = normalize_text(s).normalized_text;
            let twice = normalize_text(&once).normalized_text;
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn never_emits_tabs_or_triple_newlines() {
        let out = normalize_text("x\t\ty\n\n\n\n\nz\r\n\r\n\r\n").normalized_text;
        assert!(!out.contains('\t'));
        assert!(!out.contains("\n\n\n"));
    }
}
