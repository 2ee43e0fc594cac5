use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// OCR often mangles the last letter of RANGE, so only RANG is required.
static OUT_OF_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bOUT\b.*?\bOF\b.*?\bRANG").unwrap());
static RANG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)RANG\S").unwrap());

pub fn is_out_of_range(line: &str) -> bool {
    OUT_OF_RANGE_RE.is_match(line)
}

/// Flagged lines, trimmed, in source order.
pub fn collect(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| is_out_of_range(l))
        .map(str::to_string)
        .collect()
}

/// Display-only repair of a corrupted `RANGE` token.
pub fn repair_label(line: &str) -> Cow<'_, str> {
    RANG_RE.replace_all(line, "RANGE")
}
