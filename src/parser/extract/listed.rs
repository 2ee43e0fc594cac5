use std::sync::LazyLock;

use regex::Regex;

use super::Entry;
use crate::parser::format;
use crate::parser::lines::{content_lines, OBS_MARKER};
use crate::parser::model::Observation;

static SUBHEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:#{1,6}\s*)?(?:procedures?\s*:\s*)?").unwrap());

/// Conditions: `date **first line**`.
pub fn extract_first_line(entries: &[Entry]) -> Vec<Observation> {
    entries
        .iter()
        .filter_map(|e| {
            let line = content_lines(&e.body).next()?;
            Some(listed(e, line))
        })
        .collect()
}

/// Procedures: like conditions, but a sub-header prefix (`#### `, `Procedure:`) is dropped.
pub fn extract_procedures(entries: &[Entry]) -> Vec<Observation> {
    entries
        .iter()
        .filter_map(|e| {
            let line = e
                .body
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.starts_with(OBS_MARKER))
                .map(strip_subheader)
                .find(|l| !l.is_empty())?;
            Some(listed(e, line))
        })
        .collect()
}

/// Immunizations: one observation per content line, all sharing the marker's date.
pub fn extract_fan_out(entries: &[Entry]) -> Vec<Observation> {
    entries
        .iter()
        .flat_map(|e| content_lines(&e.body).map(move |line| listed(e, line)))
        .collect()
}

fn listed(entry: &Entry, line: &str) -> Observation {
    Observation::new(entry.date, format::listed(entry.date, line), Some(entry.page))
}

fn strip_subheader(line: &str) -> &str {
    match SUBHEADER_RE.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}
