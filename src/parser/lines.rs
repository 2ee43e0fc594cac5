use std::sync::LazyLock;

use regex::Regex;

/// Token prepended to every tagged entry line.
pub const OBS_MARKER: &str = "<!--obs-->";

const MONTHS: &str = "Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec";

static PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#{1,6}\s*page\s+(\d+)\b").unwrap());
static CATEGORY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^###\s+(\S.*)$").unwrap());
static DATE_PLACE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^(?:{})\s+\d{{1,2}},\s*\d{{4}}\s+\S", MONTHS)).unwrap()
});
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"\b(?:{})\s+\d{{1,2}},\s*\d{{4}}\b", MONTHS)).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    PageHeader(u32),
    CategoryHeader(&'a str),
    /// Already carries `OBS_MARKER`.
    Marker,
    /// Untagged "date + place" line.
    DatePlace,
    Text,
    Empty,
}

pub fn classify(line: &str) -> LineKind<'_> {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Empty;
    }
    if line.starts_with(OBS_MARKER) {
        return LineKind::Marker;
    }
    if let Some(caps) = PAGE_RE.captures(line) {
        if let Ok(page) = caps[1].parse::<u32>() {
            return LineKind::PageHeader(page);
        }
    }
    if let Some(name) = CATEGORY_RE.captures(line).and_then(|c| c.get(1)) {
        return LineKind::CategoryHeader(name.as_str().trim());
    }
    if DATE_PLACE_RE.is_match(line) {
        return LineKind::DatePlace;
    }
    LineKind::Text
}

pub fn classify_lines<'a>(lines: &[&'a str]) -> Vec<LineKind<'a>> {
    lines.iter().map(|&l| classify(l)).collect()
}

/// Split on `\n` only, so joining with `\n` restores the input byte for byte.
pub fn split_lines(markdown: &str) -> Vec<&str> {
    markdown.split('\n').collect()
}

pub fn is_header(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Trimmed lines that carry entry content: non-empty, not headers, not markers.
pub fn content_lines<'a>(lines: &'a [&'a str]) -> impl Iterator<Item = &'a str> + 'a {
    lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !is_header(l) && !l.starts_with(OBS_MARKER))
}

/// First "Mon D, YYYY" date on the line, wherever the marker prefix left it.
pub fn find_date(line: &str) -> Option<&str> {
    DATE_RE.find(line).map(|m| m.as_str())
}
