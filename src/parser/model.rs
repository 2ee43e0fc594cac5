use std::ops::RangeInclusive;

use serde::Serialize;

/// Page header seen at `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMarker {
    pub line: usize,
    pub page: u32,
}

/// Merged boundary of one category name, plus the header-owned spans it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub start: usize,
    pub end: usize,
    pub spans: Vec<RangeInclusive<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub date: String,
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_of_range_lines: Option<Vec<String>>,
}

impl Observation {
    pub fn new(date: impl Into<String>, display: String, page: Option<u32>) -> Self {
        Observation {
            date: date.into(),
            display,
            page,
            line_count: None,
            out_of_range_lines: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub observation_count: usize,
    pub observations: Vec<Observation>,
}

impl Category {
    pub fn file_key(&self) -> String {
        file_key(&self.name)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedDocument {
    pub tagged: String,
    pub categories: Vec<Category>,
}

impl ParsedDocument {
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn observation_total(&self) -> usize {
        self.categories.iter().map(|c| c.observation_count).sum()
    }
}

/// Storage key for a category: alphanumerics, spaces and hyphens only,
/// whitespace runs collapsed to `_`, lowercased.
pub fn file_key(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    kept.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}
