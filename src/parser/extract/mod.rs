pub mod allergies;
pub mod listed;
pub mod measured;
pub mod medications;
pub mod notes;

use super::lines::{find_date, LineKind};
use super::model::{Category, Observation, Segment};
use super::pages::PageIndex;

/// Extraction strategy, resolved once from the category name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Allergies,
    Medications,
    ClinicalNotes,
    Procedures,
    Conditions,
    Immunizations,
    ClinicalVitals,
    LabResults,
    Other,
}

const KEYWORDS: &[(&str, CategoryKind)] = &[
    ("allerg", CategoryKind::Allergies),
    ("medication", CategoryKind::Medications),
    ("immuni", CategoryKind::Immunizations),
    ("procedure", CategoryKind::Procedures),
    ("condition", CategoryKind::Conditions),
    ("vital", CategoryKind::ClinicalVitals),
    ("lab", CategoryKind::LabResults),
    ("note", CategoryKind::ClinicalNotes),
];

impl CategoryKind {
    pub fn resolve(name: &str) -> Self {
        let lower = name.to_lowercase();
        KEYWORDS
            .iter()
            .find(|(kw, _)| lower.contains(kw))
            .map(|(_, kind)| *kind)
            .unwrap_or(CategoryKind::Other)
    }
}

/// Immutable view of the tagged document shared by every category extraction.
pub struct Snapshot<'a> {
    pub lines: Vec<&'a str>,
    pub kinds: Vec<LineKind<'a>>,
    pub pages: &'a PageIndex,
}

/// One marker line and the lines that follow it up to the next marker.
#[derive(Debug, Clone)]
pub struct Entry<'a> {
    pub date: &'a str,
    pub page: u32,
    pub body: Vec<&'a str>,
}

/// Entries of one category, plus the lines seen before its first marker.
#[derive(Debug, Default)]
pub struct Blocks<'a> {
    pub entries: Vec<Entry<'a>>,
    pub preamble: Vec<&'a str>,
}

/// Walk the category's own spans. Page and category headers never join a body.
pub fn split_blocks<'a>(segment: &Segment, snap: &Snapshot<'a>) -> Blocks<'a> {
    let mut blocks = Blocks::default();
    let owned = segment
        .spans
        .iter()
        .flat_map(|span| span.clone())
        .filter(|&i| i < snap.lines.len());

    for i in owned {
        let line = snap.lines[i];
        match &snap.kinds[i] {
            LineKind::Marker => blocks.entries.push(Entry {
                date: find_date(line).unwrap_or(""),
                page: snap.pages.page_at(i),
                body: Vec::new(),
            }),
            LineKind::PageHeader(_) | LineKind::CategoryHeader(_) => {}
            _ => match blocks.entries.last_mut() {
                Some(entry) => entry.body.push(line),
                None => blocks.preamble.push(line),
            },
        }
    }
    blocks
}

pub fn extract_category(segment: &Segment, snap: &Snapshot) -> Category {
    let kind = CategoryKind::resolve(&segment.name);
    let blocks = split_blocks(segment, snap);

    let observations = match kind {
        CategoryKind::Allergies => {
            allergies::extract(&blocks, snap.pages.page_at(segment.start))
        }
        CategoryKind::Medications => medications::extract(&blocks.entries),
        CategoryKind::ClinicalNotes => notes::extract(&blocks.entries),
        CategoryKind::Procedures => listed::extract_procedures(&blocks.entries),
        CategoryKind::Conditions => listed::extract_first_line(&blocks.entries),
        CategoryKind::Immunizations => listed::extract_fan_out(&blocks.entries),
        CategoryKind::ClinicalVitals => measured::extract(&blocks.entries, false),
        CategoryKind::LabResults => measured::extract(&blocks.entries, true),
        CategoryKind::Other => blocks
            .entries
            .iter()
            .map(|e| Observation::new(e.date, e.date.to_string(), Some(e.page)))
            .collect(),
    };

    Category {
        name: segment.name.clone(),
        start_line: segment.start,
        end_line: segment.end,
        observation_count: observations.len(),
        observations,
    }
}
