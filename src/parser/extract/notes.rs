use super::Entry;
use crate::parser::format;
use crate::parser::lines::content_lines;
use crate::parser::model::Observation;

/// `date **type** by **author**` from the two lines after each marker.
pub fn extract(entries: &[Entry]) -> Vec<Observation> {
    entries
        .iter()
        .map(|e| {
            let mut lines = content_lines(&e.body);
            let kind = lines.next().map(|l| strip_label(l, "Type:"));
            let author = lines.next().map(|l| strip_label(l, "Author:"));
            Observation::new(
                e.date,
                format::clinical_note(e.date, non_empty(kind), non_empty(author)),
                Some(e.page),
            )
        })
        .collect()
}

fn strip_label<'a>(line: &'a str, label: &str) -> &'a str {
    match line.get(..label.len()) {
        Some(head) if head.eq_ignore_ascii_case(label) => line[label.len()..].trim(),
        _ => line,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
