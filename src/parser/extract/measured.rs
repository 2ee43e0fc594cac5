use std::collections::HashMap;

use super::Entry;
use crate::parser::format;
use crate::parser::lines::content_lines;
use crate::parser::model::Observation;
use crate::parser::out_of_range;

struct Merged<'a> {
    date: &'a str,
    page: u32,
    lines: usize,
    out_of_range: Vec<String>,
}

/// Vitals and lab results: entries sharing a date collapse into one, keeping
/// the first entry's page and position. Lab results also carry their flagged lines.
pub fn extract(entries: &[Entry], flag_out_of_range: bool) -> Vec<Observation> {
    let mut merged: Vec<Merged> = Vec::new();
    let mut by_date: HashMap<&str, usize> = HashMap::new();

    for e in entries {
        let lines = content_lines(&e.body).count();
        let flagged = if flag_out_of_range {
            out_of_range::collect(&e.body)
        } else {
            Vec::new()
        };

        match by_date.get(e.date) {
            Some(&i) => {
                merged[i].lines += lines;
                merged[i].out_of_range.extend(flagged);
            }
            None => {
                by_date.insert(e.date, merged.len());
                merged.push(Merged {
                    date: e.date,
                    page: e.page,
                    lines,
                    out_of_range: flagged,
                });
            }
        }
    }

    merged
        .into_iter()
        .map(|m| Observation {
            date: m.date.to_string(),
            display: format::measured(m.date, m.lines, Some(m.page)),
            page: Some(m.page),
            line_count: Some(m.lines),
            out_of_range_lines: flag_out_of_range.then_some(m.out_of_range),
        })
        .collect()
}
