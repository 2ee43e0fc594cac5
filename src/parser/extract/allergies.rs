use super::{Blocks, Entry};
use crate::parser::format;
use crate::parser::lines::content_lines;
use crate::parser::model::Observation;

/// Allergy entries carry no reliable date, so every observation has an empty one.
pub fn extract(blocks: &Blocks, category_page: u32) -> Vec<Observation> {
    if blocks.entries.is_empty() {
        return fallback(&blocks.preamble, category_page).into_iter().collect();
    }
    blocks.entries.iter().filter_map(from_entry).collect()
}

fn from_entry(entry: &Entry) -> Option<Observation> {
    let lines = allergy_lines(&entry.body);
    if lines.is_empty() {
        return None;
    }
    Some(Observation::new("", format::allergy(&lines), Some(entry.page)))
}

/// Whole category body as one observation when no entry line was tagged.
fn fallback(body: &[&str], page: u32) -> Option<Observation> {
    let lines = allergy_lines(body);
    if lines.is_empty() {
        return None;
    }
    Some(Observation::new("", format::allergy(&lines), Some(page)))
}

fn allergy_lines<'a>(body: &'a [&'a str]) -> Vec<&'a str> {
    content_lines(body)
        .filter(|l| l.chars().next().is_some_and(char::is_uppercase))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry<'a>(body: Vec<&'a str>) -> Entry<'a> {
        Entry { date: "Jan 5, 2024", page: 3, body }
    }

    #[test]
    fn entry_lines_are_filtered_and_joined() {
        let blocks = Blocks {
            entries: vec![entry(vec!["PENICILLIN rash", "reviewed by nurse", "", "SULFA hives"])],
            preamble: vec![],
        };
        let obs = extract(&blocks, 1);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].display, "**PENICILLIN** rash **SULFA** hives");
        assert_eq!(obs[0].date, "");
        assert_eq!(obs[0].page, Some(3));
    }

    #[test]
    fn entry_without_qualifying_lines_is_dropped() {
        let blocks = Blocks {
            entries: vec![entry(vec!["none known", "#### Notes"])],
            preamble: vec![],
        };
        assert!(extract(&blocks, 1).is_empty());
    }

    #[test]
    fn fallback_without_markers() {
        let blocks = Blocks {
            entries: vec![],
            preamble: vec!["PENICILLIN rash", "LATEX contact dermatitis", "unverified"],
        };
        let obs = extract(&blocks, 2);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].date, "");
        assert_eq!(obs[0].display, "**PENICILLIN** rash **LATEX** contact dermatitis");
        assert_eq!(obs[0].page, Some(2));
    }

    #[test]
    fn empty_fallback_yields_nothing() {
        let blocks = Blocks { entries: vec![], preamble: vec!["", "lowercase only"] };
        assert!(extract(&blocks, 1).is_empty());
    }

    #[test]
    fn preamble_ignored_once_markers_exist() {
        let blocks = Blocks {
            entries: vec![entry(vec!["EGGS anaphylaxis"])],
            preamble: vec!["PEANUTS hives"],
        };
        let obs = extract(&blocks, 1);
        assert_eq!(obs.len(), 1);
        assert_eq!(obs[0].display, "**EGGS** anaphylaxis");
    }
}
