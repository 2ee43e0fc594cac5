pub mod extract;
pub mod format;
pub mod lines;
pub mod model;
pub mod out_of_range;
pub mod pages;
pub mod sections;
pub mod tagger;

use std::borrow::Cow;

use rayon::prelude::*;
use tracing::debug;

use extract::Snapshot;
use lines::{classify_lines, split_lines};
use model::{ParsedDocument, Segment};
use pages::PageIndex;
use sections::Segmenter;
use tagger::Tagger;

/// Output of pass one: boundaries and the tagged copy of the document.
struct FirstPass {
    tagged: String,
    segments: Vec<Segment>,
}

/// Two passes over an immutable line array:
/// 1. pages + category boundaries + entry tagging in a single scan;
/// 2. per-category extraction over the tagged lines, using the final merged boundaries.
pub fn process_document(markdown: &str) -> ParsedDocument {
    let first = first_pass(markdown);

    let categories: Vec<_> = {
        let lines = split_lines(&first.tagged);
        let kinds = classify_lines(&lines);
        let pages = PageIndex::build(&kinds);
        let snap = Snapshot { lines, kinds, pages: &pages };

        first
            .segments
            .par_iter()
            .map(|seg| extract::extract_category(seg, &snap))
            .collect()
    };

    debug!(
        categories = categories.len(),
        observations = categories.iter().map(|c| c.observation_count).sum::<usize>(),
        "extracted"
    );

    ParsedDocument {
        tagged: first.tagged,
        categories,
    }
}

fn first_pass(markdown: &str) -> FirstPass {
    let lines = split_lines(markdown);
    let kinds = classify_lines(&lines);

    let mut pages = PageIndex::default();
    let mut segmenter = Segmenter::default();
    let mut tagger = Tagger::seeded(&kinds);
    let mut out: Vec<Cow<str>> = Vec::with_capacity(lines.len());

    for (i, (&line, kind)) in lines.iter().zip(&kinds).enumerate() {
        pages.observe(i, kind);
        segmenter.observe(i, kind);
        out.push(tagger.rewrite(line, kind, segmenter.current()));
    }

    let segments = segmenter.finish(lines.len());
    debug!(
        lines = lines.len(),
        pages = pages.markers().len(),
        categories = segments.len(),
        tagged = tagger.tagged(),
        "scanned"
    );

    FirstPass {
        tagged: out.join("\n"),
        segments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lines::OBS_MARKER;

    const SAMPLE: &str = "## Page 1\n### Medications\nJan 5, 2024 Clinic A\nAspirin 81mg\n### Allergies\nPENICILLIN rash reaction";

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/record.md").unwrap()
    }

    #[test]
    fn end_to_end_sample() {
        let doc = process_document(SAMPLE);
        assert_eq!(doc.categories.len(), 2);

        let meds = &doc.categories[0];
        assert_eq!(meds.name, "Medications");
        assert_eq!(meds.observation_count, 1);
        assert_eq!(meds.observations[0].display, "Jan 5, 2024 **Aspirin** **81mg**");
        assert_eq!(meds.observations[0].page, Some(1));

        let allergies = &doc.categories[1];
        assert_eq!(allergies.name, "Allergies");
        assert_eq!(allergies.observation_count, 1);
        assert_eq!(allergies.observations[0].display, "**PENICILLIN** rash reaction");
        assert_eq!(allergies.observations[0].date, "");

        assert!(doc
            .tagged
            .contains(&format!("{}Medications Jan 5, 2024 Clinic A", OBS_MARKER)));
    }

    #[test]
    fn reprocessing_tagged_output_is_stable() {
        let once = process_document(SAMPLE);
        let twice = process_document(&once.tagged);
        assert_eq!(once.tagged, twice.tagged);
        assert_eq!(once.categories, twice.categories);
    }

    #[test]
    fn entry_added_above_tagged_entry_keeps_one_named_marker() {
        let once = process_document("### Lab Results\nJan 1, 2024 Lab\nGLUCOSE 99");
        let edited = once
            .tagged
            .replacen("### Lab Results\n", "### Lab Results\nJan 9, 2024 Lab\nNA 140\n", 1);
        let doc = process_document(&edited);
        assert_eq!(doc.tagged.matches(&format!("{}Lab Results ", OBS_MARKER)).count(), 1);
        assert!(doc.tagged.contains(&format!("\n{}Jan 9, 2024 Lab\n", OBS_MARKER)));
        assert_eq!(doc.categories[0].observation_count, 2);
    }

    #[test]
    fn page_attribution() {
        let md = "## Page 1\n### Clinical Vitals\nJan 1, 2024 Clinic\nBP 120/80\n## Page 5\nFeb 1, 2024 Clinic\nBP 118/76\nHR 64";
        let doc = process_document(md);
        let vitals = &doc.categories[0];
        assert_eq!(vitals.observations.len(), 2);
        assert_eq!(vitals.observations[0].page, Some(1));
        assert_eq!(vitals.observations[1].page, Some(5));
        assert_eq!(vitals.observations[1].line_count, Some(2));
    }

    #[test]
    fn lab_results_merge_by_date() {
        let md = "### Lab Results\nJan 1, 2024 Lab A\nGLUCOSE 99\nK 5.9 OUT OF RANGE\nJan 1, 2024 Lab B\nLDL 190 OUT OF RANG3\nJan 9, 2024 Lab A\nNA 140";
        let doc = process_document(md);
        let labs = &doc.categories[0];
        assert_eq!(labs.observation_count, 2);
        assert_eq!(labs.observations[0].line_count, Some(3));
        assert_eq!(
            labs.observations[0].out_of_range_lines,
            Some(vec!["K 5.9 OUT OF RANGE".to_string(), "LDL 190 OUT OF RANG3".to_string()])
        );
    }

    #[test]
    fn allergy_fallback_trigger() {
        let doc = process_document("### Allergies\nPENICILLIN rash\nLATEX hives\nnone else");
        let allergies = &doc.categories[0];
        assert_eq!(allergies.observation_count, 1);
        assert_eq!(allergies.observations[0].date, "");
    }

    #[test]
    fn immunization_fan_out() {
        let md = "### Immunizations\nOct 2, 2023 Pharmacy\nInfluenza\nTdap\nCOVID-19\n### Conditions\nOct 3, 2023 Clinic\nAsthma";
        let doc = process_document(md);
        let imm = &doc.categories[0];
        assert_eq!(imm.observation_count, 3);
        assert!(imm.observations.iter().all(|o| o.date == "Oct 2, 2023"));
    }

    #[test]
    fn non_allergy_without_markers_is_empty() {
        let doc = process_document("### Medications\nAspirin 81mg\n### Procedures\n");
        assert_eq!(doc.categories.len(), 2);
        assert!(doc.categories.iter().all(|c| c.observations.is_empty()));
    }

    #[test]
    fn empty_document() {
        let doc = process_document("");
        assert!(doc.categories.is_empty());
        assert_eq!(doc.tagged, "");
    }

    #[test]
    fn fixture_categories_in_order() {
        let doc = process_document(&fixture());
        let names: Vec<&str> = doc.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Allergies",
                "Medications",
                "Clinical Notes",
                "Procedures",
                "Conditions",
                "Immunizations",
                "Lab Results",
                "Clinical Vitals",
            ]
        );
    }

    #[test]
    fn fixture_observations() {
        let doc = process_document(&fixture());

        let allergies = doc.category("Allergies").unwrap();
        assert_eq!(allergies.observations[0].display, "**PENICILLIN** hives **SULFA** rash");

        let meds = doc.category("Medications").unwrap();
        assert_eq!(meds.observation_count, 3);
        assert_eq!(meds.observations[2].display, "Mar 2, 2024 **Atorvastatin** **40 mg nightly**");
        assert_eq!(meds.observations[2].page, Some(2));

        let notes = doc.category("Clinical Notes").unwrap();
        assert_eq!(
            notes.observations[0].display,
            "Feb 10, 2024 **Progress Note** by **Dr. Alice Moreno**"
        );

        let procedures = doc.category("Procedures").unwrap();
        assert_eq!(procedures.observations[0].display, "Nov 14, 2023 **Colonoscopy**");

        let imm = doc.category("Immunizations").unwrap();
        assert_eq!(imm.observation_count, 3);

        // Lab Results reappears after Clinical Vitals; both spans merge.
        let labs = doc.category("Lab Results").unwrap();
        assert_eq!(labs.observation_count, 2);
        assert_eq!(labs.observations[0].line_count, Some(4));
        assert_eq!(labs.observations[0].out_of_range_lines.as_ref().map(Vec::len), Some(2));
        assert_eq!(labs.observations[1].page, Some(4));

        let vitals = doc.category("Clinical Vitals").unwrap();
        assert_eq!(vitals.observation_count, 1);
        assert_eq!(vitals.observations[0].line_count, Some(3));
    }

    #[test]
    fn fixture_tagging_is_idempotent() {
        let once = process_document(&fixture());
        let twice = process_document(&once.tagged);
        assert_eq!(once.tagged, twice.tagged);
        assert_eq!(once.observation_total(), twice.observation_total());
    }
}
