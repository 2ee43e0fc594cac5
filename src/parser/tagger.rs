use std::borrow::Cow;
use std::collections::HashSet;

use super::lines::{classify_lines, split_lines, LineKind, OBS_MARKER};
use super::sections::Segmenter;

/// Rewrites entry lines with observation markers.
///
/// The first date+place line inside a category gets `OBS_MARKER` + name + space,
/// later ones the bare marker. A category that already holds a marker line
/// anywhere in its spans counts as named before the scan starts, so running
/// over tagged or edited text never adds a second name-qualified line.
#[derive(Debug, Default)]
pub struct Tagger {
    named: HashSet<String>,
    tagged: usize,
}

impl Tagger {
    /// Tagger primed with every category that already owns a marker line.
    pub fn seeded(kinds: &[LineKind]) -> Self {
        let mut tagger = Tagger::default();
        let mut segmenter = Segmenter::default();
        for (i, kind) in kinds.iter().enumerate() {
            segmenter.observe(i, kind);
            if let (LineKind::Marker, Some(owner)) = (kind, segmenter.current()) {
                tagger.named.insert(owner.to_string());
            }
        }
        tagger
    }

    pub fn rewrite<'a>(&mut self, line: &'a str, kind: &LineKind, owner: Option<&str>) -> Cow<'a, str> {
        let Some(owner) = owner else {
            return Cow::Borrowed(line);
        };
        match kind {
            LineKind::Marker => {
                self.named.insert(owner.to_string());
                Cow::Borrowed(line)
            }
            LineKind::DatePlace => {
                self.tagged += 1;
                if self.named.insert(owner.to_string()) {
                    Cow::Owned(format!("{}{} {}", OBS_MARKER, owner, line))
                } else {
                    Cow::Owned(format!("{}{}", OBS_MARKER, line))
                }
            }
            _ => Cow::Borrowed(line),
        }
    }

    /// Lines rewritten so far.
    pub fn tagged(&self) -> usize {
        self.tagged
    }
}

/// Tag a whole document on its own.
pub fn tag_entries(markdown: &str) -> String {
    let lines = split_lines(markdown);
    let kinds = classify_lines(&lines);
    let mut segmenter = Segmenter::default();
    let mut tagger = Tagger::seeded(&kinds);
    let out: Vec<Cow<str>> = lines
        .iter()
        .zip(&kinds)
        .enumerate()
        .map(|(i, (line, kind))| {
            segmenter.observe(i, kind);
            tagger.rewrite(line, kind, segmenter.current())
        })
        .collect();
    out.join("\n")
}
