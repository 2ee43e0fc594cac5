use std::collections::HashMap;

use super::lines::LineKind;
use super::model::Segment;

/// Incremental category segmenter, fed one classified line at a time.
///
/// Each `### Name` header closes the open category at the line before it.
/// A name that reappears keeps its earliest start and extends its end.
#[derive(Debug, Default)]
pub struct Segmenter {
    segments: Vec<Segment>,
    by_name: HashMap<String, usize>,
    /// (segment index, start line of the open span)
    open: Option<(usize, usize)>,
}

impl Segmenter {
    pub fn observe(&mut self, line: usize, kind: &LineKind) {
        let LineKind::CategoryHeader(name) = kind else {
            return;
        };
        if line > 0 {
            self.close(line - 1);
        }
        let seg = match self.by_name.get(*name) {
            Some(&i) => i,
            None => {
                self.segments.push(Segment {
                    name: name.to_string(),
                    start: line,
                    end: line,
                    spans: Vec::new(),
                });
                self.by_name.insert(name.to_string(), self.segments.len() - 1);
                self.segments.len() - 1
            }
        };
        self.open = Some((seg, line));
    }

    /// Name of the category whose header currently owns the scan position.
    pub fn current(&self) -> Option<&str> {
        self.open.map(|(i, _)| self.segments[i].name.as_str())
    }

    pub fn finish(mut self, line_count: usize) -> Vec<Segment> {
        if line_count > 0 {
            self.close(line_count - 1);
        }
        self.segments
    }

    fn close(&mut self, end: usize) {
        if let Some((i, start)) = self.open.take() {
            let seg = &mut self.segments[i];
            seg.end = seg.end.max(end);
            seg.spans.push(start..=end);
        }
    }
}

/// Category boundaries in first-appearance order.
pub fn segment_categories(kinds: &[LineKind]) -> Vec<Segment> {
    let mut segmenter = Segmenter::default();
    for (i, kind) in kinds.iter().enumerate() {
        segmenter.observe(i, kind);
    }
    segmenter.finish(kinds.len())
}
