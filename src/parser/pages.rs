use super::lines::LineKind;
use super::model::PageMarker;

/// Page number in effect at each line. Pages default to 1 before the first header.
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    markers: Vec<PageMarker>,
}

impl PageIndex {
    pub fn build(kinds: &[LineKind]) -> Self {
        let mut index = PageIndex::default();
        for (i, kind) in kinds.iter().enumerate() {
            index.observe(i, kind);
        }
        index
    }

    /// Lines must be fed in ascending order.
    pub fn observe(&mut self, line: usize, kind: &LineKind) {
        if let LineKind::PageHeader(page) = kind {
            self.markers.push(PageMarker { line, page: *page });
        }
    }

    pub fn page_at(&self, line: usize) -> u32 {
        let idx = self.markers.partition_point(|m| m.line <= line);
        if idx == 0 {
            1
        } else {
            self.markers[idx - 1].page
        }
    }

    pub fn markers(&self) -> &[PageMarker] {
        &self.markers
    }
}
