//! Ordered collection of the segments loaded from a PID file

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use super::SegmentDescriptor;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The segments of the course in file order, which is the order they are
/// run in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SegmentCatalog {
    segments: Vec<SegmentDescriptor>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SegmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment to the end of the course.
    pub fn push(&mut self, segment: SegmentDescriptor) {
        self.segments.push(segment);
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SegmentDescriptor> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[SegmentDescriptor] {
        &self.segments
    }
}

impl<'a> IntoIterator for &'a SegmentCatalog {
    type Item = &'a SegmentDescriptor;
    type IntoIter = std::slice::Iter<'a, SegmentDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
