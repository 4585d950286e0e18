use crate::query::SearchQuery;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A named, persisted query for reuse.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    pub name: String,
    pub query: SearchQuery,
}

/// Seam for the external saved-segment collaborator. Storage backends are
/// out of scope here; tests and demos use the in-memory implementation.
pub trait SegmentStore {
    /// Save under the segment's name, replacing any previous segment with
    /// the same name.
    fn save(&mut self, segment: Segment);
    fn get(&self, name: &str) -> Option<&Segment>;
    fn delete(&mut self, name: &str) -> Option<Segment>;
    fn list(&self) -> Vec<&Segment>;
}

#[derive(Debug, Default)]
pub struct InMemorySegmentStore {
    segments: IndexMap<String, Segment>,
}

impl InMemorySegmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SegmentStore for InMemorySegmentStore {
    fn save(&mut self, segment: Segment) {
        self.segments.insert(segment.name.clone(), segment);
    }

    fn get(&self, name: &str) -> Option<&Segment> {
        self.segments.get(name)
    }

    fn delete(&mut self, name: &str) -> Option<Segment> {
        self.segments.shift_remove(name)
    }

    fn list(&self) -> Vec<&Segment> {
        self.segments.values().collect()
    }
}
