//! In-memory index implementation for development and testing.

use geosift_core::error::Result;
use geosift_core::models::Document;

use crate::ports::{DocId, IndexReader};

/// Append-only in-memory index. The document id is the insertion
/// position.
#[derive(Debug, Clone, Default)]
pub struct MemoryIndex {
    docs: Vec<Document>,
}

impl MemoryIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, returning its id.
    pub fn add(&mut self, doc: Document) -> DocId {
        self.docs.push(doc);
        (self.docs.len() - 1) as DocId
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// True when the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl IndexReader for MemoryIndex {
    fn max_doc(&self) -> usize {
        self.docs.len()
    }

    fn documents_with_field(&self, field: &str, value: &str) -> Result<Vec<(DocId, Document)>> {
        Ok(self
            .docs
            .iter()
            .enumerate()
            .filter(|(_, doc)| doc.field(field) == Some(value))
            .map(|(id, doc)| (id as DocId, doc.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geosift_core::models::fields;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut index = MemoryIndex::new();
        let a = index.add(Document::for_point(1.0, 1.0, "EPSG:4326"));
        let b = index.add(Document::for_line(0.0, 0.0, 1.0, 1.0, "EPSG:4326"));
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(index.max_doc(), 2);
    }

    #[test]
    fn test_field_scan() {
        let mut index = MemoryIndex::new();
        index.add(Document::for_point(1.0, 1.0, "EPSG:4326"));
        index.add(Document::for_line(0.0, 0.0, 1.0, 1.0, "EPSG:4326"));
        index.add(Document::for_point(2.0, 2.0, "EPSG:4326"));

        let points = index.documents_with_field(fields::GEOMETRY, "point").unwrap();
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].0, 0);
        assert_eq!(points[1].0, 2);

        let lines = index.documents_with_field(fields::GEOMETRY, "line").unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, 1);
    }
}
