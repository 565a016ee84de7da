//! Ports consumed and exposed by the filter engine.

use geosift_core::error::Result;
use geosift_core::models::Document;

use crate::bitset::BitSet;

/// Document identifier within an index.
pub type DocId = u32;

/// Port for read-only access to an already-built search index.
///
/// Errors from these methods indicate total unavailability of the data
/// source and abort any scan in progress.
pub trait IndexReader: Send + Sync {
    /// Upper bound on document ids (exclusive).
    fn max_doc(&self) -> usize;

    /// All documents whose `field` equals `value`, with their ids.
    fn documents_with_field(&self, field: &str, value: &str) -> Result<Vec<(DocId, Document)>>;
}

/// A component producing a matching-document bitset: a single
/// [`crate::SpatialFilter`] or a composite
/// [`crate::SerialChainFilter`].
///
/// Filters are stateless after construction; each call allocates a fresh
/// bitset, so instances are safe to share across concurrent queries.
pub trait Filter: Send + Sync {
    /// Evaluate against every document in the index.
    fn bits(&self, reader: &dyn IndexReader) -> Result<BitSet>;
}
