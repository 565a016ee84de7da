//! Geosift Engine - Spatial predicate filter engine
//!
//! Evaluates geometric constraints (bounding box, point, line) against
//! every document of a search index, reprojecting coordinate reference
//! systems as needed, and produces a matching-document bitset. Filters
//! compose with boolean operators through [`chain::SerialChainFilter`]
//! and pair with a textual query through [`query::SpatialQuery`].

pub mod bitset;
pub mod chain;
pub(crate) mod geom;
pub mod memory;
pub mod ports;
pub mod query;
pub mod spatial;
pub mod transform;

pub use bitset::BitSet;
pub use chain::{ChainOp, SerialChainFilter};
pub use memory::MemoryIndex;
pub use ports::{DocId, Filter, IndexReader};
pub use query::SpatialQuery;
pub use spatial::SpatialFilter;
