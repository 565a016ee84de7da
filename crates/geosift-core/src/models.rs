//! Domain models shared across the geosift crates.

pub mod document;
pub mod geometry;

pub use document::{decode_geometry, fields, Document};
pub use geometry::{Distance, DistanceUnit, Geometry, GeometryKind, SpatialPredicate};
