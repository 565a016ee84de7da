//! Textual query + spatial filter bundle handed to the search front end.

use geosift_core::error::Result;
use geosift_core::models::{Geometry, SpatialPredicate};

use crate::ports::Filter;
use crate::spatial::SpatialFilter;

/// Pairs a textual query string with a (possibly composite) filter. The
/// text is an opaque payload for the out-of-scope search layer; no
/// escaping or validation is applied to appended fragments.
pub struct SpatialQuery {
    query: String,
    filter: Box<dyn Filter>,
}

impl SpatialQuery {
    /// Bundle a pre-built filter (single or composite) with a query text.
    pub fn new(query: impl Into<String>, filter: Box<dyn Filter>) -> Self {
        Self {
            query: query.into(),
            filter,
        }
    }

    /// Build a spatial-only query (empty text) from a simple geometric
    /// constraint. Fails as [`SpatialFilter::new`] does.
    pub fn from_geometry(
        geometry: Geometry,
        crs_name: impl Into<String>,
        predicate: SpatialPredicate,
    ) -> Result<Self> {
        let filter = SpatialFilter::new(geometry, crs_name, predicate)?;
        Ok(Self::new("", Box::new(filter)))
    }

    /// Build a spatial-only query for the distance predicates. Fails as
    /// [`SpatialFilter::with_distance`] does.
    pub fn from_distance(
        geometry: Geometry,
        crs_name: impl Into<String>,
        predicate: SpatialPredicate,
        distance: f64,
        unit: &str,
    ) -> Result<Self> {
        let filter = SpatialFilter::with_distance(geometry, crs_name, predicate, distance, unit)?;
        Ok(Self::new("", Box::new(filter)))
    }

    /// The textual query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the textual query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Append a fragment to the textual query by plain concatenation.
    pub fn append_to_query(&mut self, fragment: &str) {
        self.query.push_str(fragment);
    }

    /// The attached filter.
    pub fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryIndex;
    use geosift_core::error::GeosiftError;
    use geosift_core::models::Document;

    #[test]
    fn test_geometry_constructor_starts_empty() {
        let query = SpatialQuery::from_geometry(
            Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
            "EPSG:4326",
            SpatialPredicate::Intersect,
        )
        .unwrap();
        assert_eq!(query.query(), "");
    }

    #[test]
    fn test_constructor_errors_surface() {
        let err = SpatialQuery::from_geometry(
            Geometry::point(0.0, 0.0),
            "EPSG:4326",
            SpatialPredicate::DWithin,
        );
        assert!(matches!(err, Err(GeosiftError::InvalidFilter { .. })));

        let err = SpatialQuery::from_distance(
            Geometry::point(0.0, 0.0),
            "EPSG:4326",
            SpatialPredicate::DWithin,
            5.0,
            "lightyears",
        );
        assert!(matches!(err, Err(GeosiftError::UnsupportedUnit { .. })));
    }

    #[test]
    fn test_append_concatenates_verbatim() {
        let mut query = SpatialQuery::from_geometry(
            Geometry::point(1.0, 1.0),
            "EPSG:4326",
            SpatialPredicate::Equals,
        )
        .unwrap();
        query.append_to_query("title:harbor");
        query.append_to_query(" AND type:dataset");
        assert_eq!(query.query(), "title:harbor AND type:dataset");

        query.set_query("fresh");
        query.append_to_query("!");
        assert_eq!(query.query(), "fresh!");
    }

    #[test]
    fn test_attached_filter_is_usable() {
        let mut index = MemoryIndex::new();
        index.add(Document::for_point(5.0, 5.0, "EPSG:4326"));

        let query = SpatialQuery::from_geometry(
            Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
            "EPSG:4326",
            SpatialPredicate::Intersect,
        )
        .unwrap();
        let bits = query.filter().bits(&index).unwrap();
        assert!(bits.contains(0));
    }
}
