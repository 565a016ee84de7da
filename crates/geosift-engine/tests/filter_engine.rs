//! End-to-end filter engine scenarios over an in-memory index.

use geosift_core::error::{GeosiftError, Result};
use geosift_core::models::{Document, Geometry, SpatialPredicate};
use geosift_engine::{
    BitSet, ChainOp, DocId, Filter, IndexReader, MemoryIndex, SerialChainFilter, SpatialFilter,
    SpatialQuery,
};

const WGS84: &str = "EPSG:4326";

fn ids(bits: &BitSet) -> Vec<usize> {
    bits.ones().collect()
}

/// Reader standing in for an unavailable index backend.
struct UnavailableReader;

impl IndexReader for UnavailableReader {
    fn max_doc(&self) -> usize {
        0
    }

    fn documents_with_field(&self, _field: &str, _value: &str) -> Result<Vec<(DocId, Document)>> {
        Err(GeosiftError::Io(std::io::Error::other("backend down")))
    }
}

fn sample_index() -> MemoryIndex {
    let mut index = MemoryIndex::new();
    index.add(Document::for_point(5.0, 5.0, WGS84)); // 0
    index.add(Document::for_point(15.0, 15.0, WGS84)); // 1
    index.add(Document::for_bounding_box(3.0, 3.0, 7.0, 7.0, WGS84)); // 2
    index.add(Document::for_line(0.0, 12.0, 20.0, 12.0, WGS84)); // 3
    index
}

#[test]
fn bbox_filter_selects_documents_inside_the_search_envelope() {
    let index = sample_index();

    let filter = SpatialFilter::new(
        Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
        WGS84,
        SpatialPredicate::Bbox,
    )
    .unwrap();
    assert_eq!(ids(&filter.evaluate(&index).unwrap()), vec![0, 2]);

    let elsewhere = SpatialFilter::new(
        Geometry::bounding_box(30.0, 30.0, 40.0, 40.0),
        WGS84,
        SpatialPredicate::Bbox,
    )
    .unwrap();
    assert!(elsewhere.evaluate(&index).unwrap().is_empty());
}

#[test]
fn unknown_filter_crs_fails_at_construction() {
    let err = SpatialFilter::new(
        Geometry::point(0.0, 0.0),
        "EPSG:999999",
        SpatialPredicate::Equals,
    );
    assert!(matches!(err, Err(GeosiftError::UnknownCrs { .. })));
}

#[test]
fn poisoned_document_crs_is_skipped_not_fatal() {
    let mut index = MemoryIndex::new();
    index.add(Document::for_point(5.0, 5.0, WGS84));
    // Unresolvable document CRS: reprojection fails per-document and the
    // document is excluded without aborting the scan.
    index.add(Document::for_point(5.0, 5.0, "EPSG:999999"));
    index.add(Document::for_point(6.0, 6.0, WGS84));

    let filter = SpatialFilter::new(
        Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
        WGS84,
        SpatialPredicate::Intersect,
    )
    .unwrap();
    assert_eq!(ids(&filter.evaluate(&index).unwrap()), vec![0, 2]);
}

#[test]
fn document_in_other_crs_is_reprojected() {
    let mut index = MemoryIndex::new();
    // Web Mercator coordinates of roughly (10E, 10N).
    index.add(Document::for_point(
        1_113_194.9079327357,
        1_118_889.9748579583,
        "EPSG:3857",
    ));

    let filter = SpatialFilter::new(
        Geometry::bounding_box(9.0, 9.0, 11.0, 11.0),
        WGS84,
        SpatialPredicate::Intersect,
    )
    .unwrap();
    assert_eq!(ids(&filter.evaluate(&index).unwrap()), vec![0]);

    let miss = SpatialFilter::new(
        Geometry::bounding_box(20.0, 20.0, 30.0, 30.0),
        WGS84,
        SpatialPredicate::Intersect,
    )
    .unwrap();
    assert!(miss.evaluate(&index).unwrap().is_empty());
}

#[test]
fn index_io_errors_abort_the_scan() {
    let filter = SpatialFilter::new(
        Geometry::point(0.0, 0.0),
        WGS84,
        SpatialPredicate::Equals,
    )
    .unwrap();
    assert!(matches!(
        filter.evaluate(&UnavailableReader),
        Err(GeosiftError::Io(_))
    ));

    let chain = SerialChainFilter::new(vec![Box::new(filter)]);
    assert!(matches!(
        chain.bits(&UnavailableReader),
        Err(GeosiftError::Io(_))
    ));
}

#[test]
fn chained_spatial_filters_compose_over_a_real_index() {
    let index = sample_index();

    // Everything intersecting the lower envelope...
    let lower = SpatialFilter::new(
        Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
        WGS84,
        SpatialPredicate::Intersect,
    )
    .unwrap();
    // ...excluding documents within 10km of the point (5, 5).
    let near_center = SpatialFilter::with_distance(
        Geometry::point(5.0, 5.0),
        WGS84,
        SpatialPredicate::DWithin,
        10.0,
        "km",
    )
    .unwrap();

    let chain = SerialChainFilter::with_operators(
        vec![Box::new(lower), Box::new(near_center)],
        vec![ChainOp::And, ChainOp::Not],
    );
    // Not in a trailing position is ignored (inherited leniency), so this
    // is lower AND near_center: the point document and the box document
    // are both within 10km of (5, 5) center-to-center, but only ids 0 and
    // 2 intersect the envelope at all.
    assert_eq!(ids(&chain.bits(&index).unwrap()), vec![0, 2]);

    let chain = SerialChainFilter::with_operators(
        vec![
            Box::new(
                SpatialFilter::new(
                    Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
                    WGS84,
                    SpatialPredicate::Intersect,
                )
                .unwrap(),
            ),
            Box::new(
                SpatialFilter::with_distance(
                    Geometry::point(5.0, 5.0),
                    WGS84,
                    SpatialPredicate::DWithin,
                    10.0,
                    "km",
                )
                .unwrap(),
            ),
        ],
        vec![ChainOp::Not, ChainOp::And],
    );
    // Leading Not: flip(lower) AND near_center = nothing, since every
    // document near the center also intersects the envelope.
    assert!(chain.bits(&index).unwrap().is_empty());
}

#[test]
fn query_bundles_text_with_composite_filter() {
    let index = sample_index();

    let spatial = SpatialFilter::new(
        Geometry::bounding_box(0.0, 0.0, 10.0, 10.0),
        WGS84,
        SpatialPredicate::Intersect,
    )
    .unwrap();
    let chain = SerialChainFilter::new(vec![Box::new(spatial)]);

    let mut query = SpatialQuery::new("title:coastline", Box::new(chain));
    query.append_to_query(" AND format:gml");
    assert_eq!(query.query(), "title:coastline AND format:gml");
    assert_eq!(ids(&query.filter().bits(&index).unwrap()), vec![0, 2]);
}

#[test]
fn evaluation_is_idempotent_across_calls() {
    let index = sample_index();

    let filter = SpatialFilter::with_distance(
        Geometry::point(5.0, 5.0),
        WGS84,
        SpatialPredicate::Beyond,
        100.0,
        "km",
    )
    .unwrap();

    let first = filter.evaluate(&index).unwrap();
    let second = filter.evaluate(&index).unwrap();
    assert_eq!(first, second);
}
