//! Geometric predicate filter over an index.
//!
//! A [`SpatialFilter`] holds one target geometry, a CRS name, a predicate,
//! and (for the distance predicates) a threshold. Evaluation scans every
//! document of the index per stored geometry kind, reprojects document
//! geometries whose CRS name differs from the filter's, and applies a
//! fixed per-kind, per-predicate truth table.
//!
//! Per-document failures (undecodable fields, unresolvable CRS, failed
//! reprojection) exclude that document and are logged; one bad document
//! must not deny results for the whole query. Index I/O failures abort
//! the scan and propagate.

use geosift_core::error::{GeosiftError, Result};
use geosift_core::models::{
    decode_geometry, fields, Distance, DistanceUnit, Document, Geometry, GeometryKind,
    SpatialPredicate,
};
use tracing::warn;

use crate::bitset::BitSet;
use crate::geom::{self, Shape};
use crate::ports::{Filter, IndexReader};
use crate::transform;

/// A single geometric constraint evaluated against every indexed document.
#[derive(Debug, Clone)]
pub struct SpatialFilter {
    geometry: Geometry,
    crs_name: String,
    predicate: SpatialPredicate,
    distance: Option<Distance>,
}

impl SpatialFilter {
    /// Create a filter for any predicate except `DWithin`/`Beyond`.
    ///
    /// Fails fast: distance predicates are rejected (they require
    /// [`SpatialFilter::with_distance`]), `Bbox` is rejected unless the
    /// geometry is a bounding box, and an unresolvable CRS name is
    /// rejected with `UnknownCrs`. No invalid filter is ever returned.
    pub fn new(
        geometry: Geometry,
        crs_name: impl Into<String>,
        predicate: SpatialPredicate,
    ) -> Result<Self> {
        if predicate.requires_distance() {
            return Err(GeosiftError::InvalidFilter {
                reason: format!("{predicate:?} requires a distance; use with_distance"),
            });
        }
        if predicate == SpatialPredicate::Bbox && geometry.kind() != GeometryKind::BoundingBox {
            return Err(GeosiftError::InvalidFilter {
                reason: format!(
                    "Bbox requires a BoundingBox filter geometry, got {:?}",
                    geometry.kind()
                ),
            });
        }
        let crs_name = crs_name.into();
        transform::resolve_crs(&crs_name)?;

        Ok(Self {
            geometry,
            crs_name,
            predicate,
            distance: None,
        })
    }

    /// Create a `DWithin` or `Beyond` filter with a distance threshold.
    ///
    /// Fails fast on non-distance predicates, on a unit string outside
    /// the supported allow-list, and on an unresolvable CRS name.
    pub fn with_distance(
        geometry: Geometry,
        crs_name: impl Into<String>,
        predicate: SpatialPredicate,
        distance: f64,
        unit: &str,
    ) -> Result<Self> {
        if !predicate.requires_distance() {
            return Err(GeosiftError::InvalidFilter {
                reason: format!("{predicate:?} does not take a distance"),
            });
        }
        let unit = DistanceUnit::parse(unit)?;
        let crs_name = crs_name.into();
        transform::resolve_crs(&crs_name)?;

        Ok(Self {
            geometry,
            crs_name,
            predicate,
            distance: Some(Distance::new(distance, unit)),
        })
    }

    /// The filter's target geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// The filter's CRS name.
    pub fn crs_name(&self) -> &str {
        &self.crs_name
    }

    /// The predicate this filter evaluates.
    pub fn predicate(&self) -> SpatialPredicate {
        self.predicate
    }

    /// Distance threshold, present iff the predicate is `DWithin`/`Beyond`.
    pub fn distance(&self) -> Option<Distance> {
        self.distance
    }

    /// Historically named alias for [`Filter::bits`].
    pub fn evaluate(&self, reader: &dyn IndexReader) -> Result<BitSet> {
        self.bits(reader)
    }

    /// Evaluate the predicate against one decoded document.
    fn evaluate_document(&self, doc: &Document) -> Result<bool> {
        let (doc_geom, doc_crs) = decode_geometry(doc)?;

        // CRS names are compared by string equality; reproject the
        // document geometry into the filter CRS on mismatch.
        let doc_geom = if doc_crs != self.crs_name {
            transform::reproject(&doc_geom, &doc_crs, &self.crs_name)?
        } else {
            doc_geom
        };

        if let Some(distance) = self.distance {
            let measured = transform::orthodromic_distance(&doc_geom, &self.geometry);
            let threshold = distance.to_meters();
            // Strict inequalities on both sides: a document exactly at
            // the threshold matches neither DWithin nor Beyond.
            return Ok(match self.predicate {
                SpatialPredicate::DWithin => measured < threshold,
                _ => measured > threshold,
            });
        }

        Ok(predicate_matches(
            geom::shape(&doc_geom),
            geom::shape(&self.geometry),
            self.predicate,
        ))
    }
}

impl Filter for SpatialFilter {
    fn bits(&self, reader: &dyn IndexReader) -> Result<BitSet> {
        let mut bits = BitSet::with_capacity(reader.max_doc());

        for kind in GeometryKind::all() {
            for (doc_id, doc) in reader.documents_with_field(fields::GEOMETRY, kind.as_str())? {
                match self.evaluate_document(&doc) {
                    Ok(true) => bits.insert(doc_id as usize),
                    Ok(false) => {}
                    Err(err) => {
                        warn!(doc_id, error = %err, "excluding document from spatial filter");
                    }
                }
            }
        }

        Ok(bits)
    }
}

/// The per-kind, per-predicate truth table, document op filter in OGC
/// operand order.
///
/// Empty cells of the inherited matrix are explicit `false` arms:
/// `Overlaps` outside envelope-vs-envelope, and every non-distance
/// predicate for a line filter against point or envelope documents. The
/// distance predicates never reach this table.
fn predicate_matches(doc: Shape, filter: Shape, predicate: SpatialPredicate) -> bool {
    use crate::geom::*;
    use geosift_core::models::SpatialPredicate as P;

    match (filter, doc) {
        (Shape::Env(f), Shape::Pt(d)) => match predicate {
            P::Bbox | P::Intersect | P::Within => env_contains_point(f, d),
            P::Touches => point_on_env_boundary(f, d),
            P::Disjoint => !env_contains_point(f, d),
            P::Contains | P::Equals | P::Crosses | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        (Shape::Env(f), Shape::Env(d)) => match predicate {
            P::Bbox | P::Within => env_contains_env(f, d),
            P::Contains => env_contains_env(d, f),
            P::Intersect => env_intersects_env(f, d),
            P::Equals => env_equals_env(f, d),
            P::Disjoint => !env_intersects_env(f, d),
            P::Touches => env_touches_env(f, d),
            // For two envelopes both reduce to partial overlap.
            P::Crosses | P::Overlaps => env_partial_overlap(f, d),
            P::DWithin | P::Beyond => false,
        },
        (Shape::Env(f), Shape::Seg(d)) => match predicate {
            P::Intersect => segment_intersects_env(f, d),
            P::Crosses => segment_crosses_env(f, d),
            P::Touches => segment_touches_env(f, d),
            P::Disjoint => !segment_intersects_env(f, d),
            P::Within => segment_within_env(f, d),
            P::Bbox | P::Contains | P::Equals | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        (Shape::Pt(f), Shape::Pt(d)) => match predicate {
            // Coincidence test for every positive point-point predicate.
            P::Equals | P::Intersect | P::Within | P::Touches | P::Crosses => {
                points_coincide(d, f)
            }
            P::Disjoint => !points_coincide(d, f),
            P::Bbox | P::Contains | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        (Shape::Pt(f), Shape::Env(d)) => match predicate {
            P::Contains | P::Intersect | P::Crosses => env_contains_point(d, f),
            P::Touches => point_on_env_boundary(d, f),
            P::Disjoint => !env_contains_point(d, f),
            P::Bbox | P::Equals | P::Within | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        (Shape::Pt(f), Shape::Seg(d)) => match predicate {
            P::Contains | P::Intersect | P::Crosses | P::Within => point_on_segment(d, f),
            P::Touches => point_at_segment_endpoint(d, f),
            P::Disjoint => !point_on_segment(d, f),
            P::Bbox | P::Equals | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        (Shape::Seg(f), Shape::Seg(d)) => match predicate {
            P::Equals => segments_equal(d, f),
            P::Intersect => segments_intersect(d, f),
            P::Crosses => segments_proper_cross(d, f),
            P::Touches => segments_touch(d, f),
            P::Contains => segment_contains_segment(d, f),
            P::Within => segment_contains_segment(f, d),
            P::Disjoint => !segments_intersect(d, f),
            P::Bbox | P::Overlaps | P::DWithin | P::Beyond => false,
        },
        // A line filter against point or envelope documents only supports
        // the distance predicates (inherited matrix gap).
        (Shape::Seg(_), Shape::Pt(_)) | (Shape::Seg(_), Shape::Env(_)) => false,
    }
}
