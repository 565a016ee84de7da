//! Canonical geometry, predicate, and distance types.
//!
//! A filter constraint is exactly one of three geometry shapes (a tagged
//! union, so every predicate dispatch over filter-kind x document-kind is
//! an exhaustive match), plus a predicate and an optional distance.

use serde::{Deserialize, Serialize};

use crate::error::{GeosiftError, Result};

/// Geometry shape classification, matching the `geometry` tag stored on
/// indexed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    Point,
    BoundingBox,
    Line,
}

impl GeometryKind {
    /// Stable string tag used in the `geometry` document field.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeometryKind::Point => "point",
            GeometryKind::BoundingBox => "boundingbox",
            GeometryKind::Line => "line",
        }
    }

    /// Parse a stored `geometry` tag back into a kind.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "point" => Some(GeometryKind::Point),
            "boundingbox" => Some(GeometryKind::BoundingBox),
            "line" => Some(GeometryKind::Line),
            _ => None,
        }
    }

    /// All kinds, in the order document scans walk them.
    pub fn all() -> [GeometryKind; 3] {
        [
            GeometryKind::Point,
            GeometryKind::BoundingBox,
            GeometryKind::Line,
        ]
    }
}

/// A filter or document geometry: axis-aligned envelope, point, or segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    BoundingBox {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },
    Point {
        x: f64,
        y: f64,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
    },
}

impl Geometry {
    /// Create an axis-aligned bounding box.
    pub fn bounding_box(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Create a point.
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point { x, y }
    }

    /// Create a two-point line segment.
    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Geometry::Line { x1, y1, x2, y2 }
    }

    /// Get the geometry kind.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point { .. } => GeometryKind::Point,
            Geometry::BoundingBox { .. } => GeometryKind::BoundingBox,
            Geometry::Line { .. } => GeometryKind::Line,
        }
    }
}

/// Spatial predicate evaluated between a document geometry and the filter
/// geometry (document op filter, OGC operand order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpatialPredicate {
    Contains,
    Intersect,
    Equals,
    Disjoint,
    /// Envelope-vs-envelope "inside the search envelope" test. Only valid
    /// with a `BoundingBox` filter geometry.
    Bbox,
    Beyond,
    Crosses,
    DWithin,
    Within,
    Touches,
    Overlaps,
}

impl SpatialPredicate {
    /// Whether this predicate needs a distance threshold.
    pub fn requires_distance(&self) -> bool {
        matches!(self, SpatialPredicate::DWithin | SpatialPredicate::Beyond)
    }
}

/// Distance units accepted by the distance predicates.
///
/// The wire-level allow-list is inherited verbatim, including the
/// single-l `"milimeters"` spelling; see DESIGN.md.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DistanceUnit {
    Kilometers,
    #[default]
    Meters,
    Centimeters,
    Millimeters,
    Miles,
}

impl DistanceUnit {
    /// Parse a unit string against the supported allow-list.
    pub fn parse(unit: &str) -> Result<Self> {
        match unit {
            "kilometers" | "km" => Ok(DistanceUnit::Kilometers),
            "meters" | "m" => Ok(DistanceUnit::Meters),
            "centimeters" | "cm" => Ok(DistanceUnit::Centimeters),
            "milimeters" | "mm" => Ok(DistanceUnit::Millimeters),
            "miles" | "mi" => Ok(DistanceUnit::Miles),
            _ => Err(GeosiftError::UnsupportedUnit {
                unit: unit.to_string(),
            }),
        }
    }

    /// Conversion factor from this unit to meters.
    pub fn meters_per_unit(&self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Millimeters => 0.001,
            DistanceUnit::Miles => 1609.34,
        }
    }

    /// Convert a distance value to meters.
    pub fn to_meters(&self, value: f64) -> f64 {
        value * self.meters_per_unit()
    }
}

/// Distance with unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Distance {
    pub value: f64,
    pub unit: DistanceUnit,
}

impl Distance {
    /// Create a new distance.
    pub fn new(value: f64, unit: DistanceUnit) -> Self {
        Self { value, unit }
    }

    /// Create distance in meters.
    pub fn meters(value: f64) -> Self {
        Self::new(value, DistanceUnit::Meters)
    }

    /// Create distance in kilometers.
    pub fn kilometers(value: f64) -> Self {
        Self::new(value, DistanceUnit::Kilometers)
    }

    /// Convert to meters.
    pub fn to_meters(&self) -> f64 {
        self.unit.to_meters(self.value)
    }
}
