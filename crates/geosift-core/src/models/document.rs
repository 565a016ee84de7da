//! Indexed document surface read back during filter evaluation.
//!
//! The filter engine sees documents as flat string-field bags: a
//! `geometry` kind tag, a `CRS` name, and raw numeric coordinate fields.
//! Documents are written once at index time and are immutable from the
//! filter's perspective.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GeosiftError, Result};
use crate::models::geometry::{Geometry, GeometryKind};

/// Canonical field names for spatial document fields.
pub mod fields {
    /// Geometry kind tag: `"point"`, `"boundingbox"`, or `"line"`.
    pub const GEOMETRY: &str = "geometry";
    /// Source CRS name, e.g. `"EPSG:4326"`.
    pub const CRS: &str = "CRS";

    pub const X: &str = "x";
    pub const Y: &str = "y";

    pub const MIN_X: &str = "minx";
    pub const MIN_Y: &str = "miny";
    pub const MAX_X: &str = "maxx";
    pub const MAX_Y: &str = "maxy";

    pub const X1: &str = "x1";
    pub const Y1: &str = "y1";
    pub const X2: &str = "x2";
    pub const Y2: &str = "y2";
}

/// A stored document as seen by the filter engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    fields: HashMap<String, String>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Get a field value.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Index-time encoding for a point document.
    pub fn for_point(x: f64, y: f64, crs: impl Into<String>) -> Self {
        Self::new()
            .with_field(fields::GEOMETRY, GeometryKind::Point.as_str())
            .with_field(fields::CRS, crs.into())
            .with_field(fields::X, x.to_string())
            .with_field(fields::Y, y.to_string())
    }

    /// Index-time encoding for a bounding-box document.
    pub fn for_bounding_box(
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        crs: impl Into<String>,
    ) -> Self {
        Self::new()
            .with_field(fields::GEOMETRY, GeometryKind::BoundingBox.as_str())
            .with_field(fields::CRS, crs.into())
            .with_field(fields::MIN_X, min_x.to_string())
            .with_field(fields::MIN_Y, min_y.to_string())
            .with_field(fields::MAX_X, max_x.to_string())
            .with_field(fields::MAX_Y, max_y.to_string())
    }

    /// Index-time encoding for a line document.
    pub fn for_line(x1: f64, y1: f64, x2: f64, y2: f64, crs: impl Into<String>) -> Self {
        Self::new()
            .with_field(fields::GEOMETRY, GeometryKind::Line.as_str())
            .with_field(fields::CRS, crs.into())
            .with_field(fields::X1, x1.to_string())
            .with_field(fields::Y1, y1.to_string())
            .with_field(fields::X2, x2.to_string())
            .with_field(fields::Y2, y2.to_string())
    }
}

/// Decode the stored geometry and source CRS name from a document.
///
/// Fails with `MalformedDocument` when the kind tag, CRS, or any required
/// numeric field is missing or unparseable. Callers scanning an index
/// treat this as a document-local failure, not a fatal one.
pub fn decode_geometry(doc: &Document) -> Result<(Geometry, String)> {
    let tag = doc
        .field(fields::GEOMETRY)
        .ok_or_else(|| malformed("missing geometry field"))?;
    let kind = GeometryKind::parse(tag)
        .ok_or_else(|| malformed(format!("unknown geometry tag '{tag}'")))?;
    let crs = doc
        .field(fields::CRS)
        .ok_or_else(|| malformed("missing CRS field"))?
        .to_string();

    let geometry = match kind {
        GeometryKind::Point => Geometry::Point {
            x: numeric_field(doc, fields::X)?,
            y: numeric_field(doc, fields::Y)?,
        },
        GeometryKind::BoundingBox => Geometry::BoundingBox {
            min_x: numeric_field(doc, fields::MIN_X)?,
            min_y: numeric_field(doc, fields::MIN_Y)?,
            max_x: numeric_field(doc, fields::MAX_X)?,
            max_y: numeric_field(doc, fields::MAX_Y)?,
        },
        GeometryKind::Line => Geometry::Line {
            x1: numeric_field(doc, fields::X1)?,
            y1: numeric_field(doc, fields::Y1)?,
            x2: numeric_field(doc, fields::X2)?,
            y2: numeric_field(doc, fields::Y2)?,
        },
    };

    Ok((geometry, crs))
}

fn numeric_field(doc: &Document, name: &str) -> Result<f64> {
    let raw = doc
        .field(name)
        .ok_or_else(|| malformed(format!("missing field '{name}'")))?;
    raw.parse::<f64>()
        .map_err(|_| malformed(format!("field '{name}' is not numeric: '{raw}'")))
}

fn malformed(reason: impl Into<String>) -> GeosiftError {
    GeosiftError::MalformedDocument {
        reason: reason.into(),
    }
}
