//! CRS resolution, reprojection, and orthodromic distance.
//!
//! CRS names are compared by string equality; reprojection only happens
//! on a mismatch. Resolution failures map to `UnknownCrs`, per-vertex
//! transform failures to `ProjectionFailed`.

use geo::{Distance as GeoDistance, Haversine, Point};
use geosift_core::error::{GeosiftError, Result};
use geosift_core::models::Geometry;
use proj::Proj;

/// Check that a CRS name resolves to a known coordinate reference system.
pub fn resolve_crs(name: &str) -> Result<()> {
    // Identity transform creation fails iff the name is not resolvable.
    Proj::new_known_crs(name, name, None)
        .map(|_| ())
        .map_err(|e| GeosiftError::UnknownCrs {
            name: format!("{name} ({e})"),
        })
}

/// Reproject a geometry from one CRS to another.
pub fn reproject(geometry: &Geometry, from: &str, to: &str) -> Result<Geometry> {
    // Same CRS name, no transformation needed.
    if from == to {
        return Ok(geometry.clone());
    }

    let proj = Proj::new_known_crs(from, to, None).map_err(|e| GeosiftError::UnknownCrs {
        name: format!("{from} ({e})"),
    })?;

    let convert = |x: f64, y: f64| -> Result<(f64, f64)> {
        proj.convert((x, y))
            .map_err(|e| GeosiftError::ProjectionFailed {
                from: from.to_string(),
                to: to.to_string(),
                reason: e.to_string(),
            })
    };

    let transformed = match *geometry {
        Geometry::Point { x, y } => {
            let (x, y) = convert(x, y)?;
            Geometry::Point { x, y }
        }
        Geometry::BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        } => {
            let (min_x, min_y) = convert(min_x, min_y)?;
            let (max_x, max_y) = convert(max_x, max_y)?;
            Geometry::BoundingBox {
                min_x,
                min_y,
                max_x,
                max_y,
            }
        }
        Geometry::Line { x1, y1, x2, y2 } => {
            let (x1, y1) = convert(x1, y1)?;
            let (x2, y2) = convert(x2, y2)?;
            Geometry::Line { x1, y1, x2, y2 }
        }
    };

    Ok(transformed)
}

/// Representative point for distance measurement: the point itself, the
/// envelope center, or the segment midpoint.
pub fn representative_point(geometry: &Geometry) -> Point {
    match *geometry {
        Geometry::Point { x, y } => Point::new(x, y),
        Geometry::BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        } => Point::new((min_x + max_x) / 2.0, (min_y + max_y) / 2.0),
        Geometry::Line { x1, y1, x2, y2 } => Point::new((x1 + x2) / 2.0, (y1 + y2) / 2.0),
    }
}

/// Great-circle distance between two geometries in meters.
pub fn orthodromic_distance(a: &Geometry, b: &Geometry) -> f64 {
    Haversine.distance(representative_point(a), representative_point(b))
}
