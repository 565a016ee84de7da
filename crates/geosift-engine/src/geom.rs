//! Envelope, segment, and point predicate primitives.
//!
//! All boundary comparisons use the closed-boundary convention: a point
//! on an envelope edge is inside the envelope, a shared endpoint is an
//! intersection. Coordinate comparisons are exact; no epsilon tolerance
//! is applied.

use geo::{Coord, Line, Point, Rect};
use geosift_core::models::Geometry;

/// `geo` carrier for one geometry variant, so predicate dispatch can
/// match exhaustively over (filter shape, document shape) pairs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Shape {
    Env(Rect),
    Pt(Point),
    Seg(Line),
}

pub(crate) fn shape(geometry: &Geometry) -> Shape {
    match *geometry {
        Geometry::BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
        } => Shape::Env(Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: max_x, y: max_y },
        )),
        Geometry::Point { x, y } => Shape::Pt(Point::new(x, y)),
        Geometry::Line { x1, y1, x2, y2 } => Shape::Seg(Line::new(
            Coord { x: x1, y: y1 },
            Coord { x: x2, y: y2 },
        )),
    }
}

// --- point / point ---

pub(crate) fn points_coincide(a: Point, b: Point) -> bool {
    a.x() == b.x() && a.y() == b.y()
}

// --- envelope / point ---

pub(crate) fn env_contains_point(env: Rect, p: Point) -> bool {
    p.x() >= env.min().x && p.x() <= env.max().x && p.y() >= env.min().y && p.y() <= env.max().y
}

pub(crate) fn point_on_env_boundary(env: Rect, p: Point) -> bool {
    env_contains_point(env, p)
        && (p.x() == env.min().x
            || p.x() == env.max().x
            || p.y() == env.min().y
            || p.y() == env.max().y)
}

fn point_strictly_inside_env(env: Rect, p: Point) -> bool {
    p.x() > env.min().x && p.x() < env.max().x && p.y() > env.min().y && p.y() < env.max().y
}

// --- envelope / envelope ---

/// Two envelopes overlap in both dimensions (closed boundaries).
pub(crate) fn env_intersects_env(a: Rect, b: Rect) -> bool {
    let x_overlap = a.min().x <= b.max().x && a.max().x >= b.min().x;
    let y_overlap = a.min().y <= b.max().y && a.max().y >= b.min().y;
    x_overlap && y_overlap
}

pub(crate) fn env_contains_env(outer: Rect, inner: Rect) -> bool {
    inner.min().x >= outer.min().x
        && inner.min().y >= outer.min().y
        && inner.max().x <= outer.max().x
        && inner.max().y <= outer.max().y
}

/// Exact coordinate equality of two envelopes.
pub(crate) fn env_equals_env(a: Rect, b: Rect) -> bool {
    a.min() == b.min() && a.max() == b.max()
}

fn env_interiors_overlap(a: Rect, b: Rect) -> bool {
    a.min().x < b.max().x && a.max().x > b.min().x && a.min().y < b.max().y && a.max().y > b.min().y
}

/// Boundary contact without interior overlap.
pub(crate) fn env_touches_env(a: Rect, b: Rect) -> bool {
    env_intersects_env(a, b) && !env_interiors_overlap(a, b)
}

/// Interiors overlap but neither envelope contains the other.
pub(crate) fn env_partial_overlap(a: Rect, b: Rect) -> bool {
    env_interiors_overlap(a, b) && !env_contains_env(a, b) && !env_contains_env(b, a)
}

// --- envelope / segment ---

/// Liang-Barsky parameter range of the segment portion inside the closed
/// envelope, or `None` when the segment misses it entirely.
fn clip_to_env(env: Rect, seg: Line) -> Option<(f64, f64)> {
    let dx = seg.end.x - seg.start.x;
    let dy = seg.end.y - seg.start.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let checks = [
        (-dx, seg.start.x - env.min().x),
        (dx, env.max().x - seg.start.x),
        (-dy, seg.start.y - env.min().y),
        (dy, env.max().y - seg.start.y),
    ];

    for (p, q) in checks {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                if r > t0 {
                    t0 = r;
                }
            } else {
                if r < t0 {
                    return None;
                }
                if r < t1 {
                    t1 = r;
                }
            }
        }
    }

    (t0 <= t1).then_some((t0, t1))
}

fn point_at(seg: Line, t: f64) -> Point {
    Point::new(
        seg.start.x + (seg.end.x - seg.start.x) * t,
        seg.start.y + (seg.end.y - seg.start.y) * t,
    )
}

pub(crate) fn segment_intersects_env(env: Rect, seg: Line) -> bool {
    clip_to_env(env, seg).is_some()
}

pub(crate) fn segment_within_env(env: Rect, seg: Line) -> bool {
    env_contains_point(env, seg.start.into()) && env_contains_point(env, seg.end.into())
}

/// Whether any part of the clipped segment lies strictly inside the
/// envelope. The midpoint of the clipped range is on the boundary exactly
/// when the contact is boundary-only.
fn segment_enters_env_interior(env: Rect, seg: Line) -> bool {
    match clip_to_env(env, seg) {
        Some((t0, t1)) => point_strictly_inside_env(env, point_at(seg, (t0 + t1) / 2.0)),
        None => false,
    }
}

/// Segment meets the envelope without entering its interior.
pub(crate) fn segment_touches_env(env: Rect, seg: Line) -> bool {
    segment_intersects_env(env, seg) && !segment_enters_env_interior(env, seg)
}

/// Segment passes through the envelope interior while extending outside
/// the envelope.
pub(crate) fn segment_crosses_env(env: Rect, seg: Line) -> bool {
    segment_enters_env_interior(env, seg)
        && (!env_contains_point(env, seg.start.into()) || !env_contains_point(env, seg.end.into()))
}

// --- segment / point ---

fn orient(a: Coord, b: Coord, c: Coord) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

pub(crate) fn point_on_segment(seg: Line, p: Point) -> bool {
    let c = p.0;
    orient(seg.start, seg.end, c) == 0.0
        && c.x >= seg.start.x.min(seg.end.x)
        && c.x <= seg.start.x.max(seg.end.x)
        && c.y >= seg.start.y.min(seg.end.y)
        && c.y <= seg.start.y.max(seg.end.y)
}

pub(crate) fn point_at_segment_endpoint(seg: Line, p: Point) -> bool {
    points_coincide(seg.start.into(), p) || points_coincide(seg.end.into(), p)
}

// --- segment / segment ---

/// Segments intersect, including collinear overlap and endpoint contact.
pub(crate) fn segments_intersect(a: Line, b: Line) -> bool {
    let d1 = orient(b.start, b.end, a.start);
    let d2 = orient(b.start, b.end, a.end);
    let d3 = orient(a.start, a.end, b.start);
    let d4 = orient(a.start, a.end, b.end);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && point_on_segment(b, a.start.into()))
        || (d2 == 0.0 && point_on_segment(b, a.end.into()))
        || (d3 == 0.0 && point_on_segment(a, b.start.into()))
        || (d4 == 0.0 && point_on_segment(a, b.end.into()))
}

/// Segments cross at a single point interior to both.
pub(crate) fn segments_proper_cross(a: Line, b: Line) -> bool {
    let d1 = orient(b.start, b.end, a.start);
    let d2 = orient(b.start, b.end, a.end);
    let d3 = orient(a.start, a.end, b.start);
    let d4 = orient(a.start, a.end, b.end);

    ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
}

fn segments_collinear(a: Line, b: Line) -> bool {
    orient(a.start, a.end, b.start) == 0.0 && orient(a.start, a.end, b.end) == 0.0
}

/// Collinear segments sharing more than a single point.
fn collinear_overlap_beyond_point(a: Line, b: Line) -> bool {
    if !segments_collinear(a, b) {
        return false;
    }
    // Project onto the dominant axis of `a` and compare interval overlap.
    let use_x = (a.end.x - a.start.x).abs() >= (a.end.y - a.start.y).abs();
    let (a0, a1, b0, b1) = if use_x {
        (a.start.x, a.end.x, b.start.x, b.end.x)
    } else {
        (a.start.y, a.end.y, b.start.y, b.end.y)
    };
    let (a_min, a_max) = (a0.min(a1), a0.max(a1));
    let (b_min, b_max) = (b0.min(b1), b0.max(b1));
    a_max.min(b_max) > a_min.max(b_min)
}

/// Segments meet only at an endpoint of one of them.
pub(crate) fn segments_touch(a: Line, b: Line) -> bool {
    segments_intersect(a, b) && !segments_proper_cross(a, b) && !collinear_overlap_beyond_point(a, b)
}

/// `inner` lies entirely on `outer` (collinear containment).
pub(crate) fn segment_contains_segment(outer: Line, inner: Line) -> bool {
    point_on_segment(outer, inner.start.into()) && point_on_segment(outer, inner.end.into())
}

/// Same endpoints, either orientation.
pub(crate) fn segments_equal(a: Line, b: Line) -> bool {
    (a.start == b.start && a.end == b.end) || (a.start == b.end && a.end == b.start)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect {
        Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y })
    }

    fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
        Line::new(Coord { x: x1, y: y1 }, Coord { x: x2, y: y2 })
    }

    #[test]
    fn test_env_point_boundary_is_inside() {
        let env = rect(0.0, 0.0, 10.0, 10.0);
        assert!(env_contains_point(env, Point::new(5.0, 5.0)));
        assert!(env_contains_point(env, Point::new(0.0, 5.0)));
        assert!(!env_contains_point(env, Point::new(-0.1, 5.0)));
        assert!(point_on_env_boundary(env, Point::new(0.0, 5.0)));
        assert!(!point_on_env_boundary(env, Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_env_env_relations() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let inner = rect(2.0, 2.0, 8.0, 8.0);
        let shifted = rect(5.0, 5.0, 15.0, 15.0);
        let adjacent = rect(10.0, 0.0, 20.0, 10.0);
        let far = rect(30.0, 30.0, 40.0, 40.0);

        assert!(env_contains_env(a, inner));
        assert!(!env_contains_env(inner, a));

        assert!(env_intersects_env(a, shifted));
        assert!(env_intersects_env(a, adjacent));
        assert!(!env_intersects_env(a, far));

        assert!(env_touches_env(a, adjacent));
        assert!(!env_touches_env(a, shifted));

        assert!(env_partial_overlap(a, shifted));
        assert!(!env_partial_overlap(a, inner));
        assert!(!env_partial_overlap(a, adjacent));

        assert!(env_equals_env(a, rect(0.0, 0.0, 10.0, 10.0)));
        assert!(!env_equals_env(a, inner));
    }

    #[test]
    fn test_segment_env_relations() {
        let env = rect(0.0, 0.0, 10.0, 10.0);

        // Fully inside.
        assert!(segment_within_env(env, line(1.0, 1.0, 9.0, 9.0)));
        assert!(segment_intersects_env(env, line(1.0, 1.0, 9.0, 9.0)));
        assert!(!segment_crosses_env(env, line(1.0, 1.0, 9.0, 9.0)));

        // Passing through.
        let through = line(-5.0, 5.0, 15.0, 5.0);
        assert!(segment_intersects_env(env, through));
        assert!(segment_crosses_env(env, through));
        assert!(!segment_within_env(env, through));
        assert!(!segment_touches_env(env, through));

        // Grazing an edge.
        let grazing = line(-5.0, 10.0, 15.0, 10.0);
        assert!(segment_intersects_env(env, grazing));
        assert!(segment_touches_env(env, grazing));
        assert!(!segment_crosses_env(env, grazing));

        // Missing entirely.
        assert!(!segment_intersects_env(env, line(20.0, 20.0, 30.0, 30.0)));

        // One end inside, one outside.
        let half_in = line(5.0, 5.0, 15.0, 5.0);
        assert!(segment_crosses_env(env, half_in));
    }

    #[test]
    fn test_point_on_segment() {
        let seg = line(0.0, 0.0, 10.0, 10.0);
        assert!(point_on_segment(seg, Point::new(5.0, 5.0)));
        assert!(point_on_segment(seg, Point::new(0.0, 0.0)));
        assert!(!point_on_segment(seg, Point::new(5.0, 6.0)));
        assert!(!point_on_segment(seg, Point::new(11.0, 11.0)));
        assert!(point_at_segment_endpoint(seg, Point::new(10.0, 10.0)));
        assert!(!point_at_segment_endpoint(seg, Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_segment_segment_relations() {
        let a = line(0.0, 0.0, 10.0, 10.0);

        // Proper crossing.
        let cross = line(0.0, 10.0, 10.0, 0.0);
        assert!(segments_intersect(a, cross));
        assert!(segments_proper_cross(a, cross));
        assert!(!segments_touch(a, cross));

        // Endpoint contact.
        let touch = line(10.0, 10.0, 20.0, 0.0);
        assert!(segments_intersect(a, touch));
        assert!(!segments_proper_cross(a, touch));
        assert!(segments_touch(a, touch));

        // Collinear overlap.
        let overlap = line(5.0, 5.0, 15.0, 15.0);
        assert!(segments_intersect(a, overlap));
        assert!(!segments_touch(a, overlap));

        // Collinear, meeting at a single point.
        let chained = line(10.0, 10.0, 20.0, 20.0);
        assert!(segments_touch(a, chained));

        // Disjoint.
        assert!(!segments_intersect(a, line(20.0, 0.0, 30.0, 0.0)));

        // Containment and equality.
        assert!(segment_contains_segment(a, line(2.0, 2.0, 8.0, 8.0)));
        assert!(!segment_contains_segment(line(2.0, 2.0, 8.0, 8.0), a));
        assert!(segments_equal(a, line(10.0, 10.0, 0.0, 0.0)));
        assert!(!segments_equal(a, overlap));
    }
}
