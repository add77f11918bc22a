// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precise point tests against shape geometry.
//!
//! Every function here is pure: surface-pixel inputs, a tolerance radius in
//! pixels, and a boolean answer. Comparisons are done on squared distances so
//! no square roots are taken.
//!
//! A point exactly on a polygon edge gets a deterministic answer from the
//! half-open ray-casting rule, but which side it lands on is unspecified.
//! With a non-zero tolerance the outline test catches it either way.

use alloc::vec::Vec;
use kurbo::{Line, ParamCurveNearest, Point};

use crate::types::{Geometry, Shape};

/// Hit test a shape at `pt` with the given tolerance radius.
///
/// - Polygons: inside by the even-odd rule (filled only), or within
///   `tolerance` of any ring edge.
/// - Polylines: within `tolerance` of any segment.
/// - Circles: within `radius + tolerance` of the center.
pub fn hit_test(shape: &Shape, pt: Point, tolerance: f64) -> bool {
    let tolerance = tolerance.max(0.0);
    match &shape.geometry {
        Geometry::Polygon { rings } => {
            (shape.style.fill && point_in_polygon(rings, pt))
                || rings
                    .iter()
                    .any(|ring| point_near_polyline(ring, true, pt, tolerance))
        }
        Geometry::Polyline { parts } => parts
            .iter()
            .any(|part| point_near_polyline(part, false, pt, tolerance)),
        Geometry::Circle { center, radius } => point_in_circle(*center, *radius, pt, tolerance),
    }
}

/// Even-odd ray casting over all rings.
///
/// Rings with fewer than three vertices enclose nothing.
pub fn point_in_polygon(rings: &[Vec<Point>], pt: Point) -> bool {
    let mut inside = false;
    for ring in rings {
        if ring.len() < 3 {
            continue;
        }
        let mut j = ring.len() - 1;
        for i in 0..ring.len() {
            let a = ring[i];
            let b = ring[j];
            if (a.y > pt.y) != (b.y > pt.y)
                && pt.x < (b.x - a.x) * (pt.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
    }
    inside
}

/// True if `pt` is within `tolerance` of any segment of `points`.
///
/// With `closed`, the edge from the last vertex back to the first is included.
/// A single vertex is treated as a degenerate segment.
pub fn point_near_polyline(points: &[Point], closed: bool, pt: Point, tolerance: f64) -> bool {
    let limit_sq = tolerance * tolerance;
    match points {
        [] => false,
        [only] => (pt - *only).hypot2() <= limit_sq,
        _ => {
            let open = points
                .windows(2)
                .any(|w| segment_distance_sq(w[0], w[1], pt) <= limit_sq);
            open || (closed
                && segment_distance_sq(points[points.len() - 1], points[0], pt) <= limit_sq)
        }
    }
}

/// True if `pt` is within `radius + tolerance` of `center`.
pub fn point_in_circle(center: Point, radius: f64, pt: Point, tolerance: f64) -> bool {
    let reach = radius.max(0.0) + tolerance.max(0.0);
    (pt - center).hypot2() <= reach * reach
}

fn segment_distance_sq(a: Point, b: Point, pt: Point) -> f64 {
    Line::new(a, b).nearest(pt, 0.).distance_sq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ShapeStyle;
    use alloc::vec;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, y0),
            Point::new(x0, y1),
            Point::new(x1, y1),
            Point::new(x1, y0),
        ]
    }

    fn style(fill: bool, stroke_width: f64) -> ShapeStyle {
        ShapeStyle {
            stroke: true,
            stroke_width,
            fill,
        }
    }

    #[test]
    fn polygon_interior_and_exterior() {
        let rings = vec![square(0.0, 0.0, 100.0, 100.0)];
        assert!(point_in_polygon(&rings, Point::new(50.0, 50.0)));
        assert!(!point_in_polygon(&rings, Point::new(150.0, 150.0)));
        assert!(!point_in_polygon(&rings, Point::new(-1.0, 50.0)));
    }

    #[test]
    fn polygon_hole_is_outside() {
        let rings = vec![
            square(0.0, 0.0, 100.0, 100.0),
            square(25.0, 25.0, 75.0, 75.0),
        ];
        assert!(!point_in_polygon(&rings, Point::new(50.0, 50.0)));
        assert!(point_in_polygon(&rings, Point::new(10.0, 10.0)));
    }

    #[test]
    fn polygon_boundary_is_consistent() {
        let rings = vec![square(0.0, 0.0, 100.0, 100.0)];
        let edge = Point::new(0.0, 50.0);
        // Same answer every time for the same input.
        let first = point_in_polygon(&rings, edge);
        for _ in 0..4 {
            assert_eq!(point_in_polygon(&rings, edge), first);
        }
        // With any tolerance the outline catches it regardless.
        let shape = Shape::new(Geometry::Polygon { rings }).with_style(style(true, 0.0));
        assert!(hit_test(&shape, edge, 0.5));
    }

    #[test]
    fn degenerate_rings_enclose_nothing() {
        let rings = vec![vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]];
        assert!(!point_in_polygon(&rings, Point::new(5.0, 5.0)));
    }

    #[test]
    fn unfilled_polygon_only_hits_outline() {
        let shape = Shape::new(Geometry::polygon(square(0.0, 0.0, 100.0, 100.0)))
            .with_style(style(false, 2.0));
        assert!(!hit_test(&shape, Point::new(50.0, 50.0), 3.0));
        assert!(hit_test(&shape, Point::new(2.0, 50.0), 3.0));
        // Closing edge (last vertex back to the first) is part of the outline.
        assert!(hit_test(&shape, Point::new(50.0, 1.0), 3.0));
    }

    #[test]
    fn filled_polygon_hits_stroke_just_outside() {
        let shape = Shape::new(Geometry::polygon(square(0.0, 0.0, 100.0, 100.0)))
            .with_style(style(true, 4.0));
        let tol = shape.hit_tolerance(1.0);
        assert!(hit_test(&shape, Point::new(102.5, 50.0), tol));
        assert!(!hit_test(&shape, Point::new(104.0, 50.0), tol));
    }

    #[test]
    fn polyline_distance_tolerance() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(100.0, 0.0)];
        assert!(point_near_polyline(&pts, false, Point::new(50.0, 2.9), 3.0));
        assert!(point_near_polyline(&pts, false, Point::new(50.0, 3.0), 3.0));
        assert!(!point_near_polyline(&pts, false, Point::new(50.0, 3.1), 3.0));
        // Beyond the end cap.
        assert!(!point_near_polyline(&pts, false, Point::new(104.0, 0.0), 3.0));
    }

    #[test]
    fn open_polyline_has_no_closing_segment() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        let on_closing_edge = Point::new(50.0, 50.0);
        assert!(!point_near_polyline(&pts, false, on_closing_edge, 1.0));
        assert!(point_near_polyline(&pts, true, on_closing_edge, 1.0));
    }

    #[test]
    fn single_vertex_polyline_acts_as_point() {
        let pts = vec![Point::new(10.0, 10.0)];
        assert!(point_near_polyline(&pts, false, Point::new(12.0, 10.0), 2.0));
        assert!(!point_near_polyline(&pts, false, Point::new(13.0, 10.0), 2.0));
        assert!(!point_near_polyline(&[], false, Point::ZERO, 100.0));
    }

    #[test]
    fn circle_radius_plus_tolerance() {
        let c = Point::new(300.0, 300.0);
        assert!(point_in_circle(c, 100.0, Point::new(300.0, 300.0), 0.0));
        assert!(point_in_circle(c, 100.0, Point::new(400.0, 300.0), 0.0));
        assert!(!point_in_circle(c, 100.0, Point::new(401.0, 300.0), 0.0));
        assert!(point_in_circle(c, 100.0, Point::new(401.0, 300.0), 1.5));
    }

    #[test]
    fn negative_tolerance_is_clamped() {
        let shape = Shape::new(Geometry::circle(Point::ZERO, 10.0));
        assert!(hit_test(&shape, Point::new(10.0, 0.0), -5.0));
    }
}
