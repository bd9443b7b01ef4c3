// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge splitting at intersections
//!
//! Every edge is cut at each point where another edge crosses or touches it,
//! so the resulting edge set only meets at shared endpoints. This is an
//! all-pairs pass, O(E²) in the number of edges.

use crate::edge::Edge;
use crate::tolerance::{PointKey, Tolerance};
use nalgebra::Point2;
use rustc_hash::FxHashSet;
use tracing::debug;

/// Intersect segments p1-p2 and q1-q2
///
/// Uses the implicit line form `A*x + B*y = C` for both segments. Parallel
/// lines (`|det| < parallel_epsilon`) never intersect, including collinear
/// ones. The intersection of the lines is only accepted if it lies within the
/// range of both segments (with `bounds_tolerance` slack per axis).
pub fn segment_intersection(
    p1: &Point2<f64>,
    p2: &Point2<f64>,
    q1: &Point2<f64>,
    q2: &Point2<f64>,
    tol: &Tolerance,
) -> Option<Point2<f64>> {
    let a1 = p2.y - p1.y;
    let b1 = p1.x - p2.x;
    let c1 = a1 * p1.x + b1 * p1.y;

    let a2 = q2.y - q1.y;
    let b2 = q1.x - q2.x;
    let c2 = a2 * q1.x + b2 * q1.y;

    let det = a1 * b2 - a2 * b1;
    if det.abs() < tol.parallel_epsilon {
        return None;
    }

    let p = Point2::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det);

    if tol.within_range(p1, p2, &p) && tol.within_range(q1, q2, &p) {
        Some(p)
    } else {
        None
    }
}

/// Endpoints of `other` lying on `edge` when both run along the same line
fn collinear_split_points(edge: &Edge, other: &Edge, tol: &Tolerance) -> Vec<Point2<f64>> {
    if edge.line_distance(&other.a) > tol.bounds_tolerance
        || edge.line_distance(&other.b) > tol.bounds_tolerance
    {
        return Vec::new();
    }

    [other.a, other.b]
        .into_iter()
        .filter(|p| tol.within_range(&edge.a, &edge.b, p))
        .collect()
}

/// Split points of `edge` against all other edges, sorted from `edge.a`
fn split_points(index: usize, edges: &[Edge], tol: &Tolerance) -> Vec<Point2<f64>> {
    let edge = &edges[index];
    let length = edge.length();
    let mut candidates = Vec::new();

    for (j, other) in edges.iter().enumerate() {
        if j == index {
            continue;
        }

        match segment_intersection(&edge.a, &edge.b, &other.a, &other.b, tol) {
            Some(p) => candidates.push(p),
            None => candidates.extend(collinear_split_points(edge, other, tol)),
        }
    }

    let mut points = vec![edge.a];
    let mut seen: FxHashSet<PointKey> = FxHashSet::default();
    seen.insert(tol.key(&edge.a));
    seen.insert(tol.key(&edge.b));

    let dir = edge.b - edge.a;
    for p in candidates {
        // Points within tolerance of an endpoint belong to that endpoint
        let along = if length > 0.0 { (p - edge.a).dot(&dir) / length } else { 0.0 };
        if along <= tol.point_epsilon || along >= length - tol.point_epsilon {
            continue;
        }
        if seen.insert(tol.key(&p)) {
            points.push(p);
        }
    }
    points.push(edge.b);

    points.sort_by(|p, q| {
        let dp = (p - edge.a).norm();
        let dq = (q - edge.a).norm();
        dp.total_cmp(&dq)
    });
    points
}

/// Sub-edges of `edges[index]` after cutting it at every other edge
pub fn split_edge(edges: &[Edge], index: usize, tol: &Tolerance) -> Vec<Edge> {
    split_points(index, edges, tol)
        .windows(2)
        .map(|pair| Edge::new(pair[0], pair[1]))
        .filter(|sub| !sub.is_degenerate(tol))
        .collect()
}

/// Split every edge at its intersections with the other edges
///
/// Sub-edges are emitted per input edge, in input order, each run ordered from
/// the parent's start point. Zero-length sub-edges are dropped.
pub fn split_edges(edges: &[Edge], tol: &Tolerance) -> Vec<Edge> {
    let mut result = Vec::with_capacity(edges.len() * 2);

    for index in 0..edges.len() {
        result.extend(split_edge(edges, index, tol));
    }

    debug!(
        input_edges = edges.len(),
        split_edges = result.len(),
        "split edges at intersections"
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rectangle;
    use approx::assert_abs_diff_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn test_crossing_segments_intersect_at_center() {
        let tol = Tolerance::default();
        let hit = segment_intersection(&p(0.0, 0.0), &p(1.0, 1.0), &p(0.0, 1.0), &p(1.0, 0.0), &tol)
            .expect("diagonals cross");
        assert_abs_diff_eq!(hit.x, 0.5, epsilon = 1e-3);
        assert_abs_diff_eq!(hit.y, 0.5, epsilon = 1e-3);
    }

    #[test]
    fn test_parallel_segments_do_not_intersect() {
        let tol = Tolerance::default();
        let hit = segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0), &p(1.0, 1.0), &tol);
        assert!(hit.is_none());
    }

    #[test]
    fn test_intersection_on_line_extension_is_rejected() {
        let tol = Tolerance::default();
        // Lines cross at (2, 0), outside the first segment
        let hit = segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, -1.0), &p(2.0, 1.0), &tol);
        assert!(hit.is_none());
    }

    #[test]
    fn test_touching_within_tolerance_is_accepted() {
        let tol = Tolerance::default();
        let hit = segment_intersection(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.005, -1.0), &p(1.005, 1.0), &tol);
        assert!(hit.is_some());
    }

    #[test]
    fn test_unit_square_is_not_split() {
        let tol = Tolerance::default();
        let square = Rectangle::from_corners(p(0.0, 0.0), p(1.0, 1.0));
        let split = split_edges(&square.edges(), &tol);
        assert_eq!(split.len(), 4);
        assert_eq!(split[0], square.edges()[0]);
    }

    #[test]
    fn test_cross_splits_both_edges() {
        let tol = Tolerance::default();
        let edges = [
            Edge::new(p(0.0, 1.0), p(4.0, 1.0)),
            Edge::new(p(2.0, 0.0), p(2.0, 3.0)),
        ];
        let split = split_edges(&edges, &tol);
        assert_eq!(split.len(), 4);
        assert_eq!(split[0].b, p(2.0, 1.0));
        assert_eq!(split[1].a, p(2.0, 1.0));
        assert_eq!(split[3].b, p(2.0, 3.0));
    }

    #[test]
    fn test_split_points_sorted_from_start() {
        let tol = Tolerance::default();
        // Edge runs right to left, crossed at x=1 and x=3
        let edges = [
            Edge::new(p(4.0, 0.0), p(0.0, 0.0)),
            Edge::new(p(1.0, -1.0), p(1.0, 1.0)),
            Edge::new(p(3.0, -1.0), p(3.0, 1.0)),
        ];
        let split = split_edges(&edges, &tol);
        let first_run: Vec<_> = split.iter().take(3).collect();
        assert_eq!(first_run[0].a, p(4.0, 0.0));
        assert_eq!(first_run[0].b, p(3.0, 0.0));
        assert_eq!(first_run[1].b, p(1.0, 0.0));
        assert_eq!(first_run[2].b, p(0.0, 0.0));
    }

    #[test]
    fn test_crossing_near_endpoint_snaps_to_it() {
        let tol = Tolerance::default();
        let edges = [
            Edge::new(p(0.0, 0.0), p(3.0, 0.0)),
            Edge::new(p(2.995, -1.0), p(2.995, 1.0)),
        ];

        // 0.005 from the end: no sliver sub-edge, the edge stays whole
        assert_eq!(split_edge(&edges, 0, &tol), vec![edges[0]]);

        // The crossing edge is cut in the middle as usual
        let other = split_edge(&edges, 1, &tol);
        assert_eq!(other.len(), 2);
        assert!(other.iter().all(|e| e.length() > tol.point_epsilon));
    }

    #[test]
    fn test_collinear_overlap_is_cut_at_the_other_endpoints() {
        let tol = Tolerance::default();
        let edges = [
            Edge::new(p(0.0, 0.0), p(3.0, 0.0)),
            Edge::new(p(1.0, 0.0), p(2.0, 0.0)),
        ];
        let split = split_edges(&edges, &tol);
        // 3 pieces for the long edge, the short one stays whole
        assert_eq!(split.len(), 4);
        assert_eq!(split[1], Edge::new(p(1.0, 0.0), p(2.0, 0.0)));
        assert_eq!(split[3], edges[1]);
    }

    #[test]
    fn test_zero_length_edges_are_dropped() {
        let tol = Tolerance::default();
        let degenerate = Rectangle::from_corners(p(0.0, 0.0), p(0.0, 1.0));
        let split = split_edges(&degenerate.edges(), &tol);
        assert_eq!(split.len(), 2);
        assert!(split.iter().all(|e| e.length() > 0.5));
    }

    #[test]
    fn test_sub_edges_reconstruct_parent() {
        let tol = Tolerance::default();
        let rects = [
            Rectangle::from_corners(p(0.0, 0.0), p(5.0, 1.0)),
            Rectangle::from_corners(p(2.0, -1.0), p(3.0, 4.0)),
            Rectangle::from_corners(p(4.5, 0.5), p(6.0, 2.0)),
        ];
        let edges: Vec<Edge> = rects.iter().flat_map(|r| r.edges()).collect();

        for (i, parent) in edges.iter().enumerate() {
            let points = split_points(i, &edges, &tol);
            let total: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
            assert_abs_diff_eq!(total, parent.length(), epsilon = 1e-9);
            for q in &points {
                assert!(parent.line_distance(q) < 1e-9);
            }
        }
    }
}
