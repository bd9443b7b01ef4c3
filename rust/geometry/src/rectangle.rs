// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned rectangles and their decomposition into boundary edges

use crate::edge::Edge;
use crate::tolerance::{PointKey, Tolerance};
use nalgebra::Point2;
use rustc_hash::FxHashSet;

/// Axis-aligned rectangle stored as its min and max corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub min: Point2<f64>,
    pub max: Point2<f64>,
}

impl Rectangle {
    /// Build from two opposite corners given in any order
    pub fn from_corners(p: Point2<f64>, q: Point2<f64>) -> Self {
        Self {
            min: Point2::new(p.x.min(q.x), p.y.min(q.y)),
            max: Point2::new(p.x.max(q.x), p.y.max(q.y)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Corners in cyclic order: (min,min), (max,min), (max,max), (min,max)
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            Point2::new(self.min.x, self.min.y),
            Point2::new(self.max.x, self.min.y),
            Point2::new(self.max.x, self.max.y),
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// The four boundary edges, counter-clockwise
    pub fn edges(&self) -> [Edge; 4] {
        let c = self.corners();
        [
            Edge::new(c[0], c[1]),
            Edge::new(c[1], c[2]),
            Edge::new(c[2], c[3]),
            Edge::new(c[3], c[0]),
        ]
    }

    /// True if `p` is inside the rectangle and more than `margin` away from its border
    #[inline]
    pub fn contains_strictly(&self, p: &Point2<f64>, margin: f64) -> bool {
        self.min.x + margin < p.x
            && p.x < self.max.x - margin
            && self.min.y + margin < p.y
            && p.y < self.max.y - margin
    }
}

/// Edges and corner vertices collected from a set of rectangles
#[derive(Debug, Clone, Default)]
pub struct Decomposition {
    /// Boundary edges, four per rectangle, in input order
    pub edges: Vec<Edge>,
    /// Distinct corner points (bookkeeping only)
    pub vertices: Vec<Point2<f64>>,
}

/// Turn every rectangle into its four boundary edges
///
/// Zero-area rectangles are kept; their zero-length edges drop out during
/// splitting.
pub fn decompose_rectangles(rectangles: &[Rectangle], tol: &Tolerance) -> Decomposition {
    let mut edges = Vec::with_capacity(rectangles.len() * 4);
    let mut vertices = Vec::with_capacity(rectangles.len() * 4);
    let mut seen: FxHashSet<PointKey> = FxHashSet::default();

    for rect in rectangles {
        for edge in rect.edges() {
            for p in [edge.a, edge.b] {
                if seen.insert(tol.key(&p)) {
                    vertices.push(p);
                }
            }
            edges.push(edge);
        }
    }

    Decomposition { edges, vertices }
}

/// Snap rectangle coordinates that lie closer than `point_epsilon` on the
/// same axis onto the smallest value of their cluster
///
/// Clusters are anchored at their smallest value, so a chain of nearby
/// coordinates never drifts further than `point_epsilon`. Snapping preserves
/// order, so `min <= max` still holds afterwards. Returns the welded
/// rectangles and the number of coordinates that moved.
pub fn weld_rectangles(rectangles: &[Rectangle], tol: &Tolerance) -> (Vec<Rectangle>, usize) {
    let xs = axis_clusters(
        rectangles.iter().flat_map(|r| [r.min.x, r.max.x]),
        tol.point_epsilon,
    );
    let ys = axis_clusters(
        rectangles.iter().flat_map(|r| [r.min.y, r.max.y]),
        tol.point_epsilon,
    );

    let mut moved = 0;
    let mut welded = Vec::with_capacity(rectangles.len());
    for rect in rectangles {
        let snapped = Rectangle {
            min: Point2::new(snap(&xs, rect.min.x), snap(&ys, rect.min.y)),
            max: Point2::new(snap(&xs, rect.max.x), snap(&ys, rect.max.y)),
        };
        moved += [
            (snapped.min.x, rect.min.x),
            (snapped.min.y, rect.min.y),
            (snapped.max.x, rect.max.x),
            (snapped.max.y, rect.max.y),
        ]
        .iter()
        .filter(|(a, b)| a != b)
        .count();
        welded.push(snapped);
    }

    (welded, moved)
}

/// Sorted `(value, canonical)` pairs for one axis
fn axis_clusters(values: impl Iterator<Item = f64>, epsilon: f64) -> Vec<(f64, f64)> {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);
    values.dedup_by(|a, b| a.total_cmp(b).is_eq());

    let mut table = Vec::with_capacity(values.len());
    let mut anchor = f64::NAN;
    for value in values {
        if !(value - anchor < epsilon) {
            anchor = value;
        }
        table.push((value, anchor));
    }
    table
}

fn snap(table: &[(f64, f64)], value: f64) -> f64 {
    match table.binary_search_by(|(v, _)| v.total_cmp(&value)) {
        Ok(i) => table[i].1,
        Err(_) => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let r = Rectangle::from_corners(Point2::new(3.0, 1.0), Point2::new(0.0, 4.0));
        assert_eq!(r.min, Point2::new(0.0, 1.0));
        assert_eq!(r.max, Point2::new(3.0, 4.0));
        assert!((r.area() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_edges_are_closed_cycle() {
        let r = Rectangle::from_corners(Point2::new(2.0, 2.0), Point2::new(0.0, 0.0));
        let edges = r.edges();
        assert_eq!(edges[0].a, Point2::new(0.0, 0.0));
        assert_eq!(edges[0].b, Point2::new(2.0, 0.0));
        assert_eq!(edges[2].a, Point2::new(2.0, 2.0));
        for i in 0..4 {
            assert_eq!(edges[i].b, edges[(i + 1) % 4].a);
        }
    }

    #[test]
    fn test_decompose_collects_shared_vertices_once() {
        let tol = Tolerance::default();
        let rects = [
            Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)),
            Rectangle::from_corners(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)),
        ];
        let d = decompose_rectangles(&rects, &tol);
        assert_eq!(d.edges.len(), 8);
        // (1,0) and (1,1) are shared
        assert_eq!(d.vertices.len(), 6);
    }

    #[test]
    fn test_contains_strictly_excludes_border() {
        let r = Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0));
        assert!(r.contains_strictly(&Point2::new(1.0, 1.0), 0.01));
        assert!(!r.contains_strictly(&Point2::new(2.0, 1.0), 0.01));
        assert!(!r.contains_strictly(&Point2::new(1.0, 0.005), 0.01));
    }

    #[test]
    fn test_weld_snaps_near_coordinates() {
        let tol = Tolerance::default();
        let rects = [
            Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(3.0, 1.0)),
            Rectangle::from_corners(Point2::new(2.995, 0.0), Point2::new(4.0, 3.0)),
        ];
        let (welded, moved) = weld_rectangles(&rects, &tol);
        assert_eq!(moved, 1);
        assert_eq!(welded[0].max.x, 2.995);
        assert_eq!(welded[1].min.x, 2.995);
        assert_eq!(welded[1].max, Point2::new(4.0, 3.0));
    }

    #[test]
    fn test_weld_keeps_separated_coordinates() {
        let tol = Tolerance::default();
        let rects = [
            Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(3.0, 1.0)),
            Rectangle::from_corners(Point2::new(2.98, 0.0), Point2::new(4.0, 3.0)),
        ];
        let (welded, moved) = weld_rectangles(&rects, &tol);
        assert_eq!(moved, 0);
        assert_eq!(welded, rects);
    }

    #[test]
    fn test_weld_chain_stays_anchored() {
        let tol = Tolerance::default();
        // 0.006 joins 0.0, 0.012 is too far from the anchor and starts a new cluster
        let rects = [
            Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)),
            Rectangle::from_corners(Point2::new(0.006, 2.0), Point2::new(1.0, 3.0)),
            Rectangle::from_corners(Point2::new(0.012, 4.0), Point2::new(1.0, 5.0)),
        ];
        let (welded, moved) = weld_rectangles(&rects, &tol);
        assert_eq!(moved, 1);
        assert_eq!(welded[1].min.x, 0.0);
        assert_eq!(welded[2].min.x, 0.012);
    }

    #[test]
    fn test_weld_thin_rectangle_collapses() {
        let tol = Tolerance::default();
        let rects = [Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(0.004, 2.0))];
        let (welded, _) = weld_rectangles(&rects, &tol);
        assert_eq!(welded[0].width(), 0.0);
        assert!(welded[0].min.x <= welded[0].max.x);
    }
}
