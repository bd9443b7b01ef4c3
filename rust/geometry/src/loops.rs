// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Closed loop extraction from a split edge set
//!
//! Edges are indexed by their start point and walked forward until the walk
//! returns to where it began. At a junction with several usable outgoing
//! edges the first one in edge order is taken.

use crate::edge::Edge;
use crate::tolerance::{PointKey, Tolerance};
use crate::triangulation::is_convex;
use nalgebra::Point2;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::debug;

/// Closed polygonal footprint
#[derive(Debug, Clone, PartialEq)]
pub struct Loop {
    /// Vertices in walk order, the closing edge back to the first is implicit
    pub points: Vec<Point2<f64>>,
}

impl Loop {
    pub fn new(points: Vec<Point2<f64>>) -> Self {
        Self { points }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for counter-clockwise loops
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }

        let mut area = 0.0;
        for i in 0..n {
            let p = &self.points[i];
            let q = &self.points[(i + 1) % n];
            area += p.x * q.y - q.x * p.y;
        }
        area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Fan triangulation from the first vertex is only valid for convex loops
    pub fn is_convex(&self) -> bool {
        is_convex(&self.points)
    }

    /// Even-odd point in polygon test; points on the boundary may go either way
    pub fn contains_point(&self, p: &Point2<f64>) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n.wrapping_sub(1);
        for i in 0..n {
            let a = &self.points[i];
            let b = &self.points[j];
            if (a.y > p.y) != (b.y > p.y) {
                let x = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}

/// Counts of walks that did not yield a loop
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopDiagnostics {
    /// Walks that ran into a dead end before closing
    pub open_chains: usize,
    /// Walks that closed with fewer than 3 points
    pub short_loops: usize,
    /// Steps where more than one outgoing edge was available
    pub ambiguous_junctions: usize,
}

/// Result of a loop extraction
#[derive(Debug, Clone, Default)]
pub struct LoopExtraction {
    pub loops: Vec<Loop>,
    pub diagnostics: LoopDiagnostics,
}

/// Undirected segment key, (a,b) and (b,a) map to the same value
#[inline]
fn segment(a: PointKey, b: PointKey) -> (PointKey, PointKey) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Working state for one extraction run
///
/// Owns the adjacency map and the visited set; both are dropped when
/// [`LoopExtractor::extract`] returns.
pub struct LoopExtractor<'a> {
    edges: &'a [Edge],
    tol: Tolerance,
    adjacency: FxHashMap<PointKey, SmallVec<[usize; 4]>>,
    visited: FxHashSet<(PointKey, PointKey)>,
    diagnostics: LoopDiagnostics,
}

impl<'a> LoopExtractor<'a> {
    pub fn new(edges: &'a [Edge], tol: Tolerance) -> Self {
        let mut adjacency: FxHashMap<PointKey, SmallVec<[usize; 4]>> = FxHashMap::default();
        for (i, edge) in edges.iter().enumerate() {
            adjacency.entry(tol.key(&edge.a)).or_default().push(i);
        }

        Self {
            edges,
            tol,
            adjacency,
            visited: FxHashSet::default(),
            diagnostics: LoopDiagnostics::default(),
        }
    }

    #[inline]
    fn is_visited(&self, a: PointKey, b: PointKey) -> bool {
        self.visited.contains(&segment(a, b))
    }

    /// First outgoing edge from `current` that is unvisited and does not lead back to `prev`
    fn next_edge(&mut self, current: PointKey, prev: PointKey) -> Option<usize> {
        let outgoing = self.adjacency.get(&current)?;

        let mut first = None;
        let mut available = 0;
        for &j in outgoing {
            let next = self.tol.key(&self.edges[j].b);
            if next == prev || self.visited.contains(&segment(current, next)) {
                continue;
            }
            available += 1;
            if first.is_none() {
                first = Some(j);
            }
        }

        if available > 1 {
            self.diagnostics.ambiguous_junctions += 1;
        }
        first
    }

    /// Walk from `edge`; returns the loop if the walk closes
    fn walk(&mut self, edge: &Edge) -> Option<Loop> {
        let start = self.tol.key(&edge.a);
        let mut prev = start;
        let mut current = self.tol.key(&edge.b);
        let mut current_point = edge.b;
        let mut points = vec![edge.a];

        while current != start {
            points.push(current_point);
            self.visited.insert(segment(prev, current));

            let Some(j) = self.next_edge(current, prev) else {
                self.diagnostics.open_chains += 1;
                return None;
            };

            prev = current;
            current_point = self.edges[j].b;
            current = self.tol.key(&current_point);
        }
        self.visited.insert(segment(prev, current));

        if points.len() < 3 {
            self.diagnostics.short_loops += 1;
            return None;
        }
        Some(Loop::new(points))
    }

    /// Walk every unvisited edge and collect the closed loops
    pub fn extract(mut self) -> LoopExtraction {
        let edges = self.edges;
        let mut loops = Vec::new();

        for edge in edges {
            let (a, b) = edge.key(&self.tol);
            if a == b || self.is_visited(a, b) {
                continue;
            }
            if let Some(found) = self.walk(edge) {
                loops.push(found);
            }
        }

        debug!(
            loops = loops.len(),
            open_chains = self.diagnostics.open_chains,
            short_loops = self.diagnostics.short_loops,
            ambiguous_junctions = self.diagnostics.ambiguous_junctions,
            "extracted closed loops"
        );

        LoopExtraction {
            loops,
            diagnostics: self.diagnostics,
        }
    }
}

/// Extract all closed loops from `edges`
pub fn extract_loops(edges: &[Edge], tol: &Tolerance) -> LoopExtraction {
    LoopExtractor::new(edges, *tol).extract()
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
    fn test_unit_square_yields_one_loop() {
        let tol = Tolerance::default();
        let square = Rectangle::from_corners(p(0.0, 0.0), p(1.0, 1.0));
        let result = extract_loops(&square.edges(), &tol);

        assert_eq!(result.loops.len(), 1);
        let found = &result.loops[0];
        assert_eq!(found.len(), 4);
        assert_eq!(found.points[0], p(0.0, 0.0));
        assert_eq!(found.points[2], p(1.0, 1.0));
        assert!(found.is_counter_clockwise());
        assert_abs_diff_eq!(found.area(), 1.0, epsilon = 1e-12);
        assert_eq!(result.diagnostics, LoopDiagnostics::default());
    }

    #[test]
    fn test_open_chain_is_discarded() {
        let tol = Tolerance::default();
        let edges = [
            Edge::new(p(0.0, 0.0), p(1.0, 0.0)),
            Edge::new(p(1.0, 0.0), p(1.0, 1.0)),
            Edge::new(p(1.0, 1.0), p(0.0, 1.0)),
        ];
        let result = extract_loops(&edges, &tol);
        assert!(result.loops.is_empty());
        assert_eq!(result.diagnostics.open_chains, 1);
    }

    #[test]
    fn test_does_not_backtrack_along_reverse_edge() {
        let tol = Tolerance::default();
        // A segment drawn in both directions is not a loop
        let edges = [
            Edge::new(p(0.0, 0.0), p(0.0, 1.0)),
            Edge::new(p(0.0, 1.0), p(0.0, 0.0)),
        ];
        let result = extract_loops(&edges, &tol);
        assert!(result.loops.is_empty());
        assert_eq!(result.diagnostics.open_chains, 1);
    }

    #[test]
    fn test_loop_closes_on_quantized_start() {
        let tol = Tolerance::default();
        // Last edge ends a hair away from the start point
        let edges = [
            Edge::new(p(0.0, 0.0), p(2.0, 0.0)),
            Edge::new(p(2.0, 0.0), p(1.0, 1.0)),
            Edge::new(p(1.0, 1.0), p(1e-7, -1e-7)),
        ];
        let result = extract_loops(&edges, &tol);
        assert_eq!(result.loops.len(), 1);
        assert_eq!(result.loops[0].len(), 3);
    }

    #[test]
    fn test_first_edge_wins_at_junction() {
        let tol = Tolerance::default();
        // Two squares sharing the vertical edge x=1, walked from (0,0)
        let edges = [
            Edge::new(p(0.0, 0.0), p(1.0, 0.0)),
            Edge::new(p(1.0, 0.0), p(1.0, 1.0)),
            Edge::new(p(1.0, 1.0), p(0.0, 1.0)),
            Edge::new(p(0.0, 1.0), p(0.0, 0.0)),
            Edge::new(p(1.0, 0.0), p(2.0, 0.0)),
            Edge::new(p(2.0, 0.0), p(2.0, 1.0)),
            Edge::new(p(2.0, 1.0), p(1.0, 1.0)),
        ];
        let result = extract_loops(&edges, &tol);

        assert_eq!(result.loops.len(), 1);
        assert_eq!(
            result.loops[0].points,
            vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
        );
        assert_eq!(result.diagnostics.ambiguous_junctions, 1);
        // The right half is left as a chain whose closing segment was already used
        assert_eq!(result.diagnostics.open_chains, 1);
    }

    #[test]
    fn test_signed_area_orientation() {
        let ccw = Loop::new(vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 1.0), p(0.0, 1.0)]);
        let cw = Loop::new(ccw.points.iter().rev().cloned().collect());
        assert_abs_diff_eq!(ccw.signed_area(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(cw.signed_area(), -2.0, epsilon = 1e-12);
        assert!(!cw.is_counter_clockwise());
        assert!(ccw.is_convex());
    }

    #[test]
    fn test_contains_point() {
        let l_shape = Loop::new(vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ]);
        assert!(l_shape.contains_point(&p(0.5, 2.5)));
        assert!(l_shape.contains_point(&p(2.5, 0.5)));
        assert!(!l_shape.contains_point(&p(2.0, 2.0)));
        assert!(!l_shape.contains_point(&p(-1.0, 0.5)));

        // Orientation does not matter
        let reversed = Loop::new(l_shape.points.iter().rev().cloned().collect());
        assert!(reversed.contains_point(&p(0.5, 2.5)));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let tol = Tolerance::default();
        let edges: Vec<Edge> = [
            Rectangle::from_corners(p(0.0, 0.0), p(1.0, 1.0)),
            Rectangle::from_corners(p(3.0, 0.0), p(4.0, 2.0)),
        ]
        .iter()
        .flat_map(|r| r.edges())
        .collect();

        let first = extract_loops(&edges, &tol);
        let second = extract_loops(&edges, &tol);
        assert_eq!(first.loops, second.loops);
        assert_eq!(first.loops.len(), 2);
    }
}
