// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directed planar edges

use crate::tolerance::{PointKey, Tolerance};
use nalgebra::Point2;

/// Directed edge from `a` to `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: Point2<f64>,
    pub b: Point2<f64>,
}

impl Edge {
    #[inline]
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.b - self.a).norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point2<f64> {
        Point2::new((self.a.x + self.b.x) / 2.0, (self.a.y + self.b.y) / 2.0)
    }

    /// Same segment, opposite direction
    #[inline]
    pub fn reversed(&self) -> Self {
        Self { a: self.b, b: self.a }
    }

    /// Quantized (start, end) pair identifying this directed edge
    #[inline]
    pub fn key(&self, tol: &Tolerance) -> (PointKey, PointKey) {
        (tol.key(&self.a), tol.key(&self.b))
    }

    /// Both endpoints snap to the same grid cell
    #[inline]
    pub fn is_degenerate(&self, tol: &Tolerance) -> bool {
        tol.key(&self.a) == tol.key(&self.b)
    }

    /// Perpendicular distance from `p` to the infinite line through this edge
    pub fn line_distance(&self, p: &Point2<f64>) -> f64 {
        let d = self.b - self.a;
        let len = d.norm();
        if len < 1e-12 {
            return (p - self.a).norm();
        }
        (d.x * (p.y - self.a.y) - d.y * (p.x - self.a.x)).abs() / len
    }
}
