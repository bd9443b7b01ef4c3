// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Numerical tolerances and quantized point keys
//!
//! Every point below the decomposition stage is the result of floating-point
//! intersection math, so points are never compared or hashed exactly. Lookups
//! go through [`PointKey`], a point snapped onto a fixed grid.

use nalgebra::Point2;

/// Tolerances shared by all pipeline stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Distance under which two points are considered equal
    pub point_epsilon: f64,
    /// Determinant magnitude under which two lines are treated as parallel
    pub parallel_epsilon: f64,
    /// Slack applied on each axis when testing if a point lies within a segment's range
    pub bounds_tolerance: f64,
    /// Grid size used to build [`PointKey`]s
    pub quantum: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            point_epsilon: 0.01,
            parallel_epsilon: 1e-3,
            bounds_tolerance: 0.01,
            quantum: 1e-3,
        }
    }
}

impl Tolerance {
    /// Snap a point onto the quantization grid
    #[inline]
    pub fn key(&self, p: &Point2<f64>) -> PointKey {
        PointKey {
            x: (p.x / self.quantum).round() as i64,
            y: (p.y / self.quantum).round() as i64,
        }
    }

    /// Epsilon comparison of two points
    #[inline]
    pub fn points_equal(&self, a: &Point2<f64>, b: &Point2<f64>) -> bool {
        (a - b).norm() < self.point_epsilon
    }

    /// Check if `p` lies within the axis-aligned range spanned by `a` and `b`,
    /// inclusive, widened by `bounds_tolerance` on each axis
    #[inline]
    pub fn within_range(&self, a: &Point2<f64>, b: &Point2<f64>, p: &Point2<f64>) -> bool {
        let t = self.bounds_tolerance;
        a.x.min(b.x) - t <= p.x
            && p.x <= a.x.max(b.x) + t
            && a.y.min(b.y) - t <= p.y
            && p.y <= a.y.max(b.y) + t
    }
}

/// A point snapped onto the quantization grid, usable as a hash key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointKey {
    pub x: i64,
    pub y: i64,
}
