// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon triangulation utilities
//!
//! Wall footprints are triangulated as a fan around their first vertex. The
//! fan is exact for convex and star-shaped footprints; other concave shapes
//! get overlapping triangles. Footprints enclosing rooms go through earcutr,
//! which handles the holes.

use crate::{Error, Point2, Result};

/// Check if a polygon is convex (all cross products have same sign)
///
/// Collinear runs are ignored, so a rectangle with extra points along its
/// sides is still convex.
#[inline]
pub fn is_convex(points: &[Point2<f64>]) -> bool {
    if points.len() < 3 {
        return false;
    }

    let n = points.len();
    let mut sign = 0i8;

    for i in 0..n {
        let p0 = &points[i];
        let p1 = &points[(i + 1) % n];
        let p2 = &points[(i + 2) % n];

        // Cross product of edges
        let cross = (p1.x - p0.x) * (p2.y - p1.y) - (p1.y - p0.y) * (p2.x - p1.x);

        if cross.abs() > 1e-10 {
            let current_sign = if cross > 0.0 { 1i8 } else { -1i8 };
            if sign == 0 {
                sign = current_sign;
            } else if sign != current_sign {
                return false; // Sign changed - not convex
            }
        }
    }

    true
}

/// Fan triangulation around vertex 0: (0, i+1, i+2) for i in 0..n-2
#[inline]
pub fn fan_triangulate(n: usize) -> Vec<usize> {
    if n < 3 {
        return Vec::new();
    }

    let mut indices = Vec::with_capacity((n - 2) * 3);
    for i in 1..n - 1 {
        indices.push(0);
        indices.push(i);
        indices.push(i + 1);
    }
    indices
}

/// Triangulate a footprint as a fan from its first vertex
/// Returns triangle indices into the input points
#[inline]
pub fn triangulate_footprint(points: &[Point2<f64>]) -> Result<Vec<usize>> {
    if points.len() < 3 {
        return Err(Error::DegenerateLoop {
            points: points.len(),
        });
    }

    Ok(fan_triangulate(points.len()))
}

/// Triangulate a footprint with holes
///
/// Returns triangle indices into the combined vertex array (outer points
/// followed by each hole's points), every triangle counter-clockwise.
pub fn triangulate_with_holes(
    outer: &[Point2<f64>],
    holes: &[&[Point2<f64>]],
) -> Result<Vec<usize>> {
    if outer.len() < 3 {
        return Err(Error::DegenerateLoop {
            points: outer.len(),
        });
    }

    let total_points = outer.len() + holes.iter().map(|h| h.len()).sum::<usize>();
    let mut vertices = Vec::with_capacity(total_points * 2);
    for p in outer {
        vertices.push(p.x);
        vertices.push(p.y);
    }

    let mut hole_indices = Vec::with_capacity(holes.len());
    for hole in holes {
        hole_indices.push(vertices.len() / 2);
        for p in hole.iter() {
            vertices.push(p.x);
            vertices.push(p.y);
        }
    }

    let mut indices = earcutr::earcut(&vertices, &hole_indices, 2)
        .map_err(|e| Error::TriangulationError(format!("{:?}", e)))?;

    // earcut does not promise a winding, so orient each triangle explicitly
    let at = |i: usize| (vertices[i * 2], vertices[i * 2 + 1]);
    for tri in indices.chunks_exact_mut(3) {
        let (x0, y0) = at(tri[0]);
        let (x1, y1) = at(tri[1]);
        let (x2, y2) = at(tri[2]);
        if (x1 - x0) * (y2 - y0) - (y1 - y0) * (x2 - x0) < 0.0 {
            tri.swap(1, 2);
        }
    }

    Ok(indices)
}
