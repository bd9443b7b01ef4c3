// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Extrusion operations - lifting wall footprints into 3D meshes
//!
//! A footprint with n points becomes a mesh with 2n vertices: the n base
//! vertices at the floor elevation followed by n top vertices, vertex `i + n`
//! directly above vertex `i`. Walls stand on the floor, so there is no bottom
//! cap; the mesh has (n - 2) top triangles and 2n side triangles.
//!
//! Walls enclosing rooms carry their hole loops along: the rings then hold
//! the outline points followed by every hole's points, the cap leaves the
//! rooms open and the holes get side walls of their own, facing into the room.

use crate::error::{Error, Result};
use crate::loops::Loop;
use crate::mesh::Mesh;
use crate::triangulation::{triangulate_footprint, triangulate_with_holes};
use nalgebra::{Point2, Point3, Vector3};

/// Extrude a footprint from y=0 up to y=`height`
#[inline]
pub fn extrude_loop(footprint: &Loop, height: f64) -> Result<Mesh> {
    extrude_loop_at(footprint, height, 0.0)
}

/// Extrude a footprint from y=`elevation` up to y=`elevation + height`
pub fn extrude_loop_at(footprint: &Loop, height: f64, elevation: f64) -> Result<Mesh> {
    check_height(height)?;

    let points = &footprint.points;
    let base_triangles = triangulate_footprint(points)?;
    let n = points.len();

    let mut mesh = Mesh::with_capacity(n * 2, base_triangles.len() + n * 6);

    // Base ring, then top ring
    add_ring(points, elevation, &mut mesh);
    add_ring(points, elevation + height, &mut mesh);

    create_top_cap(&base_triangles, n, &mut mesh);
    create_side_walls(0, n, n, &mut mesh);

    mesh.compute_normals();
    Ok(mesh)
}

/// Extrude a footprint around the rooms it encloses
///
/// `holes` are the clockwise boundaries of those rooms. Without holes this is
/// [`extrude_loop_at`].
pub fn extrude_loop_with_holes_at(
    footprint: &Loop,
    holes: &[Loop],
    height: f64,
    elevation: f64,
) -> Result<Mesh> {
    if holes.is_empty() {
        return extrude_loop_at(footprint, height, elevation);
    }
    check_height(height)?;
    if let Some(hole) = holes.iter().find(|h| h.len() < 3) {
        return Err(Error::DegenerateLoop { points: hole.len() });
    }

    let hole_points: Vec<&[Point2<f64>]> = holes.iter().map(|h| h.points.as_slice()).collect();
    let cap_triangles = triangulate_with_holes(&footprint.points, &hole_points)?;

    let rings: Vec<&[Point2<f64>]> = std::iter::once(footprint.points.as_slice())
        .chain(hole_points.iter().copied())
        .collect();
    let total: usize = rings.iter().map(|r| r.len()).sum();

    let mut mesh = Mesh::with_capacity(total * 2, cap_triangles.len() + total * 6);
    for ring in &rings {
        add_ring(ring, elevation, &mut mesh);
    }
    for ring in &rings {
        add_ring(ring, elevation + height, &mut mesh);
    }

    create_top_cap(&cap_triangles, total, &mut mesh);
    let mut start = 0;
    for ring in &rings {
        create_side_walls(start, ring.len(), total, &mut mesh);
        start += ring.len();
    }

    mesh.compute_normals();
    Ok(mesh)
}

fn check_height(height: f64) -> Result<()> {
    if !height.is_finite() || height <= 0.0 {
        return Err(Error::InvalidExtrusion(format!(
            "Height must be positive, got {}",
            height
        )));
    }
    Ok(())
}

fn add_ring(points: &[Point2<f64>], y: f64, mesh: &mut Mesh) {
    for p in points {
        mesh.add_vertex(Point3::new(p.x, y, p.y), Vector3::zeros());
    }
}

/// Top cap from the base fan with reversed winding, so it faces +Y
fn create_top_cap(base_triangles: &[usize], n: usize, mesh: &mut Mesh) {
    let offset = n as u32;
    for tri in base_triangles.chunks_exact(3) {
        mesh.add_triangle(
            offset + tri[0] as u32,
            offset + tri[2] as u32,
            offset + tri[1] as u32,
        );
    }
}

/// One quad per boundary edge of the ring at `start..start + len`, split into
/// two triangles; `total` is the size of the base ring block
fn create_side_walls(start: usize, len: usize, total: usize, mesh: &mut Mesh) {
    let (start, len, n) = (start as u32, len as u32, total as u32);
    for k in 0..len {
        let i = start + k;
        let next = start + (k + 1) % len;
        let (a, b) = (i, next);
        let (c, d) = (i + n, next + n);

        mesh.add_triangle(a, c, d);
        mesh.add_triangle(a, d, b);
    }
}
