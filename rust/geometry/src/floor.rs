// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Floor quad from the annotated floor area

use crate::mesh::Mesh;
use crate::rectangle::Rectangle;
use nalgebra::{Point3, Vector3};

/// Build a flat quad covering `area` at y=`elevation`, facing +Y
pub fn build_floor(area: &Rectangle, elevation: f64) -> Mesh {
    let mut mesh = Mesh::with_capacity(4, 6);
    let up = Vector3::new(0.0, 1.0, 0.0);

    for corner in area.corners() {
        mesh.add_vertex(Point3::new(corner.x, elevation, corner.y), up);
    }

    mesh.add_triangle(0, 2, 1);
    mesh.add_triangle(0, 3, 2);
    mesh
}
