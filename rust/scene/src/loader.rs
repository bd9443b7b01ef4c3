// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! LabelMe annotation loading and shape selection

use crate::error::{Result, SceneError};
use crate::types::{LabelmeData, Shape};
use floorplan_lite_geometry::Rectangle;
use nalgebra::Point2;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Parse a LabelMe document from a JSON string
pub fn parse_labelme(json: &str) -> Result<LabelmeData> {
    let data: LabelmeData = serde_json::from_str(json)?;
    debug!(shapes = data.shapes.len(), "parsed annotation");
    Ok(data)
}

/// Read and parse a LabelMe document from disk
pub fn load_labelme(path: impl AsRef<Path>) -> Result<LabelmeData> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_labelme(&json)
}

/// Rectangle spanned by the first two points of a shape
///
/// Further points are ignored. Returns None for shapes with fewer than two.
pub fn shape_rectangle(shape: &Shape) -> Option<Rectangle> {
    match shape.points.as_slice() {
        [p, q, ..] => Some(Rectangle::from_corners(
            Point2::new(p[0], p[1]),
            Point2::new(q[0], q[1]),
        )),
        _ => None,
    }
}

/// Wall rectangles in document order
pub fn wall_rectangles(data: &LabelmeData) -> Vec<Rectangle> {
    let mut rectangles = Vec::new();
    for (index, shape) in data.shapes.iter().enumerate() {
        if !shape.is_wall() {
            continue;
        }
        match shape_rectangle(shape) {
            Some(rect) => rectangles.push(rect),
            None => warn!(
                index,
                points = shape.points.len(),
                "skipping wall shape with fewer than 2 points"
            ),
        }
    }
    rectangles
}

/// Floor area from the first shape labelled as such
pub fn floor_rectangle(data: &LabelmeData) -> Option<Rectangle> {
    let shape = data.shapes.iter().find(|s| s.is_floor_area())?;
    let rect = shape_rectangle(shape);
    if rect.is_none() {
        warn!(
            points = shape.points.len(),
            "skipping floor area with fewer than 2 points"
        );
    }
    rect
}
