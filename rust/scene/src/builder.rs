// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scene assembly from annotated floor plans

use crate::config::SceneConfig;
use crate::error::Result;
use crate::loader::{floor_rectangle, wall_rectangles};
use crate::types::{FloorplanScene, LabelmeData, SceneGroup, SceneObject};
use floorplan_lite_geometry::{build_floor, build_walls, Rectangle};
use tracing::{info, warn};

/// Name of the group holding every wall object
pub const WALLS_GROUP: &str = "Walls";
/// Name of each wall object
pub const WALL_OBJECT: &str = "WallMesh";
/// Name of the floor object
pub const FLOOR_OBJECT: &str = "Floor";

/// Build walls and floor for an annotation document
pub fn build_scene(data: &LabelmeData, config: &SceneConfig) -> Result<FloorplanScene> {
    let walls = wall_rectangles(data);
    let floor = floor_rectangle(data);
    build_scene_from_rectangles(&walls, floor.as_ref(), config)
}

/// Build walls and floor from already selected rectangles
pub fn build_scene_from_rectangles(
    walls: &[Rectangle],
    floor: Option<&Rectangle>,
    config: &SceneConfig,
) -> Result<FloorplanScene> {
    config.validate()?;

    let pipeline = config.pipeline_config();
    let build = build_walls(walls, &pipeline);

    let wall_material = config.wall_material();
    let mut group = SceneGroup::new(WALLS_GROUP);
    group.objects = build
        .walls
        .into_iter()
        .map(|wall| SceneObject::new(WALL_OBJECT, wall_material.clone(), wall.mesh))
        .collect();

    let floor = floor.and_then(|area| {
        if area.area() <= 0.0 {
            warn!(
                width = area.width(),
                height = area.height(),
                "skipping zero-area floor"
            );
            return None;
        }
        Some(SceneObject::new(
            FLOOR_OBJECT,
            config.floor_material(),
            build_floor(area, pipeline.elevation),
        ))
    });

    info!(
        rectangles = walls.len(),
        walls = group.len(),
        triangles = group.triangle_count(),
        floor = floor.is_some(),
        "built floorplan scene"
    );

    Ok(FloorplanScene {
        walls: group,
        floor,
        diagnostics: build.diagnostics,
    })
}
