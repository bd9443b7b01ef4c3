// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for floor plan annotations and assembled scenes

use floorplan_lite_geometry::{Mesh, PipelineDiagnostics};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label of shapes marking a wall
pub const WALL_LABEL: &str = "wall";
/// Label of the shape marking the floor area
pub const AREA_LABEL: &str = "area";
/// LabelMe shape type for two-corner rectangles
pub const RECTANGLE_SHAPE: &str = "rectangle";

/// A LabelMe annotation document
///
/// Only `shapes` is read; the rest of the LabelMe document (image data,
/// flags, version) is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelmeData {
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

/// One annotated shape
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shape {
    pub label: String,
    /// Shape vertices in image coordinates; a rectangle has two opposite corners
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    #[serde(default)]
    pub shape_type: String,
}

impl Shape {
    /// Whether this shape is a wall rectangle
    pub fn is_wall(&self) -> bool {
        self.label == WALL_LABEL && self.shape_type == RECTANGLE_SHAPE
    }

    /// Whether this shape marks the floor area (any shape type)
    pub fn is_floor_area(&self) -> bool {
        self.label == AREA_LABEL
    }
}

/// Opaque material reference carried through to scene objects
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialRef(pub String);

impl MaterialRef {
    /// Material used when none is configured
    pub const DEFAULT: &'static str = "Standard";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for MaterialRef {
    fn default() -> Self {
        Self::new(Self::DEFAULT)
    }
}

impl fmt::Display for MaterialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named mesh with its material
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub name: String,
    pub material: MaterialRef,
    pub mesh: Mesh,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, material: MaterialRef, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            material,
            mesh,
        }
    }

    pub fn summary(&self) -> ObjectSummary {
        ObjectSummary {
            name: self.name.clone(),
            material: self.material.clone(),
            vertices: self.mesh.vertex_count(),
            triangles: self.mesh.triangle_count(),
        }
    }
}

/// A named collection of scene objects
#[derive(Debug, Clone, Default)]
pub struct SceneGroup {
    pub name: String,
    pub objects: Vec<SceneObject>,
}

impl SceneGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(|o| o.mesh.triangle_count()).sum()
    }
}

/// Walls and floor built from one annotation document
#[derive(Debug, Clone)]
pub struct FloorplanScene {
    /// "Walls" group, one "WallMesh" object per wall outline
    pub walls: SceneGroup,
    /// "Floor" quad, if the document marks a floor area
    pub floor: Option<SceneObject>,
    pub diagnostics: PipelineDiagnostics,
}

impl FloorplanScene {
    /// All scene objects, walls first
    pub fn objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.walls.objects.iter().chain(self.floor.iter())
    }

    /// Bounding box over every object, None for an empty scene
    pub fn bounds(&self) -> Option<SceneBounds> {
        let mut bounds: Option<SceneBounds> = None;
        for object in self.objects().filter(|o| !o.mesh.is_empty()) {
            let (min, max) = object.mesh.bounds();
            let next = SceneBounds {
                min: [min.x, min.y, min.z],
                max: [max.x, max.y, max.z],
            };
            bounds = Some(match bounds {
                Some(b) => b.union(&next),
                None => next,
            });
        }
        bounds
    }

    pub fn summary(&self) -> SceneSummary {
        SceneSummary {
            walls: GroupSummary {
                name: self.walls.name.clone(),
                objects: self.walls.objects.iter().map(SceneObject::summary).collect(),
            },
            floor: self.floor.as_ref().map(SceneObject::summary),
            bounds: self.bounds(),
            diagnostics: DiagnosticsSummary::from(&self.diagnostics),
        }
    }
}

/// Axis-aligned 3D bounds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SceneBounds {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl SceneBounds {
    fn union(&self, other: &SceneBounds) -> SceneBounds {
        let mut out = *self;
        for axis in 0..3 {
            out.min[axis] = out.min[axis].min(other.min[axis]);
            out.max[axis] = out.max[axis].max(other.max[axis]);
        }
        out
    }
}

/// Serializable scene overview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    pub walls: GroupSummary,
    pub floor: Option<ObjectSummary>,
    pub bounds: Option<SceneBounds>,
    pub diagnostics: DiagnosticsSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSummary {
    pub name: String,
    pub objects: Vec<ObjectSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObjectSummary {
    pub name: String,
    pub material: MaterialRef,
    pub vertices: usize,
    pub triangles: usize,
}

/// Flat copy of the pipeline diagnostics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DiagnosticsSummary {
    pub rectangles: usize,
    pub welded_coordinates: usize,
    pub input_edges: usize,
    pub split_edges: usize,
    pub outline_edges: usize,
    pub duplicate_edges: usize,
    pub back_to_back_edges: usize,
    pub interior_edges: usize,
    pub open_chains: usize,
    pub short_loops: usize,
    pub ambiguous_junctions: usize,
    pub extracted_loops: usize,
    pub hole_loops: usize,
    pub non_convex_loops: usize,
    pub rejected_loops: usize,
}

impl From<&PipelineDiagnostics> for DiagnosticsSummary {
    fn from(d: &PipelineDiagnostics) -> Self {
        Self {
            rectangles: d.rectangles,
            welded_coordinates: d.welded_coordinates,
            input_edges: d.input_edges,
            split_edges: d.split_edges,
            outline_edges: d.outline_edges,
            duplicate_edges: d.merge.duplicates,
            back_to_back_edges: d.merge.back_to_back,
            interior_edges: d.merge.interior,
            open_chains: d.loops.open_chains,
            short_loops: d.loops.short_loops,
            ambiguous_junctions: d.loops.ambiguous_junctions,
            extracted_loops: d.extracted_loops,
            hole_loops: d.hole_loops,
            non_convex_loops: d.non_convex_loops,
            rejected_loops: d.rejected_loops,
        }
    }
}
