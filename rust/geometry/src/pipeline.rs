// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wall pipeline: rectangles in, extruded wall meshes out
//!
//! Stages run strictly in order: weld, decompose, split, merge (optional),
//! extract loops, extrude. The pipeline never fails; anything it cannot turn
//! into a wall is counted in [`PipelineDiagnostics`] and skipped.
//!
//! Clockwise loops are the boundaries of rooms enclosed by walls. Each one is
//! attached to the smallest outline around it and extruded with it, so the
//! room stays open and gets inner wall faces.

use crate::extrusion::extrude_loop_with_holes_at;
use crate::loops::{extract_loops, Loop, LoopDiagnostics};
use crate::merge::{merge_overlapping, MergeStats};
use crate::mesh::Mesh;
use crate::rectangle::{decompose_rectangles, weld_rectangles, Rectangle};
use crate::split::split_edges;
use crate::tolerance::Tolerance;
use crate::{Error, Result};
use nalgebra::Point2;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Configuration for [`build_walls`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    /// Wall height
    pub height: f64,
    /// Elevation of the wall base
    pub elevation: f64,
    /// Numerical tolerances
    pub tolerance: Tolerance,
    /// Reduce overlapping rectangles to the outline of their union before walking loops
    pub merge_overlaps: bool,
    /// Extrude independent loops on the rayon thread pool
    pub parallel: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            height: 2.5,
            elevation: 0.0,
            tolerance: Tolerance::default(),
            merge_overlaps: true,
            parallel: true,
        }
    }
}

impl PipelineConfig {
    pub fn with_height(height: f64) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    /// Reject settings under which no loop could be extruded
    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(Error::InvalidExtrusion(format!(
                "Height must be positive, got {}",
                self.height
            )));
        }
        if !self.elevation.is_finite() {
            return Err(Error::InvalidExtrusion(format!(
                "Elevation must be finite, got {}",
                self.elevation
            )));
        }

        let tol = &self.tolerance;
        let all_positive = [
            tol.point_epsilon,
            tol.parallel_epsilon,
            tol.bounds_tolerance,
            tol.quantum,
        ]
        .iter()
        .all(|v| v.is_finite() && *v > 0.0);
        if !all_positive {
            return Err(Error::InvalidExtrusion(format!(
                "Tolerances must be positive: {:?}",
                tol
            )));
        }
        Ok(())
    }
}

/// One extruded wall outline
#[derive(Debug, Clone)]
pub struct WallMesh {
    /// Footprint the mesh was extruded from (counter-clockwise)
    pub footprint: Loop,
    /// Boundaries of the rooms this outline encloses (clockwise)
    pub holes: Vec<Loop>,
    pub mesh: Mesh,
}

/// What each stage produced and discarded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineDiagnostics {
    pub rectangles: usize,
    /// Rectangle coordinates snapped onto a nearby coordinate of another rectangle
    pub welded_coordinates: usize,
    pub input_edges: usize,
    pub split_edges: usize,
    /// Edges handed to loop extraction (after merging, if enabled)
    pub outline_edges: usize,
    pub merge: MergeStats,
    pub loops: LoopDiagnostics,
    pub extracted_loops: usize,
    /// Clockwise loops around empty space enclosed by walls
    pub hole_loops: usize,
    /// Extruded loops without holes that are not convex (fan triangulation may overlap)
    pub non_convex_loops: usize,
    /// Loops that failed the pre-extrusion checks or extrusion itself
    pub rejected_loops: usize,
}

/// Output of [`build_walls`]
#[derive(Debug, Clone, Default)]
pub struct WallBuild {
    pub walls: Vec<WallMesh>,
    /// Distinct rectangle corners seen during decomposition
    pub vertices: Vec<Point2<f64>>,
    pub diagnostics: PipelineDiagnostics,
}

impl WallBuild {
    /// All wall meshes merged into one
    pub fn combined_mesh(&self) -> Mesh {
        let mut combined = Mesh::new();
        for wall in &self.walls {
            combined.merge(&wall.mesh);
        }
        combined
    }

    pub fn triangle_count(&self) -> usize {
        self.walls.iter().map(|w| w.mesh.triangle_count()).sum()
    }
}

/// Run the full wall pipeline over `rectangles`
pub fn build_walls(rectangles: &[Rectangle], config: &PipelineConfig) -> WallBuild {
    let tol = &config.tolerance;
    let mut diagnostics = PipelineDiagnostics {
        rectangles: rectangles.len(),
        ..Default::default()
    };

    let (rectangles, welded) = weld_rectangles(rectangles, tol);
    diagnostics.welded_coordinates = welded;
    if welded > 0 {
        debug!(coordinates = welded, "welded near-coincident rectangle coordinates");
    }

    let decomposition = decompose_rectangles(&rectangles, tol);
    diagnostics.input_edges = decomposition.edges.len();

    let split = split_edges(&decomposition.edges, tol);
    diagnostics.split_edges = split.len();

    let outline = if config.merge_overlaps {
        let (merged, stats) = merge_overlapping(&split, &rectangles, tol);
        diagnostics.merge = stats;
        merged
    } else {
        split
    };
    diagnostics.outline_edges = outline.len();

    let extraction = extract_loops(&outline, tol);
    diagnostics.loops = extraction.diagnostics;
    diagnostics.extracted_loops = extraction.loops.len();

    let min_area = tol.point_epsilon * tol.point_epsilon;
    let mut outlines = Vec::with_capacity(extraction.loops.len());
    let mut holes = Vec::new();
    for footprint in extraction.loops {
        if footprint.len() < 3 {
            // Extraction already drops these
            diagnostics.rejected_loops += 1;
            continue;
        }

        let area = footprint.signed_area();
        if area.abs() < min_area {
            diagnostics.rejected_loops += 1;
            continue;
        }
        if area < 0.0 {
            diagnostics.hole_loops += 1;
            holes.push(footprint);
        } else {
            outlines.push((footprint, Vec::new()));
        }
    }

    for hole in holes {
        match enclosing_outline(&outlines, &hole) {
            Some(i) => outlines[i].1.push(hole),
            None => {
                warn!(points = hole.len(), "room boundary outside every wall outline");
                diagnostics.rejected_loops += 1;
            }
        }
    }

    diagnostics.non_convex_loops = outlines
        .iter()
        .filter(|(footprint, holes)| holes.is_empty() && !footprint.is_convex())
        .count();

    let extruded = extrude_all(outlines, config);

    let mut walls = Vec::with_capacity(extruded.len());
    for (footprint, holes, result) in extruded {
        match result {
            Ok(mesh) => walls.push(WallMesh {
                footprint,
                holes,
                mesh,
            }),
            Err(e) => {
                warn!(
                    points = footprint.len(),
                    holes = holes.len(),
                    error = %e,
                    "wall loop not extruded"
                );
                diagnostics.rejected_loops += 1;
            }
        }
    }

    if diagnostics.non_convex_loops > 0 {
        warn!(
            count = diagnostics.non_convex_loops,
            "non-convex wall footprints extruded with fan triangulation"
        );
    }
    debug!(
        walls = walls.len(),
        holes = diagnostics.hole_loops,
        rejected = diagnostics.rejected_loops,
        "built wall meshes"
    );

    WallBuild {
        walls,
        vertices: decomposition.vertices,
        diagnostics,
    }
}

/// Index of the smallest outline containing `hole`
fn enclosing_outline(outlines: &[(Loop, Vec<Loop>)], hole: &Loop) -> Option<usize> {
    let corner = hole.points[0];
    outlines
        .iter()
        .enumerate()
        .filter(|(_, (footprint, _))| footprint.contains_point(&corner))
        .min_by(|(_, (a, _)), (_, (b, _))| a.area().total_cmp(&b.area()))
        .map(|(i, _)| i)
}

/// Extrude every outline with its holes, keeping input order
fn extrude_all(
    outlines: Vec<(Loop, Vec<Loop>)>,
    config: &PipelineConfig,
) -> Vec<(Loop, Vec<Loop>, Result<Mesh>)> {
    let extrude = |(footprint, holes): (Loop, Vec<Loop>)| {
        let mesh =
            extrude_loop_with_holes_at(&footprint, &holes, config.height, config.elevation);
        (footprint, holes, mesh)
    };

    if config.parallel {
        outlines.into_par_iter().map(extrude).collect()
    } else {
        outlines.into_iter().map(extrude).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rectangle {
        Rectangle::from_corners(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn test_empty_input() {
        let build = build_walls(&[], &PipelineConfig::default());
        assert!(build.walls.is_empty());
        assert_eq!(build.diagnostics, PipelineDiagnostics::default());
    }

    #[test]
    fn test_invalid_height_rejects_instead_of_failing() {
        let config = PipelineConfig::with_height(0.0);
        let build = build_walls(&[rect(0.0, 0.0, 1.0, 1.0)], &config);
        assert!(build.walls.is_empty());
        assert_eq!(build.diagnostics.extracted_loops, 1);
        assert_eq!(build.diagnostics.rejected_loops, 1);
    }

    #[test]
    fn test_validate() {
        assert!(PipelineConfig::default().validate().is_ok());
        assert!(PipelineConfig::with_height(-1.0).validate().is_err());
        assert!(PipelineConfig::with_height(f64::NAN).validate().is_err());

        let mut config = PipelineConfig::default();
        config.tolerance.quantum = 0.0;
        assert!(matches!(config.validate(), Err(Error::InvalidExtrusion(_))));
    }

    #[test]
    fn test_degenerate_rectangle_disappears() {
        let build = build_walls(&[rect(0.0, 0.0, 0.0, 2.0)], &PipelineConfig::default());
        assert!(build.walls.is_empty());
        assert_eq!(build.diagnostics.input_edges, 4);
        assert_eq!(build.diagnostics.split_edges, 2);
    }

    #[test]
    fn test_sequential_and_parallel_agree() {
        let rects = [
            rect(0.0, 0.0, 1.0, 1.0),
            rect(3.0, 0.0, 5.0, 1.0),
            rect(0.0, 4.0, 2.0, 6.0),
        ];
        let parallel = build_walls(&rects, &PipelineConfig::default());
        let sequential = build_walls(
            &rects,
            &PipelineConfig {
                parallel: false,
                ..Default::default()
            },
        );

        assert_eq!(parallel.walls.len(), 3);
        for (a, b) in parallel.walls.iter().zip(&sequential.walls) {
            assert_eq!(a.footprint, b.footprint);
            assert_eq!(a.mesh, b.mesh);
        }
    }

    #[test]
    fn test_combined_mesh() {
        let rects = [rect(0.0, 0.0, 1.0, 1.0), rect(3.0, 0.0, 5.0, 1.0)];
        let build = build_walls(&rects, &PipelineConfig::default());
        let combined = build.combined_mesh();
        assert_eq!(combined.vertex_count(), 16);
        assert_eq!(combined.triangle_count(), 20);
        assert_eq!(build.triangle_count(), 20);
        assert_eq!(build.vertices.len(), 8);
    }

    #[test]
    fn test_near_coincident_walls_are_welded() {
        let build = build_walls(
            &[rect(0.0, 0.0, 3.0, 1.0), rect(2.995, 0.0, 4.0, 3.0)],
            &PipelineConfig::default(),
        );
        assert_eq!(build.diagnostics.welded_coordinates, 1);
        assert_eq!(build.walls.len(), 1);
        assert!(build.walls[0].holes.is_empty());
    }

    #[test]
    fn test_enclosed_room_becomes_hole_of_its_walls() {
        let rects = [
            rect(0.0, 0.0, 10.0, 1.0),
            rect(0.0, 7.0, 10.0, 8.0),
            rect(0.0, 0.0, 1.0, 8.0),
            rect(9.0, 0.0, 10.0, 8.0),
        ];
        let build = build_walls(&rects, &PipelineConfig::default());

        assert_eq!(build.diagnostics.hole_loops, 1);
        assert_eq!(build.diagnostics.non_convex_loops, 0);
        assert_eq!(build.walls.len(), 1);
        let wall = &build.walls[0];
        assert_eq!(wall.holes.len(), 1);
        assert!(wall.holes[0].signed_area() < 0.0);
        assert_eq!(
            wall.mesh.vertex_count(),
            2 * (wall.footprint.len() + wall.holes[0].len())
        );
    }
}
