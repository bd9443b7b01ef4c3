//! Floorplan-Lite Geometry Processing
//!
//! Turns axis-aligned wall rectangles from an annotated floor plan into
//! closed wall outlines and extrudes them into triangle meshes.
//!
//! ```rust,ignore
//! use floorplan_lite_geometry::{build_walls, PipelineConfig, Rectangle, Point2};
//!
//! let walls = [
//!     Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(3.0, 0.2)),
//!     Rectangle::from_corners(Point2::new(0.0, 0.0), Point2::new(0.2, 3.0)),
//! ];
//! let build = build_walls(&walls, &PipelineConfig::with_height(2.5));
//! assert_eq!(build.walls.len(), 1);
//! ```

pub mod edge;
pub mod error;
pub mod extrusion;
pub mod floor;
pub mod loops;
pub mod merge;
pub mod mesh;
pub mod pipeline;
pub mod rectangle;
pub mod split;
pub mod tolerance;
pub mod triangulation;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Point3, Vector3};

pub use edge::Edge;
pub use error::{Error, Result};
pub use extrusion::{extrude_loop, extrude_loop_at, extrude_loop_with_holes_at};
pub use floor::build_floor;
pub use loops::{extract_loops, Loop, LoopDiagnostics, LoopExtraction, LoopExtractor};
pub use merge::{merge_overlapping, MergeStats};
pub use mesh::Mesh;
pub use pipeline::{build_walls, PipelineConfig, PipelineDiagnostics, WallBuild, WallMesh};
pub use rectangle::{decompose_rectangles, weld_rectangles, Decomposition, Rectangle};
pub use split::{segment_intersection, split_edge, split_edges};
pub use tolerance::{PointKey, Tolerance};
pub use triangulation::{fan_triangulate, is_convex, triangulate_footprint, triangulate_with_holes};
