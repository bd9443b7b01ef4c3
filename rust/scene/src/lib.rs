//! Floorplan-Lite Scene Assembly
//!
//! Loads LabelMe floor plan annotations, runs the wall pipeline on the wall
//! rectangles and assembles a scene of named, material-tagged meshes:
//! a "Walls" group with one "WallMesh" per wall outline, plus a "Floor" quad.
//!
//! # Usage
//!
//! ```rust,ignore
//! use floorplan_lite_scene::{build_scene, load_labelme, SceneConfig};
//!
//! let data = load_labelme("plan.json")?;
//! let scene = build_scene(&data, &SceneConfig::from_env())?;
//! println!("{} walls", scene.walls.len());
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod loader;
pub mod types;

pub use builder::{
    build_scene, build_scene_from_rectangles, FLOOR_OBJECT, WALLS_GROUP, WALL_OBJECT,
};
pub use config::SceneConfig;
pub use error::{Result, SceneError};
pub use loader::{floor_rectangle, load_labelme, parse_labelme, shape_rectangle, wall_rectangles};
pub use types::{
    DiagnosticsSummary, FloorplanScene, GroupSummary, LabelmeData, MaterialRef, ObjectSummary,
    SceneBounds, SceneGroup, SceneObject, SceneSummary, Shape,
};
