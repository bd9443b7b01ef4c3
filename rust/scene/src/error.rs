use std::path::PathBuf;
use thiserror::Error;

/// Result type for scene loading and assembly
pub type Result<T> = std::result::Result<T, SceneError>;

/// Errors raised while loading annotations or assembling a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid annotation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Geometry(#[from] floorplan_lite_geometry::Error),
}
