use thiserror::Error;

/// Result type for geometry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when the geometry stages are called directly.
///
/// The wall pipeline itself never returns these; it counts the affected loops
/// in its diagnostics instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid extrusion parameters: {0}")]
    InvalidExtrusion(String),

    #[error("Triangulation failed: {0}")]
    TriangulationError(String),

    #[error("Degenerate loop: {points} points, at least 3 required")]
    DegenerateLoop { points: usize },
}
