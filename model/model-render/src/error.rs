//! Error types for artifact production.

use thiserror::Error;

/// Result type for artifact production.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while producing a thumbnail, view, or export.
///
/// These are presentation-adjacent failures: the pipeline boundary
/// converts them to placeholder results or user-visible notices, never
/// an unhandled panic.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The mesh has no triangles to render.
    #[error("cannot render an empty mesh")]
    EmptyMesh,

    /// Image encoding failed.
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}
