//! Pipeline-level error type.

use thiserror::Error;

/// Errors that escape the pipeline boundary.
///
/// Malformed-but-readable uploads never surface here; they are
/// recovered internally with the placeholder cube. What remains is
/// contract violations the caller should have prevented, plus artifact
/// failures reported with a named reason.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The caller handed in an empty buffer.
    #[error("empty upload buffer")]
    EmptyUpload,

    /// The file extension is outside the upload allow-list.
    #[error("unsupported upload format: .{extension}")]
    UnsupportedFormat {
        /// The offending extension.
        extension: String,
    },

    /// A descriptor index that does not exist in this ingestion.
    #[error("no model at index {index} (have {count})")]
    BadModelIndex {
        /// Requested index.
        index: usize,
        /// Number of models actually ingested.
        count: usize,
    },

    /// Artifact production failed after a successful parse+normalize.
    #[error("artifact production failed: {0}")]
    Artifact(#[from] model_render::RenderError),
}
