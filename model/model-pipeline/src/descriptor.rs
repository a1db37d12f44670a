//! Descriptors and export requests exposed to the surrounding app.

use model_render::ViewAngle;
use model_types::NormalizedMesh;

use crate::error::PipelineError;

/// One normalized model plus the presentation metadata the selection UI
/// needs ("Model 1 of 3").
///
/// Created once per successful parse+normalize pass and discarded when
/// the user switches files; nothing here persists.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    /// Display name (from the file, or synthesized).
    pub name: String,
    /// Ordinal position within the upload (0-based).
    pub index: usize,
    /// Total number of models discovered in the upload.
    pub mesh_count: usize,
    /// Triangle count of this model.
    pub triangle_count: usize,
    /// The normalized geometry, read-only from here on.
    pub mesh: NormalizedMesh,
}

/// Target encoding for an orthographic view export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTarget {
    /// Raster image (PNG).
    Png,
    /// Single-page document with the view embedded.
    Pdf,
}

/// Parameters for one derived-artifact production call.
///
/// Transient: built from UI state per action, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportRequest {
    /// Oblique-view JPEG thumbnail (the cart-add path).
    Thumbnail {
        /// Uniform surface color.
        color: [u8; 3],
    },
    /// One of the three fixed orthographic viewpoints.
    View {
        /// Which viewpoint.
        angle: ViewAngle,
        /// Raster or document output.
        target: ViewTarget,
        /// Uniform surface color.
        color: [u8; 3],
    },
    /// Binary STL re-export (the download path).
    Stl {
        /// Per-axis scale in percent, applied fresh to the normalized
        /// geometry (100/100/100 = unchanged).
        scale_percent: [f64; 3],
        /// Requested print color. Binary STL has no standard color
        /// channel, so this is informational only.
        color: [u8; 3],
    },
}

/// A non-fatal degradation that occurred during ingestion.
///
/// Warnings are part of the result, not a side channel: the UI shows
/// them ("file loaded as fallback shape") instead of silently
/// presenting wrong geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestWarning {
    /// Parsing failed and the placeholder cube was substituted.
    ParsedAsFallback {
        /// Human-readable parse failure reason.
        reason: String,
    },
    /// The scale step was skipped for one mesh (degenerate or
    /// oversized geometry); it was recentered but not resized.
    ScalingSkipped {
        /// Index of the affected mesh.
        mesh_index: usize,
    },
}

/// The result of ingesting one upload.
#[derive(Debug, Clone)]
pub struct Ingestion {
    /// Ordered descriptors, one per mesh found in the file.
    pub descriptors: Vec<ModelDescriptor>,
    /// Non-fatal degradations encountered along the way.
    pub warnings: Vec<IngestWarning>,
}

impl Ingestion {
    /// Whether this upload was substituted with the placeholder shape.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, IngestWarning::ParsedAsFallback { .. }))
    }

    /// Look up the descriptor the user selected.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::BadModelIndex`] if `index` is out of
    /// range for this upload.
    pub fn descriptor(&self, index: usize) -> Result<&ModelDescriptor, PipelineError> {
        self.descriptors
            .get(index)
            .ok_or(PipelineError::BadModelIndex {
                index,
                count: self.descriptors.len(),
            })
    }
}
