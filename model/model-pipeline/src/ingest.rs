//! Ingestion entry point and artifact dispatch.

use model_io::{export_stl, parse_model, ParseError};
use model_normalize::{normalize, NormalizeConfig};
use model_render::{
    export_view_pdf, render_thumbnail, render_view, ThumbnailOptions, ViewOptions,
};
use model_types::{placeholder_cube, RawMesh};
use tracing::{info, warn};

use crate::descriptor::{ExportRequest, IngestWarning, Ingestion, ModelDescriptor, ViewTarget};
use crate::error::PipelineError;

/// Configuration shared by the pipeline stages.
///
/// One instance covers an ingestion and all artifact calls made against
/// its descriptors, so the normalizer and the test harness agree on the
/// same constants.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineConfig {
    /// Normalization parameters (canonical size, clamp, size limit).
    pub normalize: NormalizeConfig,
    /// Thumbnail rendering parameters.
    pub thumbnail: ThumbnailOptions,
    /// Orthographic view rendering parameters.
    pub view: ViewOptions,
}

/// Ingest one uploaded file.
///
/// Parses the buffer (dispatching on the file name's extension),
/// normalizes every discovered mesh, and returns ordered descriptors.
///
/// Parse failures for an allowed format are recovered here by
/// substituting the placeholder cube; the substitution is recorded as
/// an [`IngestWarning::ParsedAsFallback`] so the UI can tell the user
/// the shape is not their model.
///
/// # Errors
///
/// - [`PipelineError::EmptyUpload`] for a zero-length buffer
/// - [`PipelineError::UnsupportedFormat`] for an extension outside the
///   allow-list (the upload UI should have rejected it already)
pub fn ingest(
    bytes: &[u8],
    file_name: &str,
    config: &PipelineConfig,
) -> Result<Ingestion, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyUpload);
    }

    let (raw_meshes, mut warnings) = parse_or_placeholder(bytes, file_name)?;

    let mesh_count = raw_meshes.len();
    let mut descriptors = Vec::with_capacity(mesh_count);

    for (index, raw) in raw_meshes.into_iter().enumerate() {
        let name = raw
            .name
            .clone()
            .unwrap_or_else(|| display_name(file_name, index, mesh_count));

        let (mesh, report) = normalize(raw, &config.normalize);
        if report.skipped.is_some() {
            warnings.push(IngestWarning::ScalingSkipped { mesh_index: index });
        }

        descriptors.push(ModelDescriptor {
            name,
            index,
            mesh_count,
            triangle_count: mesh.triangle_count(),
            mesh,
        });
    }

    info!(
        file_name,
        models = descriptors.len(),
        warnings = warnings.len(),
        "upload ingested"
    );

    Ok(Ingestion {
        descriptors,
        warnings,
    })
}

/// The explicit recovery combinator for parse failures.
///
/// An unrecognized extension is a contract violation and stays an
/// error; anything else that fails to decode becomes the placeholder
/// cube plus a warning that the caller must surface.
fn parse_or_placeholder(
    bytes: &[u8],
    file_name: &str,
) -> Result<(Vec<RawMesh>, Vec<IngestWarning>), PipelineError> {
    match parse_model(bytes, file_name) {
        Ok(meshes) => Ok((meshes, Vec::new())),
        Err(ParseError::UnknownFormat { extension }) => {
            Err(PipelineError::UnsupportedFormat { extension })
        }
        Err(err) => {
            warn!(file_name, error = %err, "parse failed, substituting placeholder cube");
            let reason = err.to_string();
            Ok((
                vec![placeholder_cube()],
                vec![IngestWarning::ParsedAsFallback { reason }],
            ))
        }
    }
}

/// Synthesize a display name for a mesh the file did not name.
fn display_name(file_name: &str, index: usize, mesh_count: usize) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem);
    if mesh_count == 1 {
        stem.to_string()
    } else {
        format!("{stem} - Model {}", index + 1)
    }
}

/// Produce one derived artifact for a descriptor.
///
/// All three producers are pure functions of the normalized mesh and
/// the request; a failure comes back as a named
/// [`PipelineError::Artifact`] reason, never a panic, so a broken
/// thumbnail cannot abort an unrelated cart action.
///
/// # Errors
///
/// Returns [`PipelineError::Artifact`] when the underlying producer
/// fails (e.g. the mesh has no triangles).
pub fn produce(
    descriptor: &ModelDescriptor,
    request: &ExportRequest,
    config: &PipelineConfig,
) -> Result<Vec<u8>, PipelineError> {
    match *request {
        ExportRequest::Thumbnail { color } => {
            let options = ThumbnailOptions {
                color,
                ..config.thumbnail
            };
            Ok(render_thumbnail(&descriptor.mesh, &options)?)
        }
        ExportRequest::View { angle, target, color } => {
            let options = ViewOptions {
                color,
                ..config.view
            };
            let bytes = match target {
                ViewTarget::Png => render_view(&descriptor.mesh, angle, &options)?,
                ViewTarget::Pdf => export_view_pdf(&descriptor.mesh, angle, &options)?,
            };
            Ok(bytes)
        }
        ExportRequest::Stl { scale_percent, .. } => {
            // The requested color is informational only; binary STL
            // carries no standard color channel.
            Ok(export_stl(&descriptor.mesh, scale_percent))
        }
    }
}
