//! End-to-end ingestion pipeline for uploaded 3D models.
//!
//! One synchronous call chain per upload, triggered by a user action
//! (file drop, cart add, export click):
//!
//! ```text
//! bytes + name ──▶ sniff ──▶ parse ──▶ normalize ──▶ descriptors
//!                                                      │
//!                                    thumbnail / view / STL export
//! ```
//!
//! Each invocation owns its buffer and meshes; nothing is shared
//! between in-flight uploads and no stage performs I/O. Malformed (but
//! readable) input never throws past [`ingest`]: parse failures
//! degrade to a placeholder cube with a visible warning, and
//! degenerate geometry skips scaling with a warning. Only contract
//! violations (empty buffer, disallowed extension) are hard errors.
//!
//! # Example
//!
//! ```
//! use model_pipeline::{ingest, produce, ExportRequest, PipelineConfig};
//!
//! // A garbage buffer with a valid extension degrades to the
//! // placeholder cube instead of failing the upload.
//! let result = ingest(&[0u8; 32], "broken.stl", &PipelineConfig::default()).unwrap();
//! assert!(result.is_fallback());
//! assert_eq!(result.descriptors.len(), 1);
//! assert_eq!(result.descriptors[0].triangle_count, 12);
//!
//! let thumbnail = produce(
//!     &result.descriptors[0],
//!     &ExportRequest::Thumbnail { color: [180, 180, 190] },
//!     &PipelineConfig::default(),
//! ).unwrap();
//! assert!(!thumbnail.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod descriptor;
mod error;
mod ingest;

pub use descriptor::{ExportRequest, IngestWarning, Ingestion, ModelDescriptor, ViewTarget};
pub use error::PipelineError;
pub use ingest::{ingest, produce, PipelineConfig};

// Key types from the stage crates, re-exported for callers.
pub use model_normalize::{NormalizeConfig, CANONICAL_SIZE, MAX_DIM_LIMIT, SCALE_CLAMP_MAX, SCALE_CLAMP_MIN};
pub use model_render::{ThumbnailOptions, ViewAngle, ViewOptions, MAX_RENDER_TRIANGLES};
pub use model_types::{NormalizedMesh, RawMesh};
