//! Geometry normalization for uploaded models.
//!
//! Every parsed mesh passes through [`normalize`] before it reaches the
//! viewer or any artifact producer. The transform:
//!
//! 1. Recenters the mesh's bounding box at the origin
//! 2. Uniformly rescales its largest dimension to a canonical display
//!    size, with the applied factor clamped to a sane interval
//! 3. Computes smooth per-vertex shading normals
//!
//! Degenerate or absurdly sized input skips step 2 entirely rather than
//! producing an exploded or collapsed mesh; the skip is reported in the
//! [`NormalizeReport`] and logged, never thrown.
//!
//! # Example
//!
//! ```
//! use model_normalize::{normalize, NormalizeConfig};
//! use model_types::{Point3, RawMesh};
//!
//! let mut mesh = RawMesh::new();
//! mesh.push_triangle(
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(2.0, 0.0, 0.0),
//!     Point3::new(0.0, 2.0, 0.0),
//! );
//!
//! let (normalized, report) = normalize(mesh, &NormalizeConfig::default());
//! // maxDim 2 maps to the canonical size 3, so the applied scale is 1.5
//! assert_eq!(report.scale, Some(1.5));
//! let center = normalized.bounds().center();
//! assert!(center.x.abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod config;
mod transform;

pub use config::{
    NormalizeConfig, CANONICAL_SIZE, MAX_DIM_LIMIT, SCALE_CLAMP_MAX, SCALE_CLAMP_MIN,
};
pub use transform::{normalize, NormalizeReport, SkipReason};
