//! Core geometry types for the model ingestion pipeline.
//!
//! This crate provides the foundational types shared by the parsers,
//! the normalizer, and the artifact producers:
//!
//! - [`RawMesh`] - A triangle mesh as decoded from an uploaded file
//! - [`NormalizedMesh`] - A mesh after centering, scaling, and normal
//!   computation
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`; the
//! STL wire format uses `f32`, converted only at the I/O boundary.
//!
//! # Coordinate System
//!
//! Right-handed, with counter-clockwise (CCW) face winding when viewed
//! from outside. Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use model_types::{RawMesh, Point3};
//!
//! let mut mesh = RawMesh::new();
//! mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
//! mesh.vertices.push(Point3::new(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.triangle_count(), 1);
//! assert!(!mesh.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod normalized;
mod triangle;

pub use bounds::Aabb;
pub use mesh::{placeholder_cube, RawMesh};
pub use normalized::NormalizedMesh;
pub use triangle::Triangle;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
