//! Raw triangle mesh as decoded from an uploaded file.

use crate::{Aabb, Triangle};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle mesh as produced by a parser, before normalization.
///
/// Stores vertex positions and faces separately, with faces referencing
/// vertices by index. STL parsing pushes three fresh vertices per face
/// (a triangle soup); 3MF parsing preserves the file's shared index
/// buffer. Either way, consumers only see triangles.
///
/// A `RawMesh` is immutable once produced: the normalizer consumes it
/// by value and returns a new [`NormalizedMesh`](crate::NormalizedMesh)
/// rather than mutating in place.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from
/// outside; normals point outward by the right-hand rule.
///
/// # Example
///
/// ```
/// use model_types::{RawMesh, Point3};
///
/// let mut mesh = RawMesh::new();
/// mesh.vertices.push(Point3::new(0.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(1.0, 0.0, 0.0));
/// mesh.vertices.push(Point3::new(0.0, 1.0, 0.0));
/// mesh.faces.push([0, 1, 2]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawMesh {
    /// Display name declared by the source file, if any.
    pub name: Option<String>,

    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl RawMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            name: None,
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            name: None,
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<[u32; 3]>) -> Self {
        Self {
            name: None,
            vertices,
            faces,
        }
    }

    /// Set the display name, builder-style.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Get the number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no renderable content.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Append a triangle as three fresh (unshared) vertices.
    ///
    /// This is the soup-building path used by the STL parser.
    ///
    /// # Note
    ///
    /// Indices are `u32`; meshes beyond 4B vertices are unsupported.
    #[allow(clippy::cast_possible_truncation)]
    // Truncation: mesh indices are u32, vertex counts > 4B are unsupported
    pub fn push_triangle(&mut self, v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) {
        let base = self.vertices.len() as u32;
        self.vertices.push(v0);
        self.vertices.push(v1);
        self.vertices.push(v2);
        self.faces.push([base, base + 1, base + 2]);
    }

    /// Iterate over all triangles with resolved vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize],
            v1: self.vertices[i1 as usize],
            v2: self.vertices[i2 as usize],
        })
    }

    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

/// The placeholder mesh substituted when parsing fails.
///
/// A unit cube centered at the origin, 12 triangles with outward-facing
/// CCW winding. Uploads that decode to nothing fall back to this so the
/// rest of the flow (viewer, thumbnail, cart) still has geometry to
/// work with; the degradation is reported separately.
///
/// # Example
///
/// ```
/// use model_types::placeholder_cube;
///
/// let cube = placeholder_cube();
/// assert_eq!(cube.vertex_count(), 8);
/// assert_eq!(cube.triangle_count(), 12);
/// ```
#[must_use]
pub fn placeholder_cube() -> RawMesh {
    let mut mesh = RawMesh::with_capacity(8, 12);

    // 8 corners, centered at the origin
    mesh.vertices.push(Point3::new(-0.5, -0.5, -0.5)); // 0
    mesh.vertices.push(Point3::new(0.5, -0.5, -0.5)); // 1
    mesh.vertices.push(Point3::new(0.5, 0.5, -0.5)); // 2
    mesh.vertices.push(Point3::new(-0.5, 0.5, -0.5)); // 3
    mesh.vertices.push(Point3::new(-0.5, -0.5, 0.5)); // 4
    mesh.vertices.push(Point3::new(0.5, -0.5, 0.5)); // 5
    mesh.vertices.push(Point3::new(0.5, 0.5, 0.5)); // 6
    mesh.vertices.push(Point3::new(-0.5, 0.5, 0.5)); // 7

    // 12 triangles (2 per face), CCW winding when viewed from outside

    // Bottom face (z = -0.5) - normal points -Z
    mesh.faces.push([0, 2, 1]);
    mesh.faces.push([0, 3, 2]);

    // Top face (z = 0.5) - normal points +Z
    mesh.faces.push([4, 5, 6]);
    mesh.faces.push([4, 6, 7]);

    // Front face (y = -0.5) - normal points -Y
    mesh.faces.push([0, 1, 5]);
    mesh.faces.push([0, 5, 4]);

    // Back face (y = 0.5) - normal points +Y
    mesh.faces.push([3, 7, 6]);
    mesh.faces.push([3, 6, 2]);

    // Left face (x = -0.5) - normal points -X
    mesh.faces.push([0, 4, 7]);
    mesh.faces.push([0, 7, 3]);

    // Right face (x = 0.5) - normal points +X
    mesh.faces.push([1, 2, 6]);
    mesh.faces.push([1, 6, 5]);

    mesh
}
