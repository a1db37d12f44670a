//! Normalized mesh with computed shading normals.

use crate::{Aabb, Triangle};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh after centering, uniform scaling, and normal computation.
///
/// Produced once by the normalizer and treated as read-only afterwards:
/// rendering, thumbnailing, and STL re-export all borrow it immutably.
/// The `normals` vector is parallel to `vertices` (one unit vector per
/// vertex, accumulated from adjacent faces).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NormalizedMesh {
    /// Display name carried over from the source mesh.
    pub name: Option<String>,

    /// Vertex positions, recentered (and usually rescaled).
    pub vertices: Vec<Point3<f64>>,

    /// Unit shading normals, one per vertex.
    pub normals: Vec<Vector3<f64>>,

    /// Triangle faces as indices into the vertex array.
    pub faces: Vec<[u32; 3]>,
}

impl NormalizedMesh {
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

    /// Iterate over all triangles with resolved vertex positions.
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.faces.iter().map(|&[i0, i1, i2]| Triangle {
            v0: self.vertices[i0 as usize],
            v1: self.vertices[i1 as usize],
            v2: self.vertices[i2 as usize],
        })
    }

    /// Compute the axis-aligned bounding box.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn triangle_iteration_resolves_positions() {
        let mesh = NormalizedMesh {
            name: None,
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            faces: vec![[0, 1, 2]],
        };

        let tris: Vec<Triangle> = mesh.triangles().collect();
        assert_eq!(tris.len(), 1);
        assert!((tris[0].v1.x - 1.0).abs() < f64::EPSILON);
        assert!(!mesh.is_empty());
    }
}
