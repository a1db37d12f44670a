//! Camera setup for thumbnail and orthographic-view rendering.

use model_types::{Aabb, NormalizedMesh, Point3, Vector3};
use nalgebra::Matrix4;

/// Eye distance as a multiple of the mesh's largest dimension.
const DISTANCE_FACTOR: f64 = 2.0;

/// Half-extent of the orthographic frustum as a multiple of the largest
/// dimension. 0.75 leaves a margin around the silhouette.
const FRUSTUM_FACTOR: f64 = 0.75;

/// The three fixed orthographic viewpoints offered by the 2D exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewAngle {
    /// Looking along +Y (at the XZ silhouette).
    Front,
    /// Looking along -Z (at the XY silhouette).
    Top,
    /// Looking along -X (at the YZ silhouette).
    Side,
}

/// An orthographic camera: a combined view-projection matrix plus the
/// world-space light and view directions used for shading.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Combined orthographic view-projection matrix.
    pub view_proj: Matrix4<f64>,
    /// Unit direction from the scene toward the eye.
    pub view_dir: Vector3<f64>,
}

impl Camera {
    /// The fixed oblique camera used for thumbnails.
    ///
    /// Eye direction is diagonal-above-front, so all three extents of
    /// the model read in a single image.
    #[must_use]
    pub fn oblique(mesh: &NormalizedMesh) -> Self {
        let bounds = mesh.bounds();
        let dir = Vector3::new(1.0, -1.0, 0.8).normalize();
        Self::from_direction(&bounds, dir, Vector3::z())
    }

    /// One of the three fixed orthographic viewpoints.
    #[must_use]
    pub fn orthographic(mesh: &NormalizedMesh, angle: ViewAngle) -> Self {
        let bounds = mesh.bounds();
        let (dir, up) = match angle {
            ViewAngle::Front => (Vector3::new(0.0, -1.0, 0.0), Vector3::z()),
            ViewAngle::Top => (Vector3::new(0.0, 0.0, 1.0), Vector3::y()),
            ViewAngle::Side => (Vector3::new(1.0, 0.0, 0.0), Vector3::z()),
        };
        Self::from_direction(&bounds, dir, up)
    }

    fn from_direction(bounds: &Aabb, dir: Vector3<f64>, up: Vector3<f64>) -> Self {
        let target = bounds.center();
        // Guard against a zero-extent box so the frustum never collapses.
        let extent = bounds.max_dim().max(1.0);
        let eye = target + dir * (extent * DISTANCE_FACTOR);

        let view = Matrix4::look_at_rh(&eye, &target, &up);
        let half = extent * FRUSTUM_FACTOR;
        let depth = extent * DISTANCE_FACTOR * 2.0;
        let proj = Matrix4::new_orthographic(-half, half, -half, half, 0.01, depth);

        Self {
            view_proj: proj * view,
            view_dir: dir,
        }
    }

    /// Project a world-space point to normalized device coordinates.
    #[must_use]
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        self.view_proj.transform_point(p)
    }
}
