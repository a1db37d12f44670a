//! The center/scale/normal-compute transform.

use model_types::{Aabb, NormalizedMesh, Point3, RawMesh, Vector3};
use tracing::{debug, warn};

use crate::NormalizeConfig;

/// Why scaling was skipped for a mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The bounding box had zero (or negative) largest extent.
    ZeroExtent,
    /// The largest extent was at or beyond the configured limit.
    OversizedInput,
}

/// What the normalizer did to a mesh.
///
/// `scale` is `Some(applied)` when scaling ran (after clamping) and
/// `None` when the degenerate-input branch skipped it; the skip reason
/// is then in `skipped`. Callers surface skips as warnings, not errors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeReport {
    /// Translation applied to recenter the mesh (negated box center).
    pub center_offset: Vector3<f64>,
    /// Largest bounding-box dimension after recentering, in input units.
    pub max_dim: f64,
    /// The uniform scale factor actually applied, if any.
    pub scale: Option<f64>,
    /// Set when the scale step was skipped.
    pub skipped: Option<SkipReason>,
}

/// Normalize a raw mesh for display.
///
/// Pure transform: consumes the `RawMesh` and returns a new
/// [`NormalizedMesh`] plus a report of what was applied. Normalizing
/// the same input twice yields the same output; nothing is mutated in
/// place, so re-processing on model switch cannot alias.
///
/// Steps, in order:
///
/// 1. Bounding box over all vertices
/// 2. Translate by the negated box center
/// 3. If the largest post-translation extent is zero or at/beyond
///    `config.max_dim_limit`, skip scaling and warn; otherwise apply
///    `canonical_size / max_dim` clamped to `config.scale_clamp`
/// 4. Recompute per-vertex normals from the (possibly rescaled)
///    triangle geometry
///
/// Never fails for well-formed input. An empty mesh normalizes to an
/// empty mesh with a `ZeroExtent` skip.
#[must_use]
pub fn normalize(mesh: RawMesh, config: &NormalizeConfig) -> (NormalizedMesh, NormalizeReport) {
    let RawMesh {
        name,
        mut vertices,
        faces,
    } = mesh;

    let bounds = Aabb::from_points(vertices.iter());
    let center_offset = if bounds.is_empty() {
        Vector3::zeros()
    } else {
        -bounds.center().coords
    };

    for v in &mut vertices {
        *v += center_offset;
    }

    // Re-derive the extent after recentering; translation does not
    // change it, but the recomputation keeps the skip decision tied to
    // the geometry actually emitted.
    let max_dim = Aabb::from_points(vertices.iter()).max_dim();

    let (scale, skipped) = if max_dim <= 0.0 {
        warn!(max_dim, "degenerate geometry, skipping scale step");
        (None, Some(SkipReason::ZeroExtent))
    } else if max_dim >= config.max_dim_limit {
        warn!(
            max_dim,
            limit = config.max_dim_limit,
            "input exceeds size limit, skipping scale step"
        );
        (None, Some(SkipReason::OversizedInput))
    } else {
        let raw_scale = config.canonical_size / max_dim;
        let applied = raw_scale.clamp(config.scale_clamp.0, config.scale_clamp.1);
        if (applied - raw_scale).abs() > f64::EPSILON {
            debug!(raw_scale, applied, "scale factor clamped");
        }
        for v in &mut vertices {
            v.coords *= applied;
        }
        (Some(applied), None)
    };

    let normals = compute_vertex_normals(&vertices, &faces);

    let normalized = NormalizedMesh {
        name,
        vertices,
        normals,
        faces,
    };
    let report = NormalizeReport {
        center_offset,
        max_dim,
        scale,
        skipped,
    };

    (normalized, report)
}

/// Compute smooth per-vertex normals from face geometry.
///
/// Face cross products are accumulated unnormalized at each adjacent
/// vertex (area-weighted average) and re-normalized at the end.
/// Zero-area faces contribute nothing, so a degenerate triangle cannot
/// poison its neighbors' normals; vertices with no usable contribution
/// fall back to +Z.
fn compute_vertex_normals(
    vertices: &[Point3<f64>],
    faces: &[[u32; 3]],
) -> Vec<Vector3<f64>> {
    let mut normals = vec![Vector3::zeros(); vertices.len()];

    for face in faces {
        let v0 = &vertices[face[0] as usize];
        let v1 = &vertices[face[1] as usize];
        let v2 = &vertices[face[2] as usize];

        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let face_normal = e1.cross(&e2);

        if face_normal.norm() <= 1e-12 {
            continue;
        }

        for &idx in face {
            normals[idx as usize] += face_normal;
        }
    }

    for normal in &mut normals {
        let len = normal.norm();
        if len > 1e-10 {
            *normal /= len;
        } else {
            *normal = Vector3::z();
        }
    }

    normals
}
