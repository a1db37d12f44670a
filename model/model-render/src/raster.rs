//! Z-buffered triangle rasterization with smooth shading.

use model_types::{NormalizedMesh, Point3, Vector3};

use crate::camera::Camera;

/// Ambient term of the fixed lighting rig.
const AMBIENT: f64 = 0.35;

/// Diffuse term of the fixed lighting rig.
const DIFFUSE: f64 = 0.65;

/// An owned RGB raster target with a depth buffer.
///
/// One framebuffer is allocated per producer call and dropped when the
/// call returns, on every path; nothing is shared between invocations.
#[derive(Debug)]
pub struct Framebuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGB8 pixel data (`3 * width * height` bytes).
    pub pixels: Vec<u8>,
    depth: Vec<f64>,
}

impl Framebuffer {
    /// Create a framebuffer cleared to the given background color.
    #[must_use]
    pub fn new(width: u32, height: u32, background: [u8; 3]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&background);
        }
        Self {
            width,
            height,
            pixels,
            depth: vec![f64::INFINITY; count],
        }
    }

    fn put(&mut self, x: u32, y: u32, z: f64, color: [u8; 3]) {
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        if z < self.depth[idx] {
            self.depth[idx] = z;
            let base = idx * 3;
            self.pixels[base..base + 3].copy_from_slice(&color);
        }
    }
}

/// A vertex after projection: pixel coordinates, depth, and the
/// world-space shading normal carried through for interpolation.
#[derive(Debug, Clone, Copy)]
struct Projected {
    x: f64,
    y: f64,
    z: f64,
    normal: Vector3<f64>,
}

/// Render a mesh into the framebuffer with flat ambient + directional
/// lighting over the given base color.
///
/// Shading is double-sided: the interpolated normal is flipped toward
/// the viewer so inconsistent winding in uploaded files cannot render
/// as black patches.
pub fn draw_mesh(fb: &mut Framebuffer, mesh: &NormalizedMesh, camera: &Camera, color: [u8; 3]) {
    // Light comes over the viewer's shoulder.
    let light_dir = (camera.view_dir + Vector3::z() * 0.5).normalize();

    let projected: Vec<Projected> = mesh
        .vertices
        .iter()
        .zip(mesh.normals.iter())
        .map(|(v, n)| to_screen(fb, camera, v, *n))
        .collect();

    for &[i0, i1, i2] in &mesh.faces {
        fill_triangle(
            fb,
            &projected[i0 as usize],
            &projected[i1 as usize],
            &projected[i2 as usize],
            light_dir,
            camera.view_dir,
            color,
        );
    }
}

fn to_screen(fb: &Framebuffer, camera: &Camera, v: &Point3<f64>, normal: Vector3<f64>) -> Projected {
    let ndc = camera.project(v);
    Projected {
        x: (ndc.x + 1.0) * 0.5 * f64::from(fb.width),
        y: (1.0 - ndc.y) * 0.5 * f64::from(fb.height),
        z: ndc.z,
        normal,
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
// Truncation/sign: pixel coordinates are clamped to the framebuffer before casting
fn fill_triangle(
    fb: &mut Framebuffer,
    a: &Projected,
    b: &Projected,
    c: &Projected,
    light_dir: Vector3<f64>,
    view_dir: Vector3<f64>,
    color: [u8; 3],
) {
    // Signed doubled area; zero means the triangle projects to a line.
    let area = edge(a, b, c.x, c.y);
    if area.abs() < 1e-12 {
        return;
    }

    let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as u32;
    let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as u32;
    let max_x = (a.x.max(b.x).max(c.x).ceil() as i64)
        .clamp(0, i64::from(fb.width) - 1) as u32;
    let max_y = (a.y.max(b.y).max(c.y).ceil() as i64)
        .clamp(0, i64::from(fb.height) - 1) as u32;

    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let cx = f64::from(px) + 0.5;
            let cy = f64::from(py) + 0.5;

            // Barycentric weights via edge functions; one sign test
            // covers both windings.
            let w0 = edge(b, c, cx, cy) / area;
            let w1 = edge(c, a, cx, cy) / area;
            let w2 = edge(a, b, cx, cy) / area;
            if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                continue;
            }

            let z = w0 * a.z + w1 * b.z + w2 * c.z;
            let blended = a.normal * w0 + b.normal * w1 + c.normal * w2;
            // Opposing vertex normals can cancel; fall back to the
            // view direction rather than normalizing a zero vector.
            let len = blended.norm();
            let normal = if len > 1e-12 { blended / len } else { view_dir };

            // Face the viewer regardless of winding.
            let n = if normal.dot(&view_dir) < 0.0 {
                -normal
            } else {
                normal
            };

            let intensity = DIFFUSE.mul_add(n.dot(&light_dir).max(0.0), AMBIENT).min(1.0);
            let shaded = [
                (f64::from(color[0]) * intensity) as u8,
                (f64::from(color[1]) * intensity) as u8,
                (f64::from(color[2]) * intensity) as u8,
            ];
            fb.put(px, py, z, shaded);
        }
    }
}

/// Edge function: signed doubled area of the triangle (a, b, p).
fn edge(a: &Projected, b: &Projected, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}
