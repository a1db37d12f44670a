//! Derived-artifact production for normalized meshes.
//!
//! Pure-CPU rendering of a [`NormalizedMesh`](model_types::NormalizedMesh)
//! into the artifacts the storefront needs:
//!
//! - [`render_thumbnail`] - fixed oblique view, JPEG-encoded, one call
//!   per cart-add
//! - [`render_view`] - one of three fixed orthographic viewpoints,
//!   PNG-encoded
//! - [`export_view_pdf`] - an orthographic view embedded in a
//!   single-page PDF
//!
//! Each call allocates its own framebuffer and releases it on return
//! (success or failure); there is no shared graphics context, so
//! repeated calls over a long session cannot leak.
//!
//! # Example
//!
//! ```
//! use model_render::{render_thumbnail, ThumbnailOptions};
//! use model_types::{NormalizedMesh, Point3, Vector3};
//!
//! let mesh = NormalizedMesh {
//!     name: None,
//!     vertices: vec![
//!         Point3::new(-1.0, 0.0, 0.0),
//!         Point3::new(1.0, 0.0, 0.0),
//!         Point3::new(0.0, 1.0, 0.0),
//!     ],
//!     normals: vec![Vector3::z(); 3],
//!     faces: vec![[0, 1, 2]],
//! };
//!
//! let jpeg = render_thumbnail(&mesh, &ThumbnailOptions::default()).unwrap();
//! assert!(!jpeg.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod camera;
mod error;
mod pdf;
mod raster;

pub use camera::{Camera, ViewAngle};
pub use error::{RenderError, RenderResult};
pub use raster::Framebuffer;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use model_types::NormalizedMesh;
use tracing::debug;

/// Largest triangle count the producers are guaranteed to handle.
///
/// Not enforced as a limit; meshes up to this size must render to a
/// non-empty encoded image in bounded time, and the test suite covers
/// the ceiling itself.
pub const MAX_RENDER_TRIANGLES: usize = 50_000;

/// Parameters for thumbnail rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailOptions {
    /// Canvas edge length in pixels (thumbnails are square).
    pub size: u32,
    /// Uniform surface color.
    pub color: [u8; 3],
    /// Background color.
    pub background: [u8; 3],
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            size: 256,
            color: [170, 170, 180],
            background: [245, 245, 245],
            quality: 85,
        }
    }
}

/// Parameters for orthographic-view rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    /// Canvas edge length in pixels (views are square).
    pub size: u32,
    /// Uniform surface color.
    pub color: [u8; 3],
    /// Background color.
    pub background: [u8; 3],
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            size: 512,
            color: [170, 170, 180],
            background: [255, 255, 255],
        }
    }
}

/// Render the fixed oblique thumbnail and encode it as JPEG.
///
/// # Errors
///
/// Returns [`RenderError::EmptyMesh`] if the mesh has no triangles, or
/// an encoding error from the JPEG encoder.
pub fn render_thumbnail(mesh: &NormalizedMesh, options: &ThumbnailOptions) -> RenderResult<Vec<u8>> {
    if mesh.is_empty() {
        return Err(RenderError::EmptyMesh);
    }

    let camera = Camera::oblique(mesh);
    let mut fb = Framebuffer::new(options.size, options.size, options.background);
    raster::draw_mesh(&mut fb, mesh, &camera, options.color);

    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, options.quality).encode(
        &fb.pixels,
        fb.width,
        fb.height,
        ExtendedColorType::Rgb8,
    )?;

    debug!(
        triangles = mesh.triangle_count(),
        bytes = out.len(),
        "thumbnail rendered"
    );
    Ok(out)
}

/// Render one orthographic viewpoint and encode it as PNG.
///
/// # Errors
///
/// Returns [`RenderError::EmptyMesh`] if the mesh has no triangles, or
/// an encoding error from the PNG encoder.
pub fn render_view(
    mesh: &NormalizedMesh,
    angle: ViewAngle,
    options: &ViewOptions,
) -> RenderResult<Vec<u8>> {
    let fb = render_view_raster(mesh, angle, options)?;

    let mut out = Vec::new();
    PngEncoder::new(&mut out).write_image(
        &fb.pixels,
        fb.width,
        fb.height,
        ExtendedColorType::Rgb8,
    )?;
    Ok(out)
}

/// Render one orthographic viewpoint and embed it in a single-page PDF.
///
/// The raster is JPEG-encoded and placed centered, aspect-fit, inside
/// the page margin.
///
/// # Errors
///
/// Returns [`RenderError::EmptyMesh`] if the mesh has no triangles, or
/// an encoding error from the JPEG encoder.
pub fn export_view_pdf(
    mesh: &NormalizedMesh,
    angle: ViewAngle,
    options: &ViewOptions,
) -> RenderResult<Vec<u8>> {
    let fb = render_view_raster(mesh, angle, options)?;

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, 90).encode(
        &fb.pixels,
        fb.width,
        fb.height,
        ExtendedColorType::Rgb8,
    )?;

    Ok(pdf::embed_jpeg(&jpeg, fb.width, fb.height))
}

fn render_view_raster(
    mesh: &NormalizedMesh,
    angle: ViewAngle,
    options: &ViewOptions,
) -> RenderResult<Framebuffer> {
    if mesh.is_empty() {
        return Err(RenderError::EmptyMesh);
    }

    let camera = Camera::orthographic(mesh, angle);
    let mut fb = Framebuffer::new(options.size, options.size, options.background);
    raster::draw_mesh(&mut fb, mesh, &camera, options.color);
    Ok(fb)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use model_normalize::{normalize, NormalizeConfig};
    use model_types::{placeholder_cube, Point3, RawMesh, Vector3};

    fn normalized_cube() -> NormalizedMesh {
        let (mesh, _) = normalize(placeholder_cube(), &NormalizeConfig::default());
        mesh
    }

    fn empty_mesh() -> NormalizedMesh {
        NormalizedMesh {
            name: None,
            vertices: Vec::new(),
            normals: Vec::new(),
            faces: Vec::new(),
        }
    }

    #[test]
    fn thumbnail_is_nonempty_jpeg() {
        let jpeg = render_thumbnail(&normalized_cube(), &ThumbnailOptions::default()).unwrap();
        assert!(jpeg.len() > 2);
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]); // JPEG SOI marker
    }

    #[test]
    fn view_is_nonempty_png() {
        for angle in [ViewAngle::Front, ViewAngle::Top, ViewAngle::Side] {
            let png = render_view(&normalized_cube(), angle, &ViewOptions::default()).unwrap();
            assert_eq!(&png[1..4], b"PNG");
        }
    }

    #[test]
    fn pdf_export_wraps_a_jpeg() {
        let pdf =
            export_view_pdf(&normalized_cube(), ViewAngle::Front, &ViewOptions::default()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        assert!(pdf.windows(2).any(|w| w == [0xFF, 0xD8]));
    }

    #[test]
    fn empty_mesh_is_rejected_not_panicked() {
        assert!(matches!(
            render_thumbnail(&empty_mesh(), &ThumbnailOptions::default()),
            Err(RenderError::EmptyMesh)
        ));
        assert!(matches!(
            render_view(&empty_mesh(), ViewAngle::Top, &ViewOptions::default()),
            Err(RenderError::EmptyMesh)
        ));
    }

    #[test]
    fn single_triangle_renders() {
        // The producers must succeed for any mesh with >= 1 triangle.
        let mut raw = RawMesh::new();
        raw.push_triangle(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        let (mesh, _) = normalize(raw, &NormalizeConfig::default());

        assert!(render_thumbnail(&mesh, &ThumbnailOptions::default()).is_ok());
        assert!(render_view(&mesh, ViewAngle::Side, &ViewOptions::default()).is_ok());
    }

    #[test]
    fn producers_handle_the_triangle_ceiling() {
        // A dense tilted grid, exactly at the guaranteed ceiling.
        let cols = 250;
        let rows = MAX_RENDER_TRIANGLES / cols;
        let mut raw = RawMesh::with_capacity(MAX_RENDER_TRIANGLES * 3, MAX_RENDER_TRIANGLES);
        for row in 0..rows {
            for col in 0..cols {
                let x = col as f64;
                let y = row as f64;
                raw.push_triangle(
                    Point3::new(x, y, 0.0),
                    Point3::new(x + 0.8, y, 0.0),
                    Point3::new(x, y + 0.8, (x + y) * 0.01),
                );
            }
        }
        assert_eq!(raw.triangle_count(), MAX_RENDER_TRIANGLES);

        let (mesh, _) = normalize(raw, &NormalizeConfig::default());
        let jpeg = render_thumbnail(&mesh, &ThumbnailOptions::default()).unwrap();
        assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);
        let png = render_view(&mesh, ViewAngle::Top, &ViewOptions::default()).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn thumbnail_reflects_surface_color() {
        let mesh = normalized_cube();
        let red = render_thumbnail(
            &mesh,
            &ThumbnailOptions {
                color: [255, 0, 0],
                ..ThumbnailOptions::default()
            },
        )
        .unwrap();
        let blue = render_thumbnail(
            &mesh,
            &ThumbnailOptions {
                color: [0, 0, 255],
                ..ThumbnailOptions::default()
            },
        )
        .unwrap();
        assert_ne!(red, blue);
    }

    #[test]
    fn degenerate_normals_do_not_crash_rendering() {
        let mesh = NormalizedMesh {
            name: None,
            vertices: vec![
                Point3::new(-1.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(), -Vector3::z(), Vector3::z()],
            faces: vec![[0, 1, 2]],
        };
        assert!(render_thumbnail(&mesh, &ThumbnailOptions::default()).is_ok());
    }
}
