//! Binary STL decoding and re-export.
//!
//! # Binary Format
//!
//! ```text
//! UINT8[80]    – Header (ignored, often contains file info)
//! UINT32       – Declared number of triangles (little-endian)
//! foreach triangle
//!     REAL32[3] – Normal vector (often not accurate)
//!     REAL32[3] – Vertex 1
//!     REAL32[3] – Vertex 2
//!     REAL32[3] – Vertex 3
//!     UINT16    – Attribute byte count (usually 0)
//! end
//! ```
//!
//! Real-world uploads frequently declare a triangle count that does not
//! match the bytes actually present, so the decoder derives the record
//! count from the remaining buffer length and only logs the mismatch.

use model_types::{NormalizedMesh, Point3, RawMesh};
use tracing::warn;

use crate::error::{ParseError, ParseResult};

/// STL binary header size in bytes.
pub const STL_HEADER_SIZE: usize = 80;

/// Size of one triangle record in binary STL (normal + 3 vertices + attribute).
pub const STL_TRIANGLE_SIZE: usize = 50;

/// Parse a binary STL buffer into a single raw mesh.
///
/// The number of triangles read is derived from the actual buffer
/// length, not the declared count field: as many complete 50-byte
/// records as the buffer contains are decoded. A declared/actual
/// mismatch is logged, not fatal.
///
/// # Errors
///
/// Returns an error if the buffer is shorter than the 84-byte preamble
/// or contains no complete triangle record.
///
/// # Example
///
/// ```
/// use model_io::parse_stl;
///
/// // 84-byte preamble alone carries no triangles
/// assert!(parse_stl(&[0u8; 84]).is_err());
/// ```
pub fn parse_stl(bytes: &[u8]) -> ParseResult<RawMesh> {
    if bytes.len() < STL_HEADER_SIZE + 4 {
        return Err(ParseError::TooShort {
            format: "STL",
            len: bytes.len(),
        });
    }

    let declared = u32::from_le_bytes([
        bytes[STL_HEADER_SIZE],
        bytes[STL_HEADER_SIZE + 1],
        bytes[STL_HEADER_SIZE + 2],
        bytes[STL_HEADER_SIZE + 3],
    ]);

    // Count complete records actually present after the preamble.
    let payload = &bytes[STL_HEADER_SIZE + 4..];
    let available = payload.len() / STL_TRIANGLE_SIZE;

    if available == 0 {
        return Err(ParseError::NoTriangles { format: "STL" });
    }

    if available as u64 != u64::from(declared) {
        warn!(
            declared,
            available, "STL triangle count mismatch, trusting buffer length"
        );
    }

    let mut mesh = RawMesh::with_capacity(available * 3, available);
    for record in payload.chunks_exact(STL_TRIANGLE_SIZE) {
        // Skip the stored normal (12 bytes); shading normals are
        // recomputed during normalization anyway.
        let v0 = read_vertex(&record[12..24]);
        let v1 = read_vertex(&record[24..36]);
        let v2 = read_vertex(&record[36..48]);
        mesh.push_triangle(v0, v1, v2);
    }

    Ok(mesh)
}

/// Read a vertex from 12 bytes (3 f32s, little-endian).
fn read_vertex(buf: &[u8]) -> Point3<f64> {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    Point3::new(f64::from(x), f64::from(y), f64::from(z))
}

/// Serialize a normalized mesh back to a binary STL buffer.
///
/// `scale_percent` is a per-axis percentage (100.0 means unchanged)
/// applied fresh to the normalized positions; it does not compose with
/// the uniform scale the normalizer already applied. Face normals are
/// recomputed from the scaled geometry per record; the attribute bytes
/// are zero.
///
/// # Example
///
/// ```
/// use model_io::{export_stl, parse_stl, STL_HEADER_SIZE, STL_TRIANGLE_SIZE};
/// # use model_types::{NormalizedMesh, Point3, Vector3};
/// # let mesh = NormalizedMesh {
/// #     name: None,
/// #     vertices: vec![
/// #         Point3::new(0.0, 0.0, 0.0),
/// #         Point3::new(1.0, 0.0, 0.0),
/// #         Point3::new(0.0, 1.0, 0.0),
/// #     ],
/// #     normals: vec![Vector3::z(); 3],
/// #     faces: vec![[0, 1, 2]],
/// # };
///
/// let buffer = export_stl(&mesh, [100.0, 100.0, 100.0]);
/// assert_eq!(buffer.len(), STL_HEADER_SIZE + 4 + STL_TRIANGLE_SIZE);
/// assert_eq!(parse_stl(&buffer).unwrap().triangle_count(), 1);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
// Truncation: f64->f32 at the wire boundary and u32 face counts are the format
pub fn export_stl(mesh: &NormalizedMesh, scale_percent: [f64; 3]) -> Vec<u8> {
    let scale = [
        scale_percent[0] / 100.0,
        scale_percent[1] / 100.0,
        scale_percent[2] / 100.0,
    ];

    let mut out =
        Vec::with_capacity(STL_HEADER_SIZE + 4 + mesh.faces.len() * STL_TRIANGLE_SIZE);

    // 80-byte header, padded with spaces
    let mut header = [b' '; STL_HEADER_SIZE];
    let text = match mesh.name.as_deref() {
        Some(name) => format!("Binary STL export - {name}"),
        None => "Binary STL export".to_string(),
    };
    let n = text.len().min(STL_HEADER_SIZE);
    header[..n].copy_from_slice(&text.as_bytes()[..n]);
    out.extend_from_slice(&header);

    out.extend_from_slice(&(mesh.faces.len() as u32).to_le_bytes());

    for &[i0, i1, i2] in &mesh.faces {
        let v0 = scaled(mesh.vertices[i0 as usize], scale);
        let v1 = scaled(mesh.vertices[i1 as usize], scale);
        let v2 = scaled(mesh.vertices[i2 as usize], scale);

        let e1 = v1 - v0;
        let e2 = v2 - v0;
        let normal = e1.cross(&e2);
        let len = normal.norm();
        let (nx, ny, nz) = if len > f64::EPSILON {
            (
                (normal.x / len) as f32,
                (normal.y / len) as f32,
                (normal.z / len) as f32,
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        out.extend_from_slice(&nx.to_le_bytes());
        out.extend_from_slice(&ny.to_le_bytes());
        out.extend_from_slice(&nz.to_le_bytes());

        write_vertex(&mut out, &v0);
        write_vertex(&mut out, &v1);
        write_vertex(&mut out, &v2);

        out.extend_from_slice(&0u16.to_le_bytes());
    }

    out
}

fn scaled(p: Point3<f64>, scale: [f64; 3]) -> Point3<f64> {
    Point3::new(p.x * scale[0], p.y * scale[1], p.z * scale[2])
}

#[allow(clippy::cast_possible_truncation)]
// Truncation: f64 to f32 is intentional for the STL wire format
fn write_vertex(out: &mut Vec<u8>, p: &Point3<f64>) {
    out.extend_from_slice(&(p.x as f32).to_le_bytes());
    out.extend_from_slice(&(p.y as f32).to_le_bytes());
    out.extend_from_slice(&(p.z as f32).to_le_bytes());
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use model_types::Vector3;

    /// Build a binary STL buffer with the given declared count and
    /// actual triangle records.
    fn stl_buffer(declared: u32, triangles: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut buf = vec![0u8; STL_HEADER_SIZE];
        buf.extend_from_slice(&declared.to_le_bytes());
        for tri in triangles {
            buf.extend_from_slice(&[0u8; 12]); // stored normal, ignored
            for v in tri {
                for c in v {
                    buf.extend_from_slice(&c.to_le_bytes());
                }
            }
            buf.extend_from_slice(&0u16.to_le_bytes());
        }
        buf
    }

    const TRI: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]];

    #[test]
    fn parse_single_triangle() {
        let buf = stl_buffer(1, &[TRI]);
        let mesh = parse_stl(&buf).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.vertices[1].x, 2.0);
    }

    #[test]
    fn declared_count_is_not_trusted() {
        // Declared 1000, actual 2: the buffer wins.
        let buf = stl_buffer(1000, &[TRI, TRI]);
        let mesh = parse_stl(&buf).unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        // Declared 0, actual 1: the buffer still wins.
        let buf = stl_buffer(0, &[TRI]);
        let mesh = parse_stl(&buf).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn trailing_partial_record_is_dropped() {
        let mut buf = stl_buffer(2, &[TRI]);
        buf.extend_from_slice(&[0u8; 30]); // 30 of the next 50 bytes
        let mesh = parse_stl(&buf).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn too_short_buffer_is_an_error() {
        assert!(matches!(
            parse_stl(&[0u8; 60]),
            Err(ParseError::TooShort { format: "STL", len: 60 })
        ));
    }

    #[test]
    fn preamble_without_records_is_an_error() {
        let buf = stl_buffer(5, &[]);
        assert!(matches!(
            parse_stl(&buf),
            Err(ParseError::NoTriangles { format: "STL" })
        ));
    }

    fn unit_triangle_mesh() -> NormalizedMesh {
        NormalizedMesh {
            name: Some("probe".to_string()),
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            normals: vec![Vector3::z(); 3],
            faces: vec![[0, 1, 2]],
        }
    }

    #[test]
    fn export_roundtrip_preserves_count() {
        let mesh = unit_triangle_mesh();
        let buf = export_stl(&mesh, [100.0, 100.0, 100.0]);
        let reparsed = parse_stl(&buf).unwrap();
        assert_eq!(reparsed.triangle_count(), mesh.triangle_count());
    }

    #[test]
    fn export_applies_per_axis_percent_scale() {
        let mesh = unit_triangle_mesh();
        let buf = export_stl(&mesh, [200.0, 50.0, 100.0]);
        let reparsed = parse_stl(&buf).unwrap();
        let bounds = reparsed.bounds();
        assert!((bounds.max.x - 2.0).abs() < 1e-6);
        assert!((bounds.max.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn export_header_carries_mesh_name() {
        let mesh = unit_triangle_mesh();
        let buf = export_stl(&mesh, [100.0, 100.0, 100.0]);
        let header = String::from_utf8_lossy(&buf[..STL_HEADER_SIZE]);
        assert!(header.contains("probe"));
    }

    #[test]
    fn export_recomputes_record_normal() {
        let mesh = unit_triangle_mesh();
        let buf = export_stl(&mesh, [100.0, 100.0, 100.0]);
        let nz = f32::from_le_bytes([
            buf[STL_HEADER_SIZE + 4 + 8],
            buf[STL_HEADER_SIZE + 4 + 9],
            buf[STL_HEADER_SIZE + 4 + 10],
            buf[STL_HEADER_SIZE + 4 + 11],
        ]);
        assert!((nz - 1.0).abs() < 1e-6);
    }
}
