//! 3MF (3D Manufacturing Format) decoding.
//!
//! A 3MF upload is a ZIP archive containing XML model parts. The main
//! part is conventionally `3D/3dmodel.model`; some writers place it
//! elsewhere, so any `*.model` member is accepted as a fallback.
//!
//! # Reading order
//!
//! Real-world files are inconsistent about where geometry lives, so the
//! decoder applies exactly two strategies, in order:
//!
//! 1. One [`RawMesh`] per `<object>` element that contains a `<mesh>`,
//!    in document order. The object's `name` attribute is preserved;
//!    unnamed objects get `"{file stem} - Model {n}"` (1-based).
//! 2. If that yields nothing but the document carries bare `<mesh>`
//!    content, the whole document is traversed as a single mesh.
//!
//! # Limitations
//!
//! - Materials, colors, and textures are ignored
//! - Build-item transformations are ignored

use std::io::{Cursor, Read};

use model_types::{Point3, RawMesh};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{ParseError, ParseResult};

/// Parse a 3MF buffer into one raw mesh per object.
///
/// `file_name` is used only to synthesize display names for unnamed
/// objects.
///
/// # Errors
///
/// Returns an error if:
/// - The buffer is not a readable ZIP archive
/// - No model XML part is present
/// - The model XML decodes to zero triangles under both traversal
///   strategies
pub fn parse_3mf(bytes: &[u8], file_name: &str) -> ParseResult<Vec<RawMesh>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| ParseError::invalid_content(format!("invalid ZIP archive: {e}")))?;

    let content = read_model_part(&mut archive)?;
    let stem = file_stem(file_name);

    let mut meshes = parse_objects(&content, stem)?;

    // Fallback traversal: some writers emit mesh payloads outside any
    // <object> wrapper.
    if meshes.is_empty() {
        if let Some(mesh) = parse_document_mesh(&content, stem)? {
            meshes.push(mesh);
        }
    }

    if meshes.is_empty() {
        return Err(ParseError::NoTriangles { format: "3MF" });
    }

    Ok(meshes)
}

/// Strip the extension from an upload file name.
fn file_stem(file_name: &str) -> &str {
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

/// Locate and read the model XML part from the archive.
fn read_model_part<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>) -> ParseResult<String> {
    // Try standard paths first
    let model_paths = ["3D/3dmodel.model", "3d/3dmodel.model", "3D/3DModel.model"];

    for model_path in &model_paths {
        if let Ok(mut file) = archive.by_name(model_path) {
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            return Ok(content);
        }
    }

    // Fall back to any .model member
    for i in 0..archive.len() {
        let file = archive.by_index(i).map_err(|e| {
            ParseError::invalid_content(format!("failed to read archive entry: {e}"))
        })?;
        let is_model = file.name().to_lowercase().ends_with(".model");
        drop(file);
        if is_model {
            let mut file = archive.by_index(i).map_err(|e| {
                ParseError::invalid_content(format!("failed to read model part: {e}"))
            })?;
            let mut content = String::new();
            file.read_to_string(&mut content)?;
            return Ok(content);
        }
    }

    Err(ParseError::invalid_content(
        "3MF archive does not contain a model part",
    ))
}

/// Strategy 1: one mesh per `<object>` element, in document order.
fn parse_objects(content: &str, stem: &str) -> ParseResult<Vec<RawMesh>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut meshes: Vec<RawMesh> = Vec::new();
    let mut current: Option<RawMesh> = None;
    let mut current_name: Option<String> = None;
    let mut in_vertices = false;
    let mut in_triangles = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"object" => {
                    current = Some(RawMesh::new());
                    current_name = object_name(e)?;
                }
                b"vertices" => {
                    if current.is_some() {
                        in_vertices = true;
                    }
                }
                b"triangles" => {
                    if current.is_some() {
                        in_triangles = true;
                    }
                }
                b"vertex" => {
                    if in_vertices {
                        if let Some(mesh) = current.as_mut() {
                            mesh.vertices.push(parse_vertex_element(e)?);
                        }
                    }
                }
                b"triangle" => {
                    if in_triangles {
                        if let Some(mesh) = current.as_mut() {
                            mesh.faces.push(parse_triangle_element(e, 0)?);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"object" => {
                    if let Some(mesh) = current.take() {
                        if !mesh.is_empty() {
                            check_face_indices(&mesh)?;
                            let name = current_name.take().unwrap_or_else(|| {
                                format!("{stem} - Model {}", meshes.len() + 1)
                            });
                            meshes.push(mesh.with_name(name));
                        }
                    }
                    current_name = None;
                }
                b"vertices" => in_vertices = false,
                b"triangles" => in_triangles = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::invalid_content(format!("XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(meshes)
}

/// Strategy 2: traverse the whole document as a single mesh.
///
/// Vertex indices are offset per `<mesh>` element so that multiple bare
/// payloads concatenate correctly.
fn parse_document_mesh(content: &str, stem: &str) -> ParseResult<Option<RawMesh>> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut mesh = RawMesh::new();
    let mut vertex_offset: u32 = 0;
    let mut in_vertices = false;
    let mut in_triangles = false;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e) | Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"mesh" => {
                    #[allow(clippy::cast_possible_truncation)]
                    // Truncation: mesh indices are u32 by format definition
                    {
                        vertex_offset = mesh.vertices.len() as u32;
                    }
                }
                b"vertices" => in_vertices = true,
                b"triangles" => in_triangles = true,
                b"vertex" => {
                    if in_vertices {
                        mesh.vertices.push(parse_vertex_element(e)?);
                    }
                }
                b"triangle" => {
                    if in_triangles {
                        mesh.faces.push(parse_triangle_element(e, vertex_offset)?);
                    }
                }
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"vertices" => in_vertices = false,
                b"triangles" => in_triangles = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::invalid_content(format!("XML parse error: {e}")));
            }
            _ => {}
        }
        buf.clear();
    }

    if mesh.is_empty() {
        Ok(None)
    } else {
        check_face_indices(&mesh)?;
        Ok(Some(mesh.with_name(stem)))
    }
}

/// Reject faces that reference vertices the mesh does not have.
///
/// Unchecked indices would surface much later as an out-of-bounds panic
/// in the normalizer or the rasterizer; failing here keeps malformed
/// files on the recoverable-error path.
fn check_face_indices(mesh: &RawMesh) -> ParseResult<()> {
    let count = mesh.vertices.len();
    for face in &mesh.faces {
        for &idx in face {
            if idx as usize >= count {
                return Err(ParseError::invalid_content(format!(
                    "triangle index {idx} out of range for {count} vertices"
                )));
            }
        }
    }
    Ok(())
}

/// Extract the `name` attribute of an `<object>` element, if present.
fn object_name(element: &BytesStart<'_>) -> ParseResult<Option<String>> {
    for attr in element.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"name" {
            let value = attr
                .unescape_value()
                .map_err(|e| ParseError::invalid_content(format!("invalid name attribute: {e}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Parse a `<vertex x= y= z=>` element.
fn parse_vertex_element(element: &BytesStart<'_>) -> ParseResult<Point3<f64>> {
    let mut x = 0.0_f64;
    let mut y = 0.0_f64;
    let mut z = 0.0_f64;

    for attr in element.attributes().flatten() {
        let value = std::str::from_utf8(&attr.value)?;
        match attr.key.local_name().as_ref() {
            b"x" => x = value.trim().parse()?,
            b"y" => y = value.trim().parse()?,
            b"z" => z = value.trim().parse()?,
            _ => {}
        }
    }

    Ok(Point3::new(x, y, z))
}

/// Parse a `<triangle v1= v2= v3=>` element.
fn parse_triangle_element(element: &BytesStart<'_>, vertex_offset: u32) -> ParseResult<[u32; 3]> {
    let mut v1 = 0_u32;
    let mut v2 = 0_u32;
    let mut v3 = 0_u32;

    for attr in element.attributes().flatten() {
        let value = std::str::from_utf8(&attr.value)?;
        match attr.key.local_name().as_ref() {
            b"v1" => v1 = value.trim().parse()?,
            b"v2" => v2 = value.trim().parse()?,
            b"v3" => v3 = value.trim().parse()?,
            _ => {}
        }
    }

    Ok([v1 + vertex_offset, v2 + vertex_offset, v3 + vertex_offset])
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::unnecessary_raw_string_hashes)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Build an in-memory 3MF container around the given model XML.
    fn archive_with_model(model_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            let options =
                SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            zip.start_file("3D/3dmodel.model", options).unwrap();
            zip.write_all(model_xml.as_bytes()).unwrap();
            zip.finish().unwrap();
        }
        cursor.into_inner()
    }

    const TWO_OBJECT_MODEL: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <resources>
    <object id="1" name="Lid" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2"/>
        </triangles>
      </mesh>
    </object>
    <object id="2" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="1"/>
          <vertex x="1" y="0" z="1"/>
          <vertex x="0" y="1" z="1"/>
          <vertex x="1" y="1" z="1"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="2"/>
          <triangle v1="1" v2="3" v3="2"/>
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"#;

    #[test]
    fn one_mesh_per_object_in_document_order() {
        let bytes = archive_with_model(TWO_OBJECT_MODEL);
        let meshes = parse_3mf(&bytes, "box.3mf").unwrap();

        assert_eq!(meshes.len(), 2);
        assert_eq!(meshes[0].name.as_deref(), Some("Lid"));
        assert_eq!(meshes[0].triangle_count(), 1);
        assert_eq!(meshes[1].name.as_deref(), Some("box - Model 2"));
        assert_eq!(meshes[1].triangle_count(), 2);
        assert_eq!(meshes[1].vertex_count(), 4);
    }

    #[test]
    fn object_indices_are_local() {
        // The second object's faces index its own vertices, not a
        // concatenated buffer.
        let bytes = archive_with_model(TWO_OBJECT_MODEL);
        let meshes = parse_3mf(&bytes, "box.3mf").unwrap();
        for face in &meshes[1].faces {
            for &idx in face {
                assert!((idx as usize) < meshes[1].vertex_count());
            }
        }
    }

    #[test]
    fn bare_mesh_falls_back_to_document_traversal() {
        let model = r#"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <mesh>
    <vertices>
      <vertex x="0" y="0" z="0"/>
      <vertex x="1" y="0" z="0"/>
      <vertex x="0" y="1" z="0"/>
    </vertices>
    <triangles>
      <triangle v1="0" v2="1" v3="2"/>
    </triangles>
  </mesh>
</model>"#;

        let bytes = archive_with_model(model);
        let meshes = parse_3mf(&bytes, "loose.3mf").unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name.as_deref(), Some("loose"));
        assert_eq!(meshes[0].triangle_count(), 1);
    }

    #[test]
    fn not_a_zip_is_an_error() {
        let result = parse_3mf(b"definitely not a zip archive", "bad.3mf");
        assert!(result.is_err());
    }

    #[test]
    fn zip_without_model_part_is_an_error() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            zip.start_file("readme.txt", options).unwrap();
            zip.write_all(b"no geometry here").unwrap();
            zip.finish().unwrap();
        }
        let result = parse_3mf(&cursor.into_inner(), "empty.3mf");
        assert!(result.is_err());
    }

    #[test]
    fn model_with_no_triangles_is_an_error() {
        let model = r#"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <resources/>
</model>"#;
        let bytes = archive_with_model(model);
        assert!(matches!(
            parse_3mf(&bytes, "hollow.3mf"),
            Err(ParseError::NoTriangles { format: "3MF" })
        ));
    }

    #[test]
    fn out_of_range_triangle_index_is_an_error() {
        let model = r#"<?xml version="1.0" encoding="UTF-8"?>
<model xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <resources>
    <object id="1" type="model">
      <mesh>
        <vertices>
          <vertex x="0" y="0" z="0"/>
          <vertex x="1" y="0" z="0"/>
          <vertex x="0" y="1" z="0"/>
        </vertices>
        <triangles>
          <triangle v1="0" v2="1" v3="99"/>
        </triangles>
      </mesh>
    </object>
  </resources>
</model>"#;
        let bytes = archive_with_model(model);
        assert!(matches!(
            parse_3mf(&bytes, "bad.3mf"),
            Err(ParseError::InvalidContent { .. })
        ));
    }

    #[test]
    fn out_of_range_index_in_bare_mesh_is_an_error() {
        let model = r#"<model><mesh>
<vertices><vertex x="0" y="0" z="0"/><vertex x="1" y="0" z="0"/><vertex x="0" y="1" z="0"/></vertices>
<triangles><triangle v1="0" v2="3" v3="2"/></triangles>
</mesh></model>"#;
        let bytes = archive_with_model(model);
        assert!(matches!(
            parse_3mf(&bytes, "bad.3mf"),
            Err(ParseError::InvalidContent { .. })
        ));
    }

    #[test]
    fn nonstandard_model_path_is_found() {
        let model = r#"<model><mesh>
<vertices><vertex x="0" y="0" z="0"/><vertex x="1" y="0" z="0"/><vertex x="0" y="1" z="0"/></vertices>
<triangles><triangle v1="0" v2="1" v3="2"/></triangles>
</mesh></model>"#;

        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            let options = SimpleFileOptions::default();
            zip.start_file("payload/part.model", options).unwrap();
            zip.write_all(model.as_bytes()).unwrap();
            zip.finish().unwrap();
        }

        let meshes = parse_3mf(&cursor.into_inner(), "odd.3mf").unwrap();
        assert_eq!(meshes.len(), 1);
    }
}
