//! Model file decoding for the ingestion pipeline.
//!
//! This crate turns an in-memory upload buffer into one or more
//! [`RawMesh`] values:
//!
//! - **STL** (Stereolithography) - Binary, the fixed 50-byte-record
//!   layout
//! - **3MF** (3D Manufacturing Format) - ZIP-packaged XML, one mesh per
//!   `<object>`
//!
//! It also serializes a normalized mesh back to binary STL for the
//! re-export/download path.
//!
//! The crate performs **no file or network I/O**: callers hand in fully
//! read byte buffers together with the original file name, and both
//! parsers are pure functions of that buffer.
//!
//! # Example
//!
//! ```
//! use model_io::{parse_model, ModelFormat};
//!
//! assert_eq!(ModelFormat::from_file_name("part.STL"), Some(ModelFormat::Stl));
//!
//! // A malformed buffer is an error, not a panic; the pipeline layer
//! // decides how to recover.
//! assert!(parse_model(&[0u8; 10], "part.stl").is_err());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;
mod threemf;

pub use error::{ParseError, ParseResult};
pub use stl::{export_stl, parse_stl, STL_HEADER_SIZE, STL_TRIANGLE_SIZE};
pub use threemf::parse_3mf;

use model_types::RawMesh;

/// Supported upload formats.
///
/// The upload UI enforces an extension allow-list before the pipeline
/// runs, so this enum is closed: a buffer reaches a parser only through
/// one of these two variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFormat {
    /// Binary STL (Stereolithography).
    Stl,
    /// 3MF: a ZIP archive of XML model parts.
    ThreeMf,
}

impl ModelFormat {
    /// Detect format from a file name's extension.
    ///
    /// The match is case-insensitive and looks only at the suffix.
    /// Returns `None` for unrecognized extensions.
    ///
    /// # Example
    ///
    /// ```
    /// use model_io::ModelFormat;
    ///
    /// assert_eq!(ModelFormat::from_file_name("part.stl"), Some(ModelFormat::Stl));
    /// assert_eq!(ModelFormat::from_file_name("part.3MF"), Some(ModelFormat::ThreeMf));
    /// assert_eq!(ModelFormat::from_file_name("part.obj"), None);
    /// ```
    #[must_use]
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_lowercase().as_str() {
            "stl" => Some(Self::Stl),
            "3mf" => Some(Self::ThreeMf),
            _ => None,
        }
    }

    /// Get the canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::ThreeMf => "3mf",
        }
    }
}

/// Parse an upload buffer into raw meshes, dispatching on the file name.
///
/// The format is resolved once here; the sub-parsers never re-inspect
/// the name except to synthesize display names for unnamed 3MF objects.
///
/// # Errors
///
/// Returns an error if:
/// - The extension is not `.stl` or `.3mf` ([`ParseError::UnknownFormat`])
/// - The buffer does not decode any triangle under the selected
///   format's grammar
pub fn parse_model(bytes: &[u8], file_name: &str) -> ParseResult<Vec<RawMesh>> {
    let format = ModelFormat::from_file_name(file_name).ok_or_else(|| ParseError::UnknownFormat {
        extension: file_name
            .rsplit_once('.')
            .map_or("(none)", |(_, ext)| ext)
            .to_string(),
    })?;

    match format {
        ModelFormat::Stl => parse_stl(bytes).map(|mesh| vec![mesh]),
        ModelFormat::ThreeMf => parse_3mf(bytes, file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_file_name_stl() {
        assert_eq!(ModelFormat::from_file_name("model.stl"), Some(ModelFormat::Stl));
        assert_eq!(ModelFormat::from_file_name("model.STL"), Some(ModelFormat::Stl));
        assert_eq!(
            ModelFormat::from_file_name("archive.tar.stl"),
            Some(ModelFormat::Stl)
        );
    }

    #[test]
    fn format_from_file_name_3mf() {
        assert_eq!(
            ModelFormat::from_file_name("model.3mf"),
            Some(ModelFormat::ThreeMf)
        );
        assert_eq!(
            ModelFormat::from_file_name("model.3MF"),
            Some(ModelFormat::ThreeMf)
        );
    }

    #[test]
    fn format_from_file_name_unknown() {
        assert_eq!(ModelFormat::from_file_name("model.obj"), None);
        assert_eq!(ModelFormat::from_file_name("model"), None);
        assert_eq!(ModelFormat::from_file_name(""), None);
    }

    #[test]
    fn format_extension() {
        assert_eq!(ModelFormat::Stl.extension(), "stl");
        assert_eq!(ModelFormat::ThreeMf.extension(), "3mf");
    }

    #[test]
    fn parse_model_rejects_unknown_extension() {
        let result = parse_model(&[], "model.gltf");
        assert!(matches!(
            result,
            Err(ParseError::UnknownFormat { extension }) if extension == "gltf"
        ));
    }
}
