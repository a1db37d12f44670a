//! Minimal single-page PDF emission.
//!
//! Wraps one JPEG-encoded raster (DCTDecode pass-through, no
//! re-encoding) in the smallest valid PDF object structure: catalog,
//! page tree, one page, one content stream, one image XObject. The
//! image is centered and aspect-fit inside the page margin.

/// A4 page size in points.
const PAGE_WIDTH: f64 = 595.0;
/// A4 page size in points.
const PAGE_HEIGHT: f64 = 842.0;
/// Margin on all four sides, in points.
const PAGE_MARGIN: f64 = 36.0;

/// Build a single-page PDF embedding the given JPEG.
///
/// `jpeg` must be a baseline JPEG buffer; `width`/`height` are its
/// pixel dimensions. The image is drawn centered within the page
/// margin, scaled to fit while preserving aspect ratio.
#[must_use]
pub fn embed_jpeg(jpeg: &[u8], width: u32, height: u32) -> Vec<u8> {
    // Aspect-fit placement within the margin box.
    let avail_w = PAGE_WIDTH - 2.0 * PAGE_MARGIN;
    let avail_h = PAGE_HEIGHT - 2.0 * PAGE_MARGIN;
    let scale = (avail_w / f64::from(width)).min(avail_h / f64::from(height));
    let draw_w = f64::from(width) * scale;
    let draw_h = f64::from(height) * scale;
    let x = (PAGE_WIDTH - draw_w) * 0.5;
    let y = (PAGE_HEIGHT - draw_h) * 0.5;

    let content = format!("q\n{draw_w:.2} 0 0 {draw_h:.2} {x:.2} {y:.2} cm\n/Im0 Do\nQ\n");

    let mut out: Vec<u8> = Vec::with_capacity(jpeg.len() + 1024);
    let mut offsets: Vec<usize> = Vec::with_capacity(5);

    out.extend_from_slice(b"%PDF-1.4\n");

    // 1: catalog
    offsets.push(out.len());
    out.extend_from_slice(b"1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

    // 2: page tree
    offsets.push(out.len());
    out.extend_from_slice(b"2 0 obj\n<< /Type /Pages /Kids [3 0 R] /Count 1 >>\nendobj\n");

    // 3: page
    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "3 0 obj\n<< /Type /Page /Parent 2 0 R \
             /MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] \
             /Contents 4 0 R \
             /Resources << /XObject << /Im0 5 0 R >> >> >>\nendobj\n"
        )
        .as_bytes(),
    );

    // 4: content stream
    offsets.push(out.len());
    out.extend_from_slice(
        format!("4 0 obj\n<< /Length {} >>\nstream\n{content}endstream\nendobj\n", content.len())
            .as_bytes(),
    );

    // 5: image XObject, JPEG data passed through as DCTDecode
    offsets.push(out.len());
    out.extend_from_slice(
        format!(
            "5 0 obj\n<< /Type /XObject /Subtype /Image \
             /Width {width} /Height {height} \
             /ColorSpace /DeviceRGB /BitsPerComponent 8 \
             /Filter /DCTDecode /Length {} >>\nstream\n",
            jpeg.len()
        )
        .as_bytes(),
    );
    out.extend_from_slice(jpeg);
    out.extend_from_slice(b"\nendstream\nendobj\n");

    // xref + trailer
    let xref_offset = out.len();
    out.extend_from_slice(b"xref\n0 6\n0000000000 65535 f \n");
    for offset in &offsets {
        out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size 6 /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n"
        )
        .as_bytes(),
    );

    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn output_has_pdf_framing() {
        let pdf = embed_jpeg(&[0xFF, 0xD8, 0xFF, 0xD9], 16, 16);
        assert!(pdf.starts_with(b"%PDF-1.4"));
        assert!(pdf.ends_with(b"%%EOF\n"));
    }

    #[test]
    fn jpeg_bytes_are_embedded_verbatim() {
        let jpeg = vec![0xFF, 0xD8, 0x01, 0x02, 0x03, 0xFF, 0xD9];
        let pdf = embed_jpeg(&jpeg, 8, 8);
        assert!(pdf.windows(jpeg.len()).any(|w| w == jpeg.as_slice()));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let pdf = embed_jpeg(&[0xFF, 0xD8, 0xFF, 0xD9], 16, 16);
        let text = String::from_utf8_lossy(&pdf);
        let xref_pos = text.find("xref\n").unwrap();
        for (i, line) in text[xref_pos..].lines().skip(3).take(4).enumerate() {
            let offset: usize = line.split_whitespace().next().unwrap().parse().unwrap();
            let obj_header = format!("{} 0 obj", i + 1);
            assert!(
                text[offset..].starts_with(&obj_header),
                "xref entry {i} does not point at {obj_header}"
            );
        }
    }

    #[test]
    fn wide_image_fits_within_margins() {
        let pdf = embed_jpeg(&[0xFF, 0xD8, 0xFF, 0xD9], 2000, 100);
        let text = String::from_utf8_lossy(&pdf);
        // Drawn width = page width minus both margins.
        assert!(text.contains("523.00 0 0"));
    }
}
