//! PNG export with embedded render parameters (tEXt chunks).

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use tracing::debug;

use fractalgen_core::{Fractal, FractalKind, Transform};

use crate::canvas::Canvas;
use crate::error::RenderError;

const SOFTWARE: &str = "fractalgen";

/// Parameters to embed in an exported PNG.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub fractal: FractalKind,
    pub zoom: f64,
    pub offset_re: f64,
    pub offset_im: f64,
    pub angle: f64,
    pub colormap: String,
    pub width: u32,
    pub height: u32,
    pub total_iterations: u64,
}

impl ExportMetadata {
    pub fn new(
        fractal: FractalKind,
        transform: &Transform,
        colormap: impl Into<String>,
        total_iterations: u64,
    ) -> Self {
        let size = transform.size();
        Self {
            fractal,
            zoom: transform.zoom(),
            offset_re: transform.offset().re,
            offset_im: transform.offset().im,
            angle: transform.angle(),
            colormap: colormap.into(),
            width: size.width,
            height: size.height,
            total_iterations,
        }
    }
}

/// Write `canvas` as an 8-bit RGB PNG with `metadata` in tEXt chunks.
///
/// Uses the `png` crate directly so the chunks are readable by exiftool and
/// most image viewers.
pub fn export_png(canvas: &Canvas, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let writer = BufWriter::new(file);

    let mut encoder = png::Encoder::new(writer, canvas.width, canvas.height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder.add_text_chunk("Software".to_string(), SOFTWARE.to_string())?;
    encoder.add_text_chunk("Description".to_string(), build_description(metadata))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder.add_text_chunk(key, value)?;
    }

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&canvas.pixels)?;
    png_writer.finish()?;

    debug!(
        "Exported PNG {}x{} to {}",
        canvas.width,
        canvas.height,
        path.display()
    );
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let mut desc = format!(
        "{} - Offset: {} {}i, Zoom: {}, Angle: {} deg, Colormap: {}",
        meta.fractal.label(),
        meta.offset_re,
        meta.offset_im,
        meta.zoom,
        meta.angle,
        meta.colormap,
    );
    if let Some(c) = meta.fractal.constant() {
        desc.push_str(&format!(", C: {c}"));
    }
    desc
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    let mut pairs = vec![
        ("Fractalgen.Fractal".into(), meta.fractal.label().into()),
        ("Fractalgen.Zoom".into(), meta.zoom.to_string()),
        ("Fractalgen.OffsetRe".into(), meta.offset_re.to_string()),
        ("Fractalgen.OffsetIm".into(), meta.offset_im.to_string()),
        ("Fractalgen.Angle".into(), meta.angle.to_string()),
        ("Fractalgen.Colormap".into(), meta.colormap.clone()),
        (
            "Fractalgen.Resolution".into(),
            format!("{}x{}", meta.width, meta.height),
        ),
        (
            "Fractalgen.TotalIterations".into(),
            meta.total_iterations.to_string(),
        ),
    ];
    if let Some(c) = meta.fractal.constant() {
        pairs.push(("Fractalgen.ConstantRe".into(), c.re.to_string()));
        pairs.push(("Fractalgen.ConstantIm".into(), c.im.to_string()));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalgen_core::{Complex, ImageSize};
    use std::io::Read;

    fn metadata(fractal: FractalKind, w: u32, h: u32) -> ExportMetadata {
        let transform = Transform::with_size(ImageSize::new(w, h)).unwrap();
        ExportMetadata::new(fractal, &transform, "rainbow", 1234)
    }

    #[test]
    fn export_creates_valid_png() {
        let canvas = Canvas::new(4, 4);
        let dir = std::env::temp_dir().join("fractalgen_test_export");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_export.png");
        export_png(&canvas, &path, &metadata(FractalKind::Mandelbrot, 4, 4))
            .expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_embeds_text_chunks() {
        let mut canvas = Canvas::new(2, 2);
        canvas.put_pixel(1, 0, crate::Color::from_hex(0x336699));
        let kind = FractalKind::Julia {
            c: Complex::new(-0.7, 0.27015),
        };
        let dir = std::env::temp_dir().join("fractalgen_test_export_meta");
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("test_meta.png");
        export_png(&canvas, &path, &metadata(kind, 2, 2)).expect("export should succeed");

        let decoder = png::Decoder::new(std::fs::File::open(&path).expect("file should exist"));
        let mut reader = decoder.read_info().expect("should read info");
        let texts = &reader.info().uncompressed_latin1_text;
        assert!(texts
            .iter()
            .any(|t| t.keyword == "Software" && t.text == "fractalgen"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "Fractalgen.Fractal" && t.text == "Julia"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "Fractalgen.ConstantRe" && t.text == "-0.7"));
        assert!(texts
            .iter()
            .any(|t| t.keyword == "Fractalgen.TotalIterations" && t.text == "1234"));

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let frame = reader.next_frame(&mut buf).expect("should decode frame");
        assert_eq!(frame.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[3..6], &[0x33, 0x66, 0x99]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let canvas = Canvas::new(1, 1);
        let path = std::env::temp_dir()
            .join("fractalgen_no_such_dir")
            .join("nested")
            .join("out.png");
        let err = export_png(&canvas, &path, &metadata(FractalKind::Mandelbrot, 1, 1));
        assert!(matches!(err, Err(RenderError::Io { .. })));
    }
}
