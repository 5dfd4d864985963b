//! Turning a fully resolved job into an image file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use fractalgen_core::{Fractal, FractalKind, Transform};
use fractalgen_render::{export_png, render, Canvas, ColorMap, ExportMetadata};

use crate::error::AppError;
use crate::report::JobReport;

/// Everything needed to render and save one image.
#[derive(Debug, Clone)]
pub struct FractalJob {
    pub id: String,
    pub save: PathBuf,
    pub transform: Transform,
    pub colormap: ColorMap,
    /// Preset name or colormap type, for logs and metadata.
    pub colormap_name: String,
    pub fractal: FractalKind,
}

/// Render `job`, write it to `job.save` and describe what was done.
pub fn generate(job: &FractalJob) -> crate::Result<JobReport> {
    info!("Generating {}...", job.save.display());

    let result = render(&job.transform, &job.colormap, &job.fractal);
    let metadata = ExportMetadata::new(
        job.fractal,
        &job.transform,
        job.colormap_name.clone(),
        result.total_iterations,
    );
    save_canvas(&result.canvas, &job.save, Some(&metadata))?;

    info!(
        id = %job.id,
        fractal = job.fractal.label(),
        iterations = result.total_iterations,
        elapsed_ms = result.elapsed.as_millis(),
        "Saved {}",
        job.save.display()
    );

    Ok(JobReport {
        id: job.id.clone(),
        save: job.save.clone(),
        fractal: job.fractal,
        size: job.transform.size(),
        transform: job.transform.params(),
        colormap: job.colormap_name.clone(),
        total_iterations: result.total_iterations,
        elapsed_ms: whole_millis(result.elapsed),
    })
}

/// Milliseconds in `elapsed`, saturating at `u64::MAX`.
fn whole_millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

/// Write a canvas to disk. `.png` goes through the metadata-aware PNG
/// exporter when `metadata` is given; everything else is handed to `image`,
/// which picks the format from the extension.
pub fn save_canvas(
    canvas: &Canvas,
    path: &Path,
    metadata: Option<&ExportMetadata>,
) -> crate::Result<()> {
    let is_png = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("png"))
        .unwrap_or(false);

    if let (true, Some(metadata)) = (is_png, metadata) {
        export_png(canvas, path, metadata)?;
        return Ok(());
    }

    let image = image::RgbImage::from_raw(canvas.width, canvas.height, canvas.pixels.clone())
        .ok_or_else(|| {
            AppError::io(
                path,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "canvas size does not match its pixel buffer",
                ),
            )
        })?;
    image.save(path).map_err(|source| AppError::Image {
        path: path.to_path_buf(),
        source,
    })
}
