use std::time::{Duration, Instant};

use rayon::prelude::*;
use tracing::{debug, info};

use fractalgen_core::{Fractal, Transform};

use crate::canvas::{Canvas, CHANNELS};
use crate::colormap::ColorMap;

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// A finished image plus the diagnostics gathered while rendering it.
#[derive(Debug, Clone)]
pub struct RenderResult {
    pub canvas: Canvas,
    /// Sum of the per-pixel iteration counts.
    pub total_iterations: u64,
    pub elapsed: Duration,
}

// ---------------------------------------------------------------------------
// Per-row rendering
// ---------------------------------------------------------------------------

/// Paint one canvas row and return the iterations spent on it.
#[inline]
fn render_row<F: Fractal>(
    row: &mut [u8],
    y: u32,
    transform: &Transform,
    colormap: &ColorMap,
    fractal: &F,
) -> u64 {
    let mut total = 0u64;
    for (x, pixel) in row.chunks_exact_mut(CHANNELS).enumerate() {
        let point = transform.pixel_to_complex(x as u32, y);
        let n = fractal.iterate(point);
        pixel.copy_from_slice(&colormap.color(n).to_rgb8());
        total += u64::from(n);
    }
    total
}

// ---------------------------------------------------------------------------
// Full-frame render
// ---------------------------------------------------------------------------

/// Paint every pixel of `canvas` and return the summed iteration count.
///
/// Each pixel's plane coordinate comes from `transform`, its count from
/// `fractal` and its color from `colormap`. Rows are independent and are
/// evaluated in parallel; the totals are combined with an integer sum, so the
/// result does not depend on scheduling.
pub fn render_image<F: Fractal + Sync>(
    canvas: &mut Canvas,
    transform: &Transform,
    colormap: &ColorMap,
    fractal: &F,
) -> u64 {
    if canvas.is_empty() {
        return 0;
    }
    let stride = canvas.stride();
    canvas
        .pixels
        .par_chunks_mut(stride)
        .enumerate()
        .map(|(y, row)| render_row(row, y as u32, transform, colormap, fractal))
        .sum()
}

/// Allocate a canvas matching `transform` and render into it.
pub fn render<F: Fractal + Sync>(
    transform: &Transform,
    colormap: &ColorMap,
    fractal: &F,
) -> RenderResult {
    let start = Instant::now();
    let mut canvas = Canvas::for_transform(transform);
    debug!(
        fractal = fractal.label(),
        colormap = colormap.kind(),
        width = canvas.width,
        height = canvas.height,
        zoom = transform.zoom(),
        "Starting render"
    );

    let total_iterations = render_image(&mut canvas, transform, colormap, fractal);

    let elapsed = start.elapsed();
    info!(
        elapsed_ms = elapsed.as_millis(),
        total_iterations, "Render complete"
    );

    RenderResult {
        canvas,
        total_iterations,
        elapsed,
    }
}
