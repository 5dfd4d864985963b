//! XML batch files: several fully described images in one document.
//!
//! ```xml
//! <fractals>
//!   <fractal id="rabbit" save="rabbit.png">
//!     <size width="1920" height="1080"/>
//!     <transform zoom="1.5" angle="0">
//!       <offset real="0" imag="0"/>
//!     </transform>
//!     <colormap preset="rainbow"/>
//!     <complex real="-0.123" imag="0.745"/>
//!   </fractal>
//!   <fractal id="overview" save="mandelbrot.jpg" mbrot="true">
//!     <size width="800" height="600"/>
//!     <transform><offset x="-0.5" y="0"/></transform>
//!     <colormap type="gradient" start="0x000000" end="0xffffff"/>
//!   </fractal>
//! </fractals>
//! ```
//!
//! The `<fractals>` container is optional: `<fractal>` elements may also be
//! listed directly at the top level of the file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use roxmltree::{Document, Node};
use tracing::{debug, info};

use fractalgen_core::{FractalKind, ImageSize, TransformParams};

use crate::error::AppError;
use crate::generate::{generate, FractalJob};
use crate::presets::{describe_colormap, ColorMapRegistry};
use crate::report::BatchReport;
use crate::xml;

/// Parse the jobs of a batch document. With a non-empty `id_filter`, only the
/// `<fractal>` with that id is parsed; entries that are skipped are never
/// validated.
pub fn parse_batch(
    origin: &Path,
    text: &str,
    registry: &ColorMapRegistry,
    id_filter: Option<&str>,
) -> crate::Result<Vec<FractalJob>> {
    let wrapped = xml::wrap_fragment(text);
    let doc = Document::parse(&wrapped).map_err(|source| AppError::Xml {
        path: origin.to_path_buf(),
        source,
    })?;

    // An empty id selects everything, like no id at all.
    let id_filter = id_filter.filter(|wanted| !wanted.is_empty());

    let mut jobs = Vec::new();
    for entry in xml::elements(doc.root_element(), "fractal") {
        let id = entry.attribute("id").unwrap_or_default();
        if id_filter.is_some_and(|wanted| wanted != id) {
            debug!(id, "Skipping batch entry");
            continue;
        }
        jobs.push(parse_job(entry, registry)?);
    }

    if let (Some(wanted), true) = (id_filter, jobs.is_empty()) {
        return Err(AppError::NoMatchingJob(wanted.to_string()));
    }
    Ok(jobs)
}

fn parse_job(entry: Node<'_, '_>, registry: &ColorMapRegistry) -> crate::Result<FractalJob> {
    let id = entry.attribute("id").unwrap_or_default().to_string();
    let save = PathBuf::from(xml::require_value(entry, "save")?);
    let is_mandelbrot = xml::bool_value(entry, "mbrot")?.unwrap_or(false);

    let size_node = xml::require_child(entry, "size")?;
    let size = ImageSize::new(
        required_u32(size_node, "width")?,
        required_u32(size_node, "height")?,
    );

    let params = match xml::child(entry, "transform") {
        Some(node) => TransformParams {
            zoom: xml::f64_value(node, "zoom")?.unwrap_or(TransformParams::default().zoom),
            offset: xml::complex(xml::child(node, "offset"))?,
            angle: xml::f64_value(node, "angle")?.unwrap_or(0.0),
        },
        None => TransformParams::default(),
    };

    let colormap_node = xml::require_child(entry, "colormap")?;
    let colormap = registry.parse_colormap(colormap_node)?;
    let constant = xml::complex(xml::child(entry, "complex"))?;

    Ok(FractalJob {
        id,
        save,
        transform: params.build(size)?,
        colormap,
        colormap_name: describe_colormap(colormap_node),
        fractal: FractalKind::from_flag(is_mandelbrot, constant),
    })
}

fn required_u32(node: Node<'_, '_>, name: &str) -> crate::Result<u32> {
    xml::u32_value(node, name)?.ok_or_else(|| AppError::MissingAttribute {
        element: node.tag_name().name().to_string(),
        attribute: name.to_string(),
    })
}

/// Render every job of the batch file at `path` (or only `id_filter`).
pub fn run_batch(
    path: &Path,
    id_filter: Option<&str>,
    registry: &ColorMapRegistry,
) -> crate::Result<BatchReport> {
    let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
    let jobs = parse_batch(path, &text, registry, id_filter)?;
    info!("Running {} job(s) from {}", jobs.len(), path.display());

    let start = Instant::now();
    let mut report = BatchReport {
        source: Some(path.to_path_buf()),
        jobs: Vec::with_capacity(jobs.len()),
    };
    for job in &jobs {
        report.jobs.push(generate(job)?);
    }

    info!(
        total_iterations = report.total_iterations(),
        elapsed_ms = start.elapsed().as_millis(),
        "Batch complete"
    );
    Ok(report)
}
