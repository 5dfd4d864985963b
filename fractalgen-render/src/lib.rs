pub mod canvas;
pub mod color;
pub mod colormap;
pub mod error;
pub mod export;
pub mod renderer;

pub use canvas::Canvas;
pub use color::{Color, ColorGradient};
pub use colormap::{colormap_strip, ColorMap, GradientMap, RainbowMap};
pub use error::RenderError;
pub use export::{export_png, ExportMetadata};
pub use renderer::{render, render_image, RenderResult};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
