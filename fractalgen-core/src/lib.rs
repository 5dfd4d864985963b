pub mod complex;
pub mod error;
pub mod fractal;
pub mod julia;
pub mod mandelbrot;
pub mod transform;

// Re-export primary types for convenience.
pub use complex::Complex;
pub use error::CoreError;
pub use fractal::{escape_time, Fractal, FractalKind, ESCAPE_NORM_SQ, MAX_ITERATIONS};
pub use julia::{julia_iterate, Julia};
pub use mandelbrot::{mandelbrot_iterate, Mandelbrot};
pub use transform::{ImageSize, Transform, TransformParams, SCALE};

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
