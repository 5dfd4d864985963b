use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal};

/// Escape-time test for the Mandelbrot set: the orbit starts at zero and the
/// pixel's point is the constant `c`.
#[inline]
pub fn mandelbrot_iterate(c: Complex) -> u32 {
    escape_time(Complex::ZERO, c)
}

/// The Mandelbrot set, `z ← z² + c` from `z₀ = 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Mandelbrot;

impl Fractal for Mandelbrot {
    #[inline]
    fn iterate(&self, c: Complex) -> u32 {
        mandelbrot_iterate(c)
    }

    fn label(&self) -> &'static str {
        "Mandelbrot"
    }
}
