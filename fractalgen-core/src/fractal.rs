use serde::{Deserialize, Serialize};

use crate::complex::Complex;
use crate::julia::julia_iterate;
use crate::mandelbrot::mandelbrot_iterate;
use crate::transform::SCALE;

/// Iteration ceiling shared by both escape-time tests and by the colormaps,
/// which are calibrated over `[0, MAX_ITERATIONS]`.
pub const MAX_ITERATIONS: u32 = 256;

/// Squared escape radius, `(SCALE / 2)² = 4`, i.e. `|z| ≥ 2`.
pub const ESCAPE_NORM_SQ: f64 = (SCALE / 2.0) * (SCALE / 2.0);

/// Run `z ← z² + c` from `z` until `|z|² ≥ ESCAPE_NORM_SQ` or the ceiling is
/// reached.
///
/// Returns the number of completed iterations before escape, so a point
/// whose first iterate already escapes yields 0 and an orbit that stays
/// bounded yields [`MAX_ITERATIONS`]. Non-finite input never compares as
/// escaped and therefore also yields the ceiling.
#[inline]
pub fn escape_time(mut z: Complex, c: Complex) -> u32 {
    let mut n = 0;
    while n < MAX_ITERATIONS {
        z = Complex::new(z.re * z.re - z.im * z.im + c.re, 2.0 * z.re * z.im + c.im);
        if z.norm_sq() >= ESCAPE_NORM_SQ {
            break;
        }
        n += 1;
    }
    n
}

/// Anything that turns a point of the plane into an iteration count.
///
/// Renderers are generic over `F: Fractal` so the loop body inlines.
pub trait Fractal {
    /// `point` is the transform's output for one pixel.
    fn iterate(&self, point: Complex) -> u32;

    /// Human-readable name, used in logs and image metadata.
    fn label(&self) -> &'static str;
}

/// Fractal chosen at runtime from a "mandelbrot?" flag and a Julia constant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FractalKind {
    Mandelbrot,
    Julia { c: Complex },
}

impl FractalKind {
    /// The constant is ignored in Mandelbrot mode.
    pub fn from_flag(is_mandelbrot: bool, constant: Complex) -> Self {
        if is_mandelbrot {
            Self::Mandelbrot
        } else {
            Self::Julia { c: constant }
        }
    }

    pub fn is_mandelbrot(&self) -> bool {
        matches!(self, Self::Mandelbrot)
    }

    /// The Julia constant, if any.
    pub fn constant(&self) -> Option<Complex> {
        match self {
            Self::Mandelbrot => None,
            Self::Julia { c } => Some(*c),
        }
    }
}

impl Fractal for FractalKind {
    #[inline]
    fn iterate(&self, point: Complex) -> u32 {
        match self {
            Self::Mandelbrot => mandelbrot_iterate(point),
            Self::Julia { c } => julia_iterate(point, *c),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia { .. } => "Julia",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_threshold_is_four() {
        assert_eq!(ESCAPE_NORM_SQ, 4.0);
    }

    #[test]
    fn landing_exactly_on_radius_counts_as_escape() {
        // z₀ = 0, c = -2 → z₁ = -2, |z₁|² = 4.
        assert_eq!(escape_time(Complex::ZERO, Complex::new(-2.0, 0.0)), 0);
    }

    #[test]
    fn nan_never_escapes() {
        let nan = Complex::new(f64::NAN, f64::NAN);
        assert_eq!(escape_time(nan, Complex::ZERO), MAX_ITERATIONS);
    }

    #[test]
    fn flag_selects_kind() {
        let c = Complex::new(-0.4, 0.6);
        assert_eq!(FractalKind::from_flag(true, c), FractalKind::Mandelbrot);
        assert_eq!(FractalKind::from_flag(false, c), FractalKind::Julia { c });
        assert_eq!(FractalKind::from_flag(true, c).constant(), None);
        assert_eq!(FractalKind::from_flag(false, c).constant(), Some(c));
    }

    #[test]
    fn kind_dispatches_to_matching_test() {
        let p = Complex::new(0.3, -0.2);
        let c = Complex::new(-0.8, 0.156);
        assert_eq!(FractalKind::Mandelbrot.iterate(p), mandelbrot_iterate(p));
        assert_eq!(FractalKind::Julia { c }.iterate(p), julia_iterate(p, c));
    }

    #[test]
    fn kind_serializes_with_tag() {
        let json = serde_json::to_string(&FractalKind::Julia {
            c: Complex::new(0.5, -0.5),
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"julia","c":{"re":0.5,"im":-0.5}}"#);
        let back: FractalKind = serde_json::from_str(r#"{"type":"mandelbrot"}"#).unwrap();
        assert!(back.is_mandelbrot());
    }
}
