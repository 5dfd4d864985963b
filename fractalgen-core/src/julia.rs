use crate::complex::Complex;
use crate::fractal::{escape_time, Fractal};

/// Escape-time test for a Julia set: the orbit starts at the pixel's point
/// `z0` and `c` is the fixed set parameter.
#[inline]
pub fn julia_iterate(z0: Complex, c: Complex) -> u32 {
    escape_time(z0, c)
}

/// A Julia set `z ← z² + c` for a fixed `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Julia {
    c: Complex,
}

impl Julia {
    pub fn new(c: Complex) -> Self {
        Self { c }
    }

    /// `c = -0.7 + 0.27015i`, a well-known connected Julia set.
    pub fn default_c() -> Complex {
        Complex::new(-0.7, 0.27015)
    }
}

impl Default for Julia {
    fn default() -> Self {
        Self::new(Self::default_c())
    }
}

impl Fractal for Julia {
    #[inline]
    fn iterate(&self, point: Complex) -> u32 {
        julia_iterate(point, self.c)
    }

    fn label(&self) -> &'static str {
        "Julia"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fractal::MAX_ITERATIONS;

    #[test]
    fn far_point_escapes_immediately() {
        assert_eq!(julia_iterate(Complex::new(10.0, 0.0), Julia::default_c()), 0);
    }

    #[test]
    fn c_zero_origin_is_fixed_point() {
        assert_eq!(julia_iterate(Complex::ZERO, Complex::ZERO), MAX_ITERATIONS);
    }

    #[test]
    fn c_zero_inside_unit_disc_is_bounded() {
        assert_eq!(julia_iterate(Complex::new(0.5, -0.5), Complex::ZERO), MAX_ITERATIONS);
    }

    #[test]
    fn c_zero_known_escape_count() {
        // z₀ = 1.2: 1.44, then 2.07 (|z|² ≈ 4.3).
        assert_eq!(julia_iterate(Complex::new(1.2, 0.0), Complex::ZERO), 1);
    }

    #[test]
    fn results_stay_in_range() {
        let j = Julia::default();
        for i in -20..=20 {
            for k in -20..=20 {
                let n = j.iterate(Complex::new(i as f64 * 0.1, k as f64 * 0.1));
                assert!(n <= MAX_ITERATIONS);
            }
        }
    }

    #[test]
    fn deterministic_results() {
        let j = Julia::default();
        let points = [
            Complex::ZERO,
            Complex::new(0.5, 0.5),
            Complex::new(-1.0, 0.3),
            Complex::new(0.0, 1.0),
        ];
        let run1: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        let run2: Vec<_> = points.iter().map(|&p| j.iterate(p)).collect();
        assert_eq!(run1, run2);
    }
}
