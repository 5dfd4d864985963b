use std::ops::{Add, Mul};

use fractalgen_core::MAX_ITERATIONS;

/// An RGB color.
///
/// Channels are nominally `0..=255` but stored as `i32` so gradient
/// arithmetic can overshoot without wrapping; [`Color::to_rgb8`] saturates
/// at the point where the color is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl Color {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// Unpack `0xRRGGBB`. Bits above the low 24 are ignored.
    pub const fn from_hex(rgb: u32) -> Self {
        Self {
            red: ((rgb >> 16) & 0xff) as i32,
            green: ((rgb >> 8) & 0xff) as i32,
            blue: (rgb & 0xff) as i32,
        }
    }

    /// Channels clamped into `0..=255`.
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            self.red.clamp(0, 255) as u8,
            self.green.clamp(0, 255) as u8,
            self.blue.clamp(0, 255) as u8,
        ]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [r, g, b] = self.to_rgb8();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Per-iteration channel deltas of a linear gradient over
/// `MAX_ITERATIONS` steps.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ColorGradient {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ColorGradient {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// The step that walks from `start` to `end` in `MAX_ITERATIONS` steps.
    pub fn between(start: Color, end: Color) -> Self {
        let steps = f64::from(MAX_ITERATIONS);
        Self {
            red: f64::from(end.red - start.red) / steps,
            green: f64::from(end.green - start.green) / steps,
            blue: f64::from(end.blue - start.blue) / steps,
        }
    }
}

impl Mul<u32> for ColorGradient {
    type Output = Self;

    fn mul(self, iterations: u32) -> Self {
        let n = f64::from(iterations);
        Self {
            red: self.red * n,
            green: self.green * n,
            blue: self.blue * n,
        }
    }
}

/// Shift a color by a gradient; each channel is truncated toward zero.
impl Add<ColorGradient> for Color {
    type Output = Color;

    fn add(self, rhs: ColorGradient) -> Color {
        Color {
            red: (f64::from(self.red) + rhs.red) as i32,
            green: (f64::from(self.green) + rhs.green) as i32,
            blue: (f64::from(self.blue) + rhs.blue) as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpacks_hex() {
        assert_eq!(Color::from_hex(0x12ab7f), Color::new(0x12, 0xab, 0x7f));
        assert_eq!(Color::from_hex(0xff_000000), Color::BLACK);
    }

    #[test]
    fn to_rgb8_saturates() {
        assert_eq!(Color::new(-4, 128, 300).to_rgb8(), [0, 128, 255]);
    }

    #[test]
    fn display_as_hex() {
        assert_eq!(Color::new(255, 16, 0).to_string(), "#ff1000");
    }

    #[test]
    fn gradient_walks_start_to_end() {
        let start = Color::from_hex(0x204060);
        let end = Color::from_hex(0xa0c0e0);
        let g = ColorGradient::between(start, end);
        assert_eq!(start + g * 0, start);
        assert_eq!(start + g * MAX_ITERATIONS, end);
    }

    #[test]
    fn descending_gradient_truncates_toward_zero() {
        let g = ColorGradient::between(Color::WHITE, Color::BLACK);
        // 255 - 255/256 = 254.004 → 254
        assert_eq!(Color::WHITE + g * 1, Color::new(254, 254, 254));
        assert_eq!(Color::WHITE + g * MAX_ITERATIONS, Color::BLACK);
    }

    #[test]
    fn scaling_gradient_is_linear() {
        let g = ColorGradient::new(0.5, -1.0, 2.0) * 4;
        assert_eq!(g, ColorGradient::new(2.0, -4.0, 8.0));
    }
}
