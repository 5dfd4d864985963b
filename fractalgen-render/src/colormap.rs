use std::f64::consts::TAU;

use fractalgen_core::MAX_ITERATIONS;

use crate::canvas::Canvas;
use crate::color::{Color, ColorGradient};

// ---------------------------------------------------------------------------
// Gradient
// ---------------------------------------------------------------------------

/// Linear blend from `start` (0 iterations) to `end` (`MAX_ITERATIONS`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientMap {
    start: Color,
    gradient: ColorGradient,
}

impl GradientMap {
    pub fn new(start: Color, end: Color) -> Self {
        Self {
            start,
            gradient: ColorGradient::between(start, end),
        }
    }

    /// Convenience for packed `0xRRGGBB` endpoints.
    pub fn from_hex(start: u32, end: u32) -> Self {
        Self::new(Color::from_hex(start), Color::from_hex(end))
    }

    /// `start + gradient × n`. No clamping: counts past the ceiling extrapolate
    /// beyond `end`, and the canvas saturates on write.
    #[inline]
    pub fn color(&self, iterations: u32) -> Color {
        self.start + self.gradient * iterations
    }
}

// ---------------------------------------------------------------------------
// Rainbow
// ---------------------------------------------------------------------------

/// Three phase-shifted sine waves, one per channel, over one period of
/// `MAX_ITERATIONS`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RainbowMap {
    /// Phase per channel (r, g, b) in radians.
    phase: [f64; 3],
    /// Frequency per channel (r, g, b); 1.0 is one period per ceiling.
    freq: [f64; 3],
    width: f64,
    center: f64,
}

impl RainbowMap {
    pub const DEFAULT_PHASE: [f64; 3] = [2.0, 0.0, 4.0];
    pub const DEFAULT_FREQ: [f64; 3] = [1.0, 1.0, 1.0];
    pub const DEFAULT_WIDTH: f64 = 127.0;
    pub const DEFAULT_CENTER: f64 = 128.0;

    pub fn new(phase: [f64; 3], freq: [f64; 3]) -> Self {
        Self {
            phase,
            freq,
            width: Self::DEFAULT_WIDTH,
            center: Self::DEFAULT_CENTER,
        }
    }

    /// Override the wave amplitude and midline.
    pub fn with_wave(self, width: f64, center: f64) -> Self {
        Self {
            width,
            center,
            ..self
        }
    }

    #[inline]
    pub fn color(&self, iterations: u32) -> Color {
        let angle = f64::from(iterations) / f64::from(MAX_ITERATIONS) * TAU;
        let channel = |i: usize| {
            (self.width * (self.freq[i] * angle + self.phase[i]).sin() + self.center).round() as i32
        };
        Color::new(channel(0), channel(1), channel(2))
    }
}

impl Default for RainbowMap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PHASE, Self::DEFAULT_FREQ)
    }
}

// ---------------------------------------------------------------------------
// ColorMap
// ---------------------------------------------------------------------------

/// Iteration-count → color strategy.
///
/// Immutable once built, so a single instance can be shared across render
/// threads by reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorMap {
    Gradient(GradientMap),
    Rainbow(RainbowMap),
}

impl ColorMap {
    #[inline]
    pub fn color(&self, iterations: u32) -> Color {
        match self {
            Self::Gradient(g) => g.color(iterations),
            Self::Rainbow(r) => r.color(iterations),
        }
    }

    /// The type name as written in colormap documents.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gradient(_) => "gradient",
            Self::Rainbow(_) => "rainbow",
        }
    }
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::Rainbow(RainbowMap::default())
    }
}

impl From<GradientMap> for ColorMap {
    fn from(g: GradientMap) -> Self {
        Self::Gradient(g)
    }
}

impl From<RainbowMap> for ColorMap {
    fn from(r: RainbowMap) -> Self {
        Self::Rainbow(r)
    }
}

/// Preview strip for a colormap: column `x` shows `color(256·x / width)`,
/// so the full iteration range spans the image left to right.
pub fn colormap_strip(colormap: &ColorMap, width: u32, height: u32) -> Canvas {
    let mut canvas = Canvas::new(width, height);
    for x in 0..width {
        let n = (u64::from(MAX_ITERATIONS) * u64::from(x) / u64::from(width)) as u32;
        let color = colormap.color(n);
        for y in 0..height {
            canvas.put_pixel(x, y, color);
        }
    }
    canvas
}
