use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::complex::Complex;
use crate::error::CoreError;

/// Side length of the visible window at zoom 1, measured along the image
/// height. With the default zoom the plane spans roughly `[-2, 2]` vertically.
pub const SCALE: f64 = 4.0;

/// Pixel dimensions of a target image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Raw zoom / pan / rotation values as they come out of a configuration
/// source, before anything is derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformParams {
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default)]
    pub offset: Complex,
    /// Rotation in degrees, counter-clockwise in pixel space.
    #[serde(default)]
    pub angle: f64,
}

fn default_zoom() -> f64 {
    Transform::DEFAULT_ZOOM
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            zoom: Transform::DEFAULT_ZOOM,
            offset: Complex::ZERO,
            angle: 0.0,
        }
    }
}

impl TransformParams {
    pub fn build(&self, size: ImageSize) -> crate::Result<Transform> {
        Transform::new(size, self.zoom, self.offset, self.angle)
    }
}

/// Maps pixel coordinates onto the complex plane.
///
/// The mapping is `(p − shift) · (SCALE / height / zoom) · rotation + offset`
/// where `shift` is the image centre. Scaling is relative to the height so
/// non-square images keep their aspect ratio. Everything except `offset` and
/// `zoom` is derived once in the constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    size: ImageSize,
    zoom: f64,
    offset: Complex,
    angle: f64,
    /// Image centre, `(width / 2, height / 2)`.
    shift: Complex,
    /// `e^{iθ}` for the configured angle.
    rotation: Complex,
    /// Plane units per pixel, `SCALE / height / zoom`.
    unit: f64,
}

impl Transform {
    pub const DEFAULT_ZOOM: f64 = 1.0;

    /// Build a transform. `angle_degrees` rotates the view about the image
    /// centre.
    ///
    /// Rejects empty images, non-positive or non-finite zoom, and non-finite
    /// offset or angle. Any of those would turn every pixel into NaN/∞.
    pub fn new(
        size: ImageSize,
        zoom: f64,
        offset: Complex,
        angle_degrees: f64,
    ) -> crate::Result<Self> {
        if size.width == 0 || size.height == 0 {
            return Err(CoreError::InvalidImageSize {
                width: size.width,
                height: size.height,
            });
        }
        if zoom <= 0.0 || !zoom.is_finite() {
            return Err(CoreError::InvalidTransform {
                reason: format!("zoom must be positive and finite, got {zoom}"),
            });
        }
        if !offset.is_finite() {
            return Err(CoreError::InvalidTransform {
                reason: format!("offset must be finite, got {offset}"),
            });
        }
        if !angle_degrees.is_finite() {
            return Err(CoreError::InvalidTransform {
                reason: format!("angle must be finite, got {angle_degrees}"),
            });
        }

        trace!(
            width = size.width,
            height = size.height,
            zoom,
            angle = angle_degrees,
            "Transform built"
        );
        Ok(Self {
            size,
            zoom,
            offset,
            angle: angle_degrees,
            shift: Complex::new(0.5 * size.width as f64, 0.5 * size.height as f64),
            rotation: Complex::from_polar(1.0, angle_degrees.to_radians()),
            unit: SCALE / size.height as f64 / zoom,
        })
    }

    /// Default view of an image: zoom 1, centred on the origin, no rotation.
    pub fn with_size(size: ImageSize) -> crate::Result<Self> {
        Self::new(size, Self::DEFAULT_ZOOM, Complex::ZERO, 0.0)
    }

    /// Map (possibly fractional) pixel coordinates to the plane.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> Complex {
        (Complex::new(x, y) - self.shift) * self.unit * self.rotation + self.offset
    }

    #[inline]
    pub fn pixel_to_complex(&self, px: u32, py: u32) -> Complex {
        self.apply(px as f64, py as f64)
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> Complex {
        self.offset
    }

    /// Rotation in degrees, as configured.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn params(&self) -> TransformParams {
        TransformParams {
            zoom: self.zoom,
            offset: self.offset,
            angle: self.angle,
        }
    }
}
