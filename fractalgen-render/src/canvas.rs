use fractalgen_core::Transform;

use crate::color::Color;

/// Bytes per pixel (R, G, B).
pub const CHANNELS: usize = 3;

/// An RGB8 pixel grid that the renderer paints into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
    /// RGB pixel data, 3 bytes per pixel, row-major order.
    pub pixels: Vec<u8>,
}

impl Canvas {
    /// Create a new canvas filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; width as usize * height as usize * CHANNELS],
        }
    }

    /// A black canvas with the transform's image dimensions.
    pub fn for_transform(transform: &Transform) -> Self {
        let size = transform.size();
        Self::new(size.width, size.height)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Write a color, saturating each channel into `0..=255`.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i..i + CHANNELS].copy_from_slice(&color.to_rgb8());
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.index(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Byte length of one row.
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}
