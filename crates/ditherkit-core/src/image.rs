//! RGBA pixel buffer shared by every stage of the pipeline.
//!
//! [`ImageBuffer`] is a plain row-major, top-to-bottom RGBA8 buffer. Its
//! fields are public so callers can hand over whatever they hold; the
//! pipeline calls [`ImageBuffer::validate()`] before touching the pixels and
//! rejects buffers whose length does not match `width * height * 4`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Bytes per pixel (interleaved R, G, B, A).
pub const CHANNELS: usize = 4;

/// Error returned when a buffer does not describe a valid RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Pixel data length does not equal `width * height * 4`.
    #[error("pixel buffer length {actual} does not match {width}x{height} RGBA (expected {expected})")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// `width * height * 4` does not fit in memory on this platform.
    #[error("image dimensions {width}x{height} overflow the addressable size")]
    TooLarge { width: u32, height: u32 },
}

/// An interleaved RGBA8 image.
///
/// # Example
///
/// ```
/// use ditherkit_core::ImageBuffer;
///
/// let image = ImageBuffer::filled(2, 2, [128, 128, 128, 255]);
/// assert_eq!(image.pixels.len(), 2 * 2 * 4);
/// assert!(image.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap existing pixel data, validating its length.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, BufferError> {
        let image = Self {
            width,
            height,
            pixels,
        };
        image.validate()?;
        Ok(image)
    }

    /// Create a buffer where every pixel has the same RGBA value.
    ///
    /// # Panics
    ///
    /// Panics if the dimensions overflow `usize`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let len = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(len * CHANNELS);
        for _ in 0..len {
            pixels.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Expected byte length for the declared dimensions.
    pub fn expected_len(&self) -> Result<usize, BufferError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or(BufferError::TooLarge {
                width: self.width,
                height: self.height,
            })
    }

    /// Check the `pixels.len() == width * height * 4` invariant.
    pub fn validate(&self) -> Result<(), BufferError> {
        let expected = self.expected_len()?;
        if self.pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                width: self.width,
                height: self.height,
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width as usize + x) * CHANNELS
    }

    /// RGBA value of pixel `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Overwrite the RGB channels of pixel `(x, y)`, leaving alpha alone.
    #[inline]
    pub fn set_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let i = self.offset(x, y);
        self.pixels[i..i + 3].copy_from_slice(&rgb);
    }

    /// Number of pixels.
    #[inline]
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True for zero-area images.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Convert a working `f32` channel value to a byte.
///
/// Rounds half to even and saturates to `[0, 255]`, which is how a clamped
/// byte array stores fractional values.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
