//! Ordered (Bayer matrix) dithering.
//!
//! Each pixel gets a position-dependent offset
//! `(M[y % n][x % n] / n² - 0.5) * 255` added to every channel before
//! [`quantize`]. The offset is the same for all three channels, so greys stay
//! grey.

use crate::image::ImageBuffer;
use crate::options::DitherOptions;
use crate::palette::Palette;
use crate::quantize::quantize;

use super::Dither;

/// 2×2 Bayer matrix.
pub const BAYER_2: [[u8; 2]; 2] = [[0, 2], [3, 1]];

/// 4×4 Bayer matrix.
pub const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// 8×8 Bayer matrix, `4 * BAYER_4[y % 4][x % 4] + BAYER_2[y / 4][x / 4]`.
pub const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Supported Bayer matrix sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BayerSize {
    Two,
    Four,
    Eight,
}

impl BayerSize {
    /// Matrix side length.
    #[inline]
    pub const fn dim(self) -> usize {
        match self {
            BayerSize::Two => 2,
            BayerSize::Four => 4,
            BayerSize::Eight => 8,
        }
    }

    /// Raw matrix entry for pixel `(x, y)`, in `0..dim²`.
    #[inline]
    pub fn value(self, x: usize, y: usize) -> u8 {
        match self {
            BayerSize::Two => BAYER_2[y % 2][x % 2],
            BayerSize::Four => BAYER_4[y % 4][x % 4],
            BayerSize::Eight => BAYER_8[y % 8][x % 8],
        }
    }

    /// Matrix entry normalized to `[0, 1)`.
    #[inline]
    pub fn normalized(self, x: usize, y: usize) -> f32 {
        let n = self.dim();
        self.value(x, y) as f32 / (n * n) as f32
    }

    /// Channel offset on the 0-255 scale, in `[-127.5, 127.5)`.
    #[inline]
    pub fn threshold(self, x: usize, y: usize) -> f32 {
        (self.normalized(x, y) - 0.5) * 255.0
    }
}

/// Ordered dithering with a Bayer matrix.
#[derive(Debug, Clone, Copy)]
pub struct Ordered {
    size: BayerSize,
}

impl Ordered {
    pub const fn new(size: BayerSize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> BayerSize {
        self.size
    }
}

impl Dither for Ordered {
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, _options: &DitherOptions) {
        let width = image.width as usize;
        for (i, px) in image.pixels.chunks_exact_mut(4).enumerate() {
            let t = self.size.threshold(i % width, i / width);
            let q = quantize(
                px[0] as f32 + t,
                px[1] as f32 + t,
                px[2] as f32 + t,
                palette,
            );
            px[..3].copy_from_slice(&q);
        }
    }
}
