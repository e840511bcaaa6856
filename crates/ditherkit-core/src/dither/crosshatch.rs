//! Crosshatch line pattern.

use crate::image::ImageBuffer;
use crate::options::DitherOptions;
use crate::palette::Palette;
use crate::quantize::{ink_and_paper, luminance};

use super::Dither;

/// Line spacing in pixels.
pub const HATCH_SPACING: usize = 4;

/// Upper luminance bounds (exclusive) of the four inked bands.
pub const HATCH_BANDS: [f32; 4] = [51.0, 102.0, 153.0, 204.0];

/// Whether pixel `(x, y)` with the given luminance is inked.
///
/// | luminance | ink                                 |
/// |-----------|-------------------------------------|
/// | < 51      | everything                          |
/// | < 102     | verticals, horizontals, diagonals   |
/// | < 153     | verticals and horizontals           |
/// | < 204     | diagonals                           |
/// | otherwise | nothing                             |
#[inline]
pub fn hatch_ink(luminance: f32, x: usize, y: usize) -> bool {
    let vertical = x % HATCH_SPACING == 0;
    let horizontal = y % HATCH_SPACING == 0;
    let diagonal = (x + y) % HATCH_SPACING == 0;

    if luminance < HATCH_BANDS[0] {
        true
    } else if luminance < HATCH_BANDS[1] {
        vertical || horizontal || diagonal
    } else if luminance < HATCH_BANDS[2] {
        vertical || horizontal
    } else if luminance < HATCH_BANDS[3] {
        diagonal
    } else {
        false
    }
}

/// Crosshatch ditherer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Crosshatch;

impl Dither for Crosshatch {
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, _options: &DitherOptions) {
        let width = image.width as usize;
        let (ink, paper) = ink_and_paper(palette);
        for (i, px) in image.pixels.chunks_exact_mut(4).enumerate() {
            let l = luminance(px[0] as f32, px[1] as f32, px[2] as f32);
            let color = if hatch_ink(l, i % width, i / width) {
                ink
            } else {
                paper
            };
            px[..3].copy_from_slice(&color);
        }
    }
}
