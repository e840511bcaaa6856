//! Halftone dot pattern.
//!
//! The image is cut into [`HALFTONE_BLOCK`]-sized square cells. Each cell
//! becomes a round ink dot on paper whose radius grows as the cell's mean
//! luminance falls: a white cell has no dot, a black cell a dot of radius
//! `HALFTONE_BLOCK / 2` (which still leaves the cell corners as paper).

use crate::image::ImageBuffer;
use crate::options::DitherOptions;
use crate::palette::Palette;
use crate::quantize::{ink_and_paper, luminance};

use super::Dither;

/// Cell side length in pixels.
pub const HALFTONE_BLOCK: usize = 4;

/// Dot radius for a cell with the given mean luminance (0-255).
#[inline]
pub fn dot_radius(mean_luminance: f32) -> f32 {
    (255.0 - mean_luminance) / 255.0 * (HALFTONE_BLOCK as f32 / 2.0)
}

/// Whether pixel `(x, y)` falls inside its cell's dot.
///
/// The dot centre is `(bx + 2, by + 2)` for the cell origin `(bx, by)`,
/// measured in integer pixel coordinates.
#[inline]
pub fn in_dot(x: usize, y: usize, radius: f32) -> bool {
    let half = HALFTONE_BLOCK / 2;
    let cx = (x - x % HALFTONE_BLOCK + half) as f32;
    let cy = (y - y % HALFTONE_BLOCK + half) as f32;
    (x as f32 - cx).hypot(y as f32 - cy) < radius
}

/// Mean luminance over the in-bounds pixels of the cell at `(bx, by)`.
///
/// `sample` returns the RGB value of an in-bounds pixel on the 0-255 scale.
pub fn block_luminance<F>(bx: usize, by: usize, width: usize, height: usize, sample: F) -> f32
where
    F: Fn(usize, usize) -> [f32; 3],
{
    let x_end = (bx + HALFTONE_BLOCK).min(width);
    let y_end = (by + HALFTONE_BLOCK).min(height);
    let mut sum = 0.0f32;
    let mut count = 0usize;
    for y in by..y_end {
        for x in bx..x_end {
            let [r, g, b] = sample(x, y);
            sum += luminance(r, g, b);
            count += 1;
        }
    }
    if count == 0 {
        return 255.0;
    }
    sum / count as f32
}

/// Halftone ditherer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Halftone;

impl Dither for Halftone {
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, _options: &DitherOptions) {
        let width = image.width as usize;
        let height = image.height as usize;
        let (ink, paper) = ink_and_paper(palette);

        for by in (0..height).step_by(HALFTONE_BLOCK) {
            for bx in (0..width).step_by(HALFTONE_BLOCK) {
                let mean = block_luminance(bx, by, width, height, |x, y| {
                    let px = image.pixel(x, y);
                    [px[0] as f32, px[1] as f32, px[2] as f32]
                });
                let radius = dot_radius(mean);

                for y in by..(by + HALFTONE_BLOCK).min(height) {
                    for x in bx..(bx + HALFTONE_BLOCK).min(width) {
                        let color = if in_dot(x, y, radius) { ink } else { paper };
                        image.set_rgb(x, y, color);
                    }
                }
            }
        }
    }
}
