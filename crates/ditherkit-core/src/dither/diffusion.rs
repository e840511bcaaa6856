//! Kernel-driven error diffusion.
//!
//! Strict raster order (left to right, top to bottom, no serpentine), one
//! pass. Each pixel is quantized with [`quantize_luminance`], and the
//! difference between the value read and the value written is pushed into
//! the unprocessed neighbours listed by the kernel. Neighbour updates are
//! stored straight back into the byte buffer, so accumulated error is
//! rounded and clamped after every addition.

use crate::image::{clamp_channel, ImageBuffer};
use crate::options::DitherOptions;
use crate::palette::{Palette, Rgb};
use crate::quantize::quantize_luminance;

use super::{Dither, Kernel};

/// Error diffusion with a fixed kernel.
#[derive(Debug, Clone, Copy)]
pub struct ErrorDiffusion {
    kernel: &'static Kernel,
}

impl ErrorDiffusion {
    pub const fn new(kernel: &'static Kernel) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> &'static Kernel {
        self.kernel
    }
}

impl Dither for ErrorDiffusion {
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, _options: &DitherOptions) {
        diffuse(image, self.kernel, palette);
    }
}

/// Outcome of quantizing one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStep {
    /// Value written back to the pixel.
    pub quantized: Rgb,
    /// `old - quantized` per channel.
    pub error: [f32; 3],
}

/// Quantize one pixel and report its error.
///
/// ```
/// use ditherkit_core::dither::diffuse_pixel;
///
/// let step = diffuse_pixel([100, 100, 100], None);
/// assert_eq!(step.quantized, [0, 0, 0]);
/// assert_eq!(step.error, [100.0, 100.0, 100.0]);
/// ```
pub fn diffuse_pixel(old: Rgb, palette: Option<&Palette>) -> PixelStep {
    let [r, g, b] = old.map(f32::from);
    let quantized = quantize_luminance(r, g, b, palette);
    PixelStep {
        quantized,
        error: [
            r - quantized[0] as f32,
            g - quantized[1] as f32,
            b - quantized[2] as f32,
        ],
    }
}

/// Run error diffusion over the whole buffer in place.
pub fn diffuse(image: &mut ImageBuffer, kernel: &Kernel, palette: Option<&Palette>) {
    let width = image.width as i64;
    let height = image.height as i64;

    for y in 0..height {
        for x in 0..width {
            let i = image.offset(x as usize, y as usize);
            let old = [image.pixels[i], image.pixels[i + 1], image.pixels[i + 2]];
            let step = diffuse_pixel(old, palette);
            image.pixels[i..i + 3].copy_from_slice(&step.quantized);

            if step.error == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x + dx as i64;
                let ny = y + dy as i64;
                if nx < 0 || nx >= width || ny >= height {
                    continue;
                }
                let fraction = kernel.fraction(weight);
                let j = image.offset(nx as usize, ny as usize);
                for c in 0..3 {
                    let v = image.pixels[j + c] as f32 + step.error[c] * fraction;
                    image.pixels[j + c] = clamp_channel(v);
                }
            }
        }
    }
}
