//! Contrast, midtone and highlight remapping.

use crate::image::{clamp_channel, ImageBuffer, CHANNELS};
use crate::options::{DitherOptions, MAX_ADJUSTMENT, NEUTRAL_ADJUSTMENT};
use crate::quantize::luminance;

/// Amount added per channel at full midtone/highlight strength.
const TONE_LIFT: f32 = 30.0;

/// Luminance band where the midtone lift applies (exclusive).
const MIDTONE_BAND: (f32, f32) = (64.0, 192.0);

/// Luminance above which the highlight lift applies.
const HIGHLIGHT_FLOOR: f32 = 192.0;

/// Classic contrast factor for a 0-100 slider value.
///
/// `c = (contrast - 50) * 2.55`, `factor = 259(c + 255) / (255(259 - c))`.
/// 50 gives exactly 1.0. Values above 100 count as 100.
pub fn contrast_factor(contrast: u8) -> f32 {
    let contrast = contrast.min(MAX_ADJUSTMENT);
    let c = (contrast as f32 - NEUTRAL_ADJUSTMENT as f32) * 2.55;
    259.0 * (c + 255.0) / (255.0 * (259.0 - c))
}

/// Signed strength in `[-1, 1]` of a midtone/highlight slider value.
pub fn tone_factor(value: u8) -> f32 {
    let value = value.min(MAX_ADJUSTMENT);
    (value as f32 - NEUTRAL_ADJUSTMENT as f32) / NEUTRAL_ADJUSTMENT as f32
}

/// Precomputed per-call tone parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneCurve {
    pub contrast: f32,
    pub midtones: f32,
    pub highlights: f32,
}

impl ToneCurve {
    pub fn from_options(options: &DitherOptions) -> Self {
        Self {
            contrast: contrast_factor(options.contrast),
            midtones: tone_factor(options.midtones),
            highlights: tone_factor(options.highlights),
        }
    }

    /// True when the curve maps every value onto itself.
    pub fn is_identity(&self) -> bool {
        self.contrast == 1.0 && self.midtones == 0.0 && self.highlights == 0.0
    }

    /// Apply the curve to one pixel.
    ///
    /// Midtones and highlights read the post-contrast values, and the
    /// luminance gate is computed once from them, so a pixel gets at most
    /// one of the two lifts.
    pub fn apply(&self, rgb: [f32; 3]) -> [f32; 3] {
        let mut out = rgb.map(|v| (self.contrast * (v - 128.0) + 128.0).clamp(0.0, 255.0));
        let l = luminance(out[0], out[1], out[2]);

        if self.midtones != 0.0 && l > MIDTONE_BAND.0 && l < MIDTONE_BAND.1 {
            let lift = self.midtones * TONE_LIFT;
            out = out.map(|v| (v + lift).clamp(0.0, 255.0));
        }
        if self.highlights != 0.0 && l > HIGHLIGHT_FLOOR {
            let lift = self.highlights * TONE_LIFT;
            out = out.map(|v| (v + lift).clamp(0.0, 255.0));
        }
        out
    }
}

/// Apply contrast, midtones and highlights, returning a new buffer.
pub fn adjust(image: &ImageBuffer, options: &DitherOptions) -> ImageBuffer {
    let curve = ToneCurve::from_options(options);
    let mut out = image.clone();
    if curve.is_identity() {
        return out;
    }

    for px in out.pixels.chunks_exact_mut(CHANNELS) {
        let adjusted = curve.apply([px[0] as f32, px[1] as f32, px[2] as f32]);
        px[0] = clamp_channel(adjusted[0]);
        px[1] = clamp_channel(adjusted[1]);
        px[2] = clamp_channel(adjusted[2]);
    }
    out
}
