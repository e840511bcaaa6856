//! Per-pixel colour quantization.
//!
//! Two no-palette behaviours exist side by side:
//!
//! - [`quantize`] snaps each channel to the nearest multiple of
//!   [`QUANT_STEP`] (a 4-level-per-channel cube). Ordered and pattern
//!   ditherers use it.
//! - [`quantize_luminance`] thresholds luminance at [`LUMA_THRESHOLD`] to
//!   pure black or white. Error-diffusion ditherers use it.
//!
//! With a palette both delegate to [`Palette::nearest`].

use crate::palette::{Palette, Rgb};

/// Channel step of the no-palette quantization cube.
pub const QUANT_STEP: f32 = 85.0;

/// Luminance cut-off of the error-diffusion no-palette path.
pub const LUMA_THRESHOLD: f32 = 128.0;

/// Rec. 601 luma weights.
pub const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Rec. 601 luminance of an RGB value on the 0-255 scale.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_WEIGHTS[0] * r + LUMA_WEIGHTS[1] * g + LUMA_WEIGHTS[2] * b
}

/// Snap one channel to the step cube.
#[inline]
pub fn quantize_channel(v: f32) -> u8 {
    let v = v.clamp(0.0, 255.0);
    ((v / QUANT_STEP).round() * QUANT_STEP).min(255.0) as u8
}

/// Quantize an RGB value: nearest palette entry, or the step cube.
#[inline]
pub fn quantize(r: f32, g: f32, b: f32, palette: Option<&Palette>) -> Rgb {
    match palette {
        Some(p) => p.nearest(r, g, b),
        None => [quantize_channel(r), quantize_channel(g), quantize_channel(b)],
    }
}

/// Quantize an RGB value: nearest palette entry, or black/white by luminance.
#[inline]
pub fn quantize_luminance(r: f32, g: f32, b: f32, palette: Option<&Palette>) -> Rgb {
    match palette {
        Some(p) => p.nearest(r, g, b),
        None => {
            if luminance(r, g, b) >= LUMA_THRESHOLD {
                [255, 255, 255]
            } else {
                [0, 0, 0]
            }
        }
    }
}

/// Ink and paper colours for the pattern ditherers.
///
/// Black and white, or the palette entries nearest to them.
pub fn ink_and_paper(palette: Option<&Palette>) -> (Rgb, Rgb) {
    match palette {
        Some(p) => (p.nearest(0.0, 0.0, 0.0), p.nearest(255.0, 255.0, 255.0)),
        None => ([0, 0, 0], [255, 255, 255]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_levels() {
        assert_eq!(quantize_channel(0.0), 0);
        assert_eq!(quantize_channel(42.0), 0);
        assert_eq!(quantize_channel(43.0), 85);
        assert_eq!(quantize_channel(127.0), 85);
        assert_eq!(quantize_channel(128.0), 170);
        assert_eq!(quantize_channel(213.0), 255);
        assert_eq!(quantize_channel(255.0), 255);
    }

    #[test]
    fn test_step_clamps_out_of_range() {
        assert_eq!(quantize_channel(-127.5), 0);
        assert_eq!(quantize_channel(382.5), 255);
    }

    #[test]
    fn test_step_is_per_channel() {
        assert_eq!(quantize(10.0, 100.0, 240.0, None), [0, 85, 255]);
    }

    #[test]
    fn test_luminance_threshold_is_binary() {
        assert_eq!(quantize_luminance(100.0, 100.0, 100.0, None), [0, 0, 0]);
        assert_eq!(quantize_luminance(128.0, 128.0, 128.0, None), [255, 255, 255]);
        // Pure red is dark by luma even though one channel is saturated.
        assert_eq!(quantize_luminance(255.0, 0.0, 0.0, None), [0, 0, 0]);
    }

    #[test]
    fn test_paths_diverge_without_palette() {
        let step = quantize(100.0, 100.0, 100.0, None);
        let threshold = quantize_luminance(100.0, 100.0, 100.0, None);
        assert_eq!(step, [85, 85, 85]);
        assert_eq!(threshold, [0, 0, 0]);
    }

    #[test]
    fn test_palette_paths_agree() {
        let palette = Palette::new(vec![[0, 0, 0], [255, 0, 0], [255, 255, 255]]).unwrap();
        for v in [0.0, 60.0, 128.0, 200.0, 255.0] {
            assert_eq!(
                quantize(v, v / 2.0, 10.0, Some(&palette)),
                quantize_luminance(v, v / 2.0, 10.0, Some(&palette))
            );
        }
    }

    #[test]
    fn test_ink_and_paper_from_palette() {
        assert_eq!(ink_and_paper(None), ([0, 0, 0], [255, 255, 255]));
        let gameboy = Palette::new(vec![[15, 56, 15], [48, 98, 48], [155, 188, 15]]).unwrap();
        assert_eq!(ink_and_paper(Some(&gameboy)), ([15, 56, 15], [155, 188, 15]));
    }

    #[test]
    fn test_palette_quantization_idempotent() {
        let palette = Palette::new(vec![[0, 0, 0], [85, 255, 255], [255, 85, 255]]).unwrap();
        for r in (0..=255).step_by(17) {
            let q = quantize(r as f32, 128.0, 64.0, Some(&palette));
            let qq = quantize(q[0] as f32, q[1] as f32, q[2] as f32, Some(&palette));
            assert_eq!(q, qq);
        }
    }
}
