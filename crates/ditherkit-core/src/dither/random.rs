//! Random-threshold dithering.

use rand::Rng;

use crate::image::ImageBuffer;
use crate::options::DitherOptions;
use crate::palette::Palette;
use crate::quantize::quantize;

use super::Dither;

/// Adds uniform noise in `[-threshold/2, threshold/2)` to each pixel, then
/// quantizes. One noise value per pixel, shared by its three channels.
///
/// Output is not reproducible across calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomNoise;

impl Dither for RandomNoise {
    fn dither(&self, image: &mut ImageBuffer, palette: Option<&Palette>, options: &DitherOptions) {
        dither_with_rng(
            image,
            palette,
            options.random_threshold(),
            &mut rand::thread_rng(),
        );
    }
}

pub(crate) fn dither_with_rng<R: Rng + ?Sized>(
    image: &mut ImageBuffer,
    palette: Option<&Palette>,
    threshold: u8,
    rng: &mut R,
) {
    let amplitude = threshold as f32;
    for px in image.pixels.chunks_exact_mut(4) {
        let noise = (rng.gen::<f32>() - 0.5) * amplitude;
        let q = quantize(
            px[0] as f32 + noise,
            px[1] as f32 + noise,
            px[2] as f32 + noise,
            palette,
        );
        px[..3].copy_from_slice(&q);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_threshold_is_plain_quantization() {
        let mut image = ImageBuffer::filled(4, 4, [100, 30, 200, 255]);
        dither_with_rng(&mut image, None, 0, &mut StdRng::seed_from_u64(7));
        for px in image.pixels.chunks_exact(4) {
            assert_eq!(px, [85, 0, 170, 255]);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let source = ImageBuffer::filled(16, 16, [120, 120, 120, 255]);
        let mut a = source.clone();
        let mut b = source.clone();
        dither_with_rng(&mut a, None, 128, &mut StdRng::seed_from_u64(42));
        dither_with_rng(&mut b, None, 128, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_noise_stays_within_amplitude() {
        // 100 +/- 64 spans 36..164, so only levels 0, 85 and 170 are reachable.
        let mut image = ImageBuffer::filled(64, 64, [100, 100, 100, 255]);
        RandomNoise.dither(&mut image, None, &DitherOptions::default());
        let mut levels: Vec<u8> = image.pixels.chunks_exact(4).map(|px| px[0]).collect();
        levels.sort_unstable();
        levels.dedup();
        assert!(levels.iter().all(|l| [0, 85, 170].contains(l)), "{levels:?}");
        assert!(levels.contains(&85));
    }

    #[test]
    fn test_channels_share_noise() {
        let mut image = ImageBuffer::filled(32, 32, [100, 100, 100, 255]);
        RandomNoise.dither(&mut image, None, &DitherOptions::default());
        for px in image.pixels.chunks_exact(4) {
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
    }
}
