//! Box blur with edge-clipped windows.
//!
//! Each output channel is the mean over the `(2r+1)×(2r+1)` window around
//! the pixel, clipped at the image edges (fewer samples near borders, no
//! wrap-around, no edge replication). Two separable passes over integer
//! prefix sums keep the cost independent of the radius; window sums and
//! sample counts stay exact until the final division, so the result equals
//! the 2-D clipped mean.

use crate::image::{clamp_channel, ImageBuffer, CHANNELS};

/// Inclusive window `[lo, hi]` around `i`, clipped to `0..len`.
#[inline]
fn window(i: usize, radius: usize, len: usize) -> (usize, usize) {
    (i.saturating_sub(radius), (i + radius).min(len - 1))
}

/// Blur R/G/B in place. Alpha is left untouched. A radius of 0 is a no-op.
pub fn box_blur(image: &mut ImageBuffer, radius: u32) {
    let width = image.width as usize;
    let height = image.height as usize;
    if radius == 0 || width == 0 || height == 0 {
        return;
    }
    let r = radius as usize;

    // Horizontal pass: window sums per pixel and channel.
    let mut row_sums = vec![0u64; width * height * 3];
    let mut prefix = vec![0u64; width + 1];
    for y in 0..height {
        for c in 0..3 {
            for x in 0..width {
                prefix[x + 1] = prefix[x] + image.pixels[(y * width + x) * CHANNELS + c] as u64;
            }
            for x in 0..width {
                let (lo, hi) = window(x, r, width);
                row_sums[(y * width + x) * 3 + c] = prefix[hi + 1] - prefix[lo];
            }
        }
    }

    // Vertical pass over the row sums, then one division per channel.
    let mut prefix = vec![0u64; height + 1];
    for x in 0..width {
        let (x_lo, x_hi) = window(x, r, width);
        let columns = (x_hi - x_lo + 1) as u64;
        for c in 0..3 {
            for y in 0..height {
                prefix[y + 1] = prefix[y] + row_sums[(y * width + x) * 3 + c];
            }
            for y in 0..height {
                let (lo, hi) = window(y, r, height);
                let count = columns * (hi - lo + 1) as u64;
                let mean = (prefix[hi + 1] - prefix[lo]) as f64 / count as f64;
                image.pixels[(y * width + x) * CHANNELS + c] = clamp_channel(mean as f32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct 2-D clipped mean for comparison.
    fn naive_blur(image: &ImageBuffer, radius: usize) -> Vec<u8> {
        let (w, h) = (image.width as usize, image.height as usize);
        let mut out = image.pixels.clone();
        for y in 0..h {
            for x in 0..w {
                for c in 0..3 {
                    let mut sum = 0.0f64;
                    let mut count = 0.0f64;
                    for yy in y.saturating_sub(radius)..=(y + radius).min(h - 1) {
                        for xx in x.saturating_sub(radius)..=(x + radius).min(w - 1) {
                            sum += image.pixels[(yy * w + xx) * 4 + c] as f64;
                            count += 1.0;
                        }
                    }
                    out[(y * w + x) * 4 + c] = clamp_channel((sum / count) as f32);
                }
            }
        }
        out
    }

    fn gradient(width: u32, height: u32) -> ImageBuffer {
        let mut pixels = Vec::new();
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[
                    (x * 37 % 256) as u8,
                    (y * 53 % 256) as u8,
                    ((x * y) % 256) as u8,
                    (x + y) as u8,
                ]);
            }
        }
        ImageBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_radius_zero_is_noop() {
        let mut image = gradient(5, 4);
        let before = image.clone();
        box_blur(&mut image, 0);
        assert_eq!(image, before);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let mut image = ImageBuffer::filled(6, 5, [77, 130, 201, 255]);
        let before = image.clone();
        box_blur(&mut image, 2);
        assert_eq!(image, before);
    }

    #[test]
    fn test_matches_clipped_2d_mean() {
        for radius in [1, 2, 5] {
            let image = gradient(7, 6);
            let expected = naive_blur(&image, radius);
            let mut blurred = image.clone();
            box_blur(&mut blurred, radius as u32);
            assert_eq!(blurred.pixels, expected, "radius {radius}");
        }
    }

    #[test]
    fn test_alpha_preserved() {
        let image = gradient(5, 5);
        let mut blurred = image.clone();
        box_blur(&mut blurred, 3);
        for (a, b) in image.pixels.chunks_exact(4).zip(blurred.pixels.chunks_exact(4)) {
            assert_eq!(a[3], b[3]);
        }
    }

    #[test]
    fn test_edge_uses_fewer_samples() {
        // 3x1: [0, 90, 180]. Radius 1 at x=0 averages two samples, not three.
        let mut image = ImageBuffer::new(
            3,
            1,
            vec![0, 0, 0, 255, 90, 90, 90, 255, 180, 180, 180, 255],
        )
        .unwrap();
        box_blur(&mut image, 1);
        assert_eq!(image.pixels[0], 45);
        assert_eq!(image.pixels[4], 90);
        assert_eq!(image.pixels[8], 135);
    }
}
