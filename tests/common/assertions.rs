//! Assertion helpers for tests.

use ditherkit::{ImageBuffer, Palette};
use pretty_assertions::assert_eq;

/// Assert two images have the same shape and alpha channel.
pub fn assert_same_shape_and_alpha(output: &ImageBuffer, input: &ImageBuffer) {
    assert_eq!((output.width, output.height), (input.width, input.height));
    assert_eq!(output.pixels.len(), input.pixels.len());
    let alpha = |img: &ImageBuffer| img.pixels.chunks_exact(4).map(|px| px[3]).collect::<Vec<_>>();
    assert_eq!(alpha(output), alpha(input), "alpha channel changed");
}

/// Assert every pixel's colour is a palette entry.
pub fn assert_in_palette(image: &ImageBuffer, palette: &Palette) {
    for (i, px) in image.pixels.chunks_exact(4).enumerate() {
        assert!(
            palette.contains([px[0], px[1], px[2]]),
            "pixel {i} = {:?} is not in the palette",
            &px[..3]
        );
    }
}

/// Largest per-channel (RGB) difference between two equally sized images.
pub fn max_channel_diff(a: &ImageBuffer, b: &ImageBuffer) -> u8 {
    assert_eq!(a.pixels.len(), b.pixels.len());
    a.pixels
        .chunks_exact(4)
        .zip(b.pixels.chunks_exact(4))
        .flat_map(|(pa, pb)| (0..3).map(move |c| pa[c].abs_diff(pb[c])))
        .max()
        .unwrap_or(0)
}
