//! The CPU pipeline: validate, adjust, dither.

use crate::adjust;
use crate::image::{BufferError, ImageBuffer};
use crate::options::DitherOptions;
use crate::palette::Palette;

/// Run the full pipeline on the calling thread.
///
/// The input is validated and left untouched; the result has the same
/// dimensions and alpha channel.
///
/// ```
/// use ditherkit_core::{pipeline, DitherOptions, ImageBuffer, Palette};
///
/// let image = ImageBuffer::filled(2, 1, [100, 100, 100, 255]);
/// let mono = Palette::from_hex(&["#000", "#fff"]).unwrap();
/// let out = pipeline::dither_cpu(&image, &DitherOptions::default(), Some(&mono)).unwrap();
///
/// assert_eq!(out.pixels, [0, 0, 0, 255, 255, 255, 255, 255]);
/// ```
pub fn dither_cpu(
    image: &ImageBuffer,
    options: &DitherOptions,
    palette: Option<&Palette>,
) -> Result<ImageBuffer, BufferError> {
    image.validate()?;
    let mut working = adjust::prepare(image, options);
    dither_prepared(&mut working, options, palette);
    Ok(working)
}

/// Dither an already-prepared buffer in place.
#[inline]
pub fn dither_prepared(image: &mut ImageBuffer, options: &DitherOptions, palette: Option<&Palette>) {
    options.algorithm.ditherer().dither(image, palette, options);
}
