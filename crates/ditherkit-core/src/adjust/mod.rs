//! Image adjustment before quantization.
//!
//! The adjustment stage runs in two steps:
//!
//! 1. **Tone** ([`adjust`]) - contrast, then midtone and highlight lifts,
//!    in a single per-pixel pass
//! 2. **Blur** ([`box_blur`]) - optional box blur on R/G/B
//!
//! [`prepare`] runs both and is what every backend sees as its input, so
//! the GPU and CPU ditherers always start from identical bytes.
//!
//! # Example
//!
//! ```
//! use ditherkit_core::{adjust, DitherOptions, ImageBuffer};
//!
//! let image = ImageBuffer::filled(4, 4, [120, 130, 140, 255]);
//! let options = DitherOptions::new().contrast(80).blur(1);
//! let prepared = adjust::prepare(&image, &options);
//!
//! assert_eq!(prepared.width, 4);
//! // Alpha is never touched.
//! assert!(prepared.pixels.chunks_exact(4).all(|px| px[3] == 255));
//! ```

mod blur;
mod tone;

pub use blur::box_blur;
pub use tone::{adjust, contrast_factor, tone_factor, ToneCurve};

use crate::image::ImageBuffer;
use crate::options::DitherOptions;

/// Run the tone pass and the blur, returning a new buffer.
///
/// The input buffer is never modified.
pub fn prepare(image: &ImageBuffer, options: &DitherOptions) -> ImageBuffer {
    let mut out = adjust(image, options);
    if options.blur > 0 {
        box_blur(&mut out, options.blur);
    }
    out
}
