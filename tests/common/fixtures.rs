//! Test images and palettes.

use ditherkit::ImageBuffer;

/// Palette ids shipped with the engine
pub mod palettes {
    pub const MONOCHROME: &str = "monochrome";
    pub const GAMEBOY: &str = "gameboy";
    pub const CGA: &str = "cga";
    pub const C64: &str = "commodore64";
    pub const APPLE2: &str = "apple2";

    pub const ALL: [&str; 5] = [MONOCHROME, GAMEBOY, CGA, C64, APPLE2];
}

/// Horizontal grey ramp from black to white, opaque.
pub fn grey_ramp(width: u32, height: u32) -> ImageBuffer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for _ in 0..height {
        for x in 0..width {
            let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }
    }
    ImageBuffer::new(width, height, pixels).unwrap()
}

/// Colourful test card with a varying alpha channel.
pub fn test_card(width: u32, height: u32) -> ImageBuffer {
    let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        for x in 0..width {
            pixels.extend_from_slice(&[
                (x * 37 % 256) as u8,
                (y * 59 % 256) as u8,
                ((x + y) * 23 % 256) as u8,
                (128 + (x * 7 + y * 3) % 128) as u8,
            ]);
        }
    }
    ImageBuffer::new(width, height, pixels).unwrap()
}

/// A buffer whose length does not match its dimensions.
pub fn malformed() -> ImageBuffer {
    ImageBuffer {
        width: 4,
        height: 4,
        pixels: vec![0; 60],
    }
}
