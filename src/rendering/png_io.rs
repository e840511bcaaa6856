use crate::error::ImageIoError;
use ditherkit_core::ImageBuffer;
use std::io::Cursor;

/// Decode a PNG into an RGBA8 buffer.
///
/// Palette, low bit depth and 16-bit images are normalized to 8-bit
/// channels; grey and RGB images get an opaque alpha channel.
pub fn decode_png(data: &[u8]) -> Result<ImageBuffer, ImageIoError> {
    let mut decoder = png::Decoder::new(Cursor::new(data));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    let data = &buf[..frame.buffer_size()];

    let pixels = match frame.color_type {
        png::ColorType::Rgba => data.to_vec(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|c| [c[0], c[0], c[0], c[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().flat_map(|&g| [g, g, g, 255]).collect(),
        other => return Err(ImageIoError::UnsupportedColor(other)),
    };

    Ok(ImageBuffer::new(frame.width, frame.height, pixels)?)
}

/// Encode an RGBA8 buffer as PNG.
pub fn encode_png(image: &ImageBuffer) -> Result<Vec<u8>, ImageIoError> {
    image.validate()?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, image.width, image.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&image.pixels)?;
    }
    Ok(buf.into_inner())
}
