use ditherkit_core::{BufferError, PaletteError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid image buffer: {0}")]
    InvalidBuffer(#[from] BufferError),

    #[error("Invalid palette: {0}")]
    Palette(#[from] PaletteError),

    #[error("Background worker unavailable")]
    WorkerUnavailable,

    #[error("Background worker failed: {0}")]
    Worker(String),
}

#[derive(Debug, Error)]
pub enum GpuError {
    #[error("GPU context lost")]
    ContextLost,

    #[error("Texture {width}x{height} exceeds maximum size {max}")]
    TextureTooLarge { width: u32, height: u32, max: u32 },

    #[error("Palette has {colors} colors (max {max})")]
    PaletteTooLarge { colors: usize, max: usize },

    #[error("Shader compile error: {0}")]
    Compile(String),

    #[error("Unknown texture: {0}")]
    UnknownTexture(u64),

    #[error("Unknown program: {0}")]
    UnknownProgram(u64),

    #[error("Invalid buffer: {0}")]
    Buffer(#[from] BufferError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColor(png::ColorType),

    #[error("Invalid buffer: {0}")]
    Buffer(#[from] BufferError),
}
