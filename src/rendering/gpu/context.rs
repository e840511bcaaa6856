use ditherkit_core::ImageBuffer;

use super::shaders::{ShaderProgram, Uniforms};
use crate::error::GpuError;

/// Handle to a compiled program inside one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramId(pub u64);

/// Handle to a texture inside one context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Hardware limits a context reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuLimits {
    /// Largest accepted texture side in pixels
    pub max_texture_size: u32,
    /// Largest palette uniform array
    pub max_palette_colors: usize,
}

impl Default for GpuLimits {
    fn default() -> Self {
        Self {
            max_texture_size: 8192,
            max_palette_colors: 64,
        }
    }
}

/// A rendering context able to run fragment programs over RGBA textures.
///
/// Every operation fails with [`GpuError::ContextLost`] once the context
/// has been lost. Callers own texture lifetimes and must `release` what
/// they upload or draw.
pub trait GpuContext: Send {
    fn is_lost(&self) -> bool;

    fn limits(&self) -> GpuLimits;

    fn compile(&mut self, program: &ShaderProgram) -> Result<ProgramId, GpuError>;

    fn upload(&mut self, image: &ImageBuffer) -> Result<TextureId, GpuError>;

    /// Run `program` once per texel of `input`, returning a new texture of
    /// the same size.
    fn draw(
        &mut self,
        program: ProgramId,
        input: TextureId,
        uniforms: &Uniforms,
    ) -> Result<TextureId, GpuError>;

    /// Read a texture back as RGBA8.
    fn read_pixels(&mut self, texture: TextureId) -> Result<Vec<u8>, GpuError>;

    fn release(&mut self, texture: TextureId) -> Result<(), GpuError>;
}
