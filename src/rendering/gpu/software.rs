//! Reference [`GpuContext`] that runs fragment programs on the CPU.
//!
//! Rows are shaded in parallel with rayon. Texels are stored as normalized
//! `f32` (`byte / 255`) and read back with `round(clamp(c) * 255)`, which
//! is where the float path can land one level away from the byte path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use ditherkit_core::ImageBuffer;
use rayon::prelude::*;

use super::context::{GpuContext, GpuLimits, ProgramId, TextureId};
use super::shaders::{FragmentInput, ShaderProgram, TextureView, Uniforms};
use crate::error::GpuError;

struct Texture {
    width: u32,
    height: u32,
    texels: Vec<f32>,
}

#[derive(Debug, Default)]
struct LossState {
    lost: AtomicBool,
    losses: AtomicU64,
}

/// Marks a [`SoftwareContext`] as lost from outside, the way a browser or
/// driver can drop a real context at any time.
///
/// Losing the context invalidates every program and texture created before
/// the loss, even if it is restored before the next call.
#[derive(Debug, Clone)]
pub struct ContextLossHandle(Arc<LossState>);

impl ContextLossHandle {
    pub fn lose(&self) {
        if !self.0.lost.swap(true, Ordering::SeqCst) {
            self.0.losses.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn restore(&self) {
        self.0.lost.store(false, Ordering::SeqCst);
    }
}

pub struct SoftwareContext {
    limits: GpuLimits,
    loss: Arc<LossState>,
    seen_losses: u64,
    programs: HashMap<ProgramId, ShaderProgram>,
    next_program: u64,
    textures: HashMap<TextureId, Texture>,
    next_texture: u64,
}

impl SoftwareContext {
    pub fn new(limits: GpuLimits) -> Self {
        Self {
            limits,
            loss: Arc::default(),
            seen_losses: 0,
            programs: HashMap::new(),
            next_program: 0,
            textures: HashMap::new(),
            next_texture: 0,
        }
    }

    pub fn loss_handle(&self) -> ContextLossHandle {
        ContextLossHandle(self.loss.clone())
    }

    /// Number of live textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of compiled programs.
    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Drop everything created before the latest loss.
    fn discard_lost_resources(&mut self) {
        let losses = self.loss.losses.load(Ordering::SeqCst);
        if losses != self.seen_losses {
            self.seen_losses = losses;
            self.programs.clear();
            self.textures.clear();
        }
    }

    fn ensure_alive(&mut self) -> Result<(), GpuError> {
        self.discard_lost_resources();
        if self.is_lost() {
            return Err(GpuError::ContextLost);
        }
        Ok(())
    }

    fn store(&mut self, texture: Texture) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.textures.insert(id, texture);
        id
    }
}

impl Default for SoftwareContext {
    fn default() -> Self {
        Self::new(GpuLimits::default())
    }
}

impl GpuContext for SoftwareContext {
    fn is_lost(&self) -> bool {
        self.loss.lost.load(Ordering::SeqCst)
    }

    fn limits(&self) -> GpuLimits {
        self.limits
    }

    fn compile(&mut self, program: &ShaderProgram) -> Result<ProgramId, GpuError> {
        self.ensure_alive()?;
        let id = ProgramId(self.next_program);
        self.next_program += 1;
        self.programs.insert(id, *program);
        Ok(id)
    }

    fn upload(&mut self, image: &ImageBuffer) -> Result<TextureId, GpuError> {
        self.ensure_alive()?;
        image.validate()?;
        let max = self.limits.max_texture_size;
        if image.width > max || image.height > max {
            return Err(GpuError::TextureTooLarge {
                width: image.width,
                height: image.height,
                max,
            });
        }
        let texels = image.pixels.iter().map(|&b| b as f32 / 255.0).collect();
        Ok(self.store(Texture {
            width: image.width,
            height: image.height,
            texels,
        }))
    }

    fn draw(
        &mut self,
        program: ProgramId,
        input: TextureId,
        uniforms: &Uniforms,
    ) -> Result<TextureId, GpuError> {
        self.ensure_alive()?;
        if uniforms.palette.len() > self.limits.max_palette_colors {
            return Err(GpuError::PaletteTooLarge {
                colors: uniforms.palette.len(),
                max: self.limits.max_palette_colors,
            });
        }
        let program = *self
            .programs
            .get(&program)
            .ok_or(GpuError::UnknownProgram(program.0))?;
        let source = self
            .textures
            .get(&input)
            .ok_or(GpuError::UnknownTexture(input.0))?;

        let (width, height) = (source.width, source.height);
        let view = TextureView::new(width, height, &source.texels);
        let mut texels = vec![0.0f32; source.texels.len()];
        let row_len = width as usize * 4;
        if row_len > 0 {
            texels
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| {
                    for x in 0..width {
                        let out = (program.fragment)(&FragmentInput {
                            x,
                            y: y as u32,
                            texture: view,
                            uniforms,
                        });
                        let i = x as usize * 4;
                        row[i..i + 4].copy_from_slice(&out);
                    }
                });
        }

        Ok(self.store(Texture {
            width,
            height,
            texels,
        }))
    }

    fn read_pixels(&mut self, texture: TextureId) -> Result<Vec<u8>, GpuError> {
        self.ensure_alive()?;
        let texture = self
            .textures
            .get(&texture)
            .ok_or(GpuError::UnknownTexture(texture.0))?;
        Ok(texture
            .texels
            .iter()
            .map(|&c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect())
    }

    fn release(&mut self, texture: TextureId) -> Result<(), GpuError> {
        // Releasing never fails on a lost context so callers can clean up.
        self.discard_lost_resources();
        if self.is_lost() {
            self.textures.remove(&texture);
            return Ok(());
        }
        self.textures
            .remove(&texture)
            .map(|_| ())
            .ok_or(GpuError::UnknownTexture(texture.0))
    }
}
