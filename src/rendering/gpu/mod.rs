//! Shader backend for the ordered and pattern ditherers.
//!
//! [`GpuBackend`] owns a [`GpuContext`] and caches one compiled program per
//! shader. Error diffusion is sequential by nature and always runs on the
//! CPU, even when the backend is selected.
//!
//! Every failure (lost context, limits exceeded, compile errors) is logged
//! and reported as `None`, so the caller falls back to the CPU path.

mod context;
mod shaders;
mod software;

pub use context::{GpuContext, GpuLimits, ProgramId, TextureId};
pub use shaders::{program_for, FragmentInput, ShaderProgram, TextureView, Uniforms};
pub use software::{ContextLossHandle, SoftwareContext};

use std::collections::HashMap;

use ditherkit_core::{pipeline, DitherOptions, ImageBuffer, Palette};

use crate::error::GpuError;

pub struct GpuBackend {
    context: Box<dyn GpuContext>,
    programs: HashMap<&'static str, ProgramId>,
}

impl GpuBackend {
    pub fn new(context: impl GpuContext + 'static) -> Self {
        Self {
            context: Box::new(context),
            programs: HashMap::new(),
        }
    }

    /// Backend over the rayon [`SoftwareContext`].
    pub fn software(limits: GpuLimits) -> Self {
        Self::new(SoftwareContext::new(limits))
    }

    pub fn is_available(&self) -> bool {
        !self.context.is_lost()
    }

    pub fn limits(&self) -> GpuLimits {
        self.context.limits()
    }

    /// Dither an already-adjusted image.
    ///
    /// Returns `None` when the backend cannot serve the call.
    pub fn dither(
        &mut self,
        prepared: &ImageBuffer,
        options: &DitherOptions,
        palette: Option<&Palette>,
    ) -> Option<ImageBuffer> {
        if !self.is_available() {
            tracing::debug!("GPU context lost, skipping shader path");
            self.programs.clear();
            return None;
        }
        let mut result = self.try_dither(prepared, options, palette);
        if matches!(result, Err(GpuError::UnknownProgram(_))) {
            // Lost and restored since the last call.
            tracing::debug!("Cached shader programs are gone, recompiling");
            self.programs.clear();
            result = self.try_dither(prepared, options, palette);
        }
        match result {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!(
                    algorithm = %options.algorithm,
                    error = %e,
                    "GPU dithering failed, falling back to CPU"
                );
                if matches!(e, GpuError::ContextLost | GpuError::UnknownProgram(_)) {
                    self.programs.clear();
                }
                None
            }
        }
    }

    fn try_dither(
        &mut self,
        prepared: &ImageBuffer,
        options: &DitherOptions,
        palette: Option<&Palette>,
    ) -> Result<ImageBuffer, GpuError> {
        let Some(program) = program_for(options.algorithm) else {
            let mut out = prepared.clone();
            pipeline::dither_prepared(&mut out, options, palette);
            return Ok(out);
        };

        let program_id = self.program(program)?;
        let uniforms = Uniforms::for_call(options, palette, rand::random());

        let input = self.context.upload(prepared)?;
        let result = self
            .context
            .draw(program_id, input, &uniforms)
            .and_then(|output| {
                let pixels = self.context.read_pixels(output);
                let released = self.context.release(output);
                let pixels = pixels?;
                released?;
                Ok(pixels)
            });
        let released = self.context.release(input);
        let pixels = result?;
        released?;

        Ok(ImageBuffer::new(prepared.width, prepared.height, pixels)?)
    }

    fn program(&mut self, program: &ShaderProgram) -> Result<ProgramId, GpuError> {
        if let Some(&id) = self.programs.get(program.name) {
            return Ok(id);
        }
        let id = self.context.compile(program)?;
        tracing::debug!(program = program.name, "Compiled shader program");
        self.programs.insert(program.name, id);
        Ok(id)
    }
}
