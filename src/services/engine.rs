use std::sync::{Arc, Mutex};

use ditherkit_core::{adjust, pipeline, AlgorithmInfo, DitherOptions, ImageBuffer, Palette};

use super::palette_registry::{PaletteInfo, PaletteRegistry};
use super::worker::DitherWorker;
use crate::error::EngineError;
use crate::models::EngineConfig;
use crate::rendering::gpu::{GpuBackend, GpuLimits};

/// Entry point for dithering.
///
/// Each call resolves its palette from the registry, runs the adjustment
/// stage and then tries the GPU backend before falling back to the CPU.
/// The async entry point uses the background worker as its CPU path.
pub struct DitherEngine {
    registry: Arc<PaletteRegistry>,
    gpu: Option<Mutex<GpuBackend>>,
    worker: Option<DitherWorker>,
}

impl Default for DitherEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DitherEngine {
    /// CPU-only engine with the built-in palettes.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(PaletteRegistry::with_builtins()),
            gpu: None,
            worker: None,
        }
    }

    /// Build an engine from configuration.
    ///
    /// Config palettes that fail to parse are skipped with a warning. A
    /// worker that fails to start leaves the engine on the CPU path.
    pub fn from_config(config: &EngineConfig) -> Self {
        let registry = PaletteRegistry::with_builtins();
        for palette in &config.palettes {
            if let Err(e) = registry.register_hex(&palette.id, palette.name.clone(), &palette.colors) {
                tracing::warn!(id = %palette.id, error = %e, "Skipping invalid palette from config");
            }
        }

        let mut engine = Self::new().with_registry(Arc::new(registry));

        if config.gpu.enabled {
            engine = engine.with_gpu(GpuBackend::software(GpuLimits {
                max_texture_size: config.gpu.max_texture_size,
                max_palette_colors: config.gpu.max_palette_colors,
            }));
        }

        if config.worker.enabled {
            match DitherWorker::spawn() {
                Ok(worker) => engine = engine.with_worker(worker),
                Err(e) => tracing::warn!(error = %e, "Background worker not started"),
            }
        }

        engine
    }

    pub fn with_gpu(mut self, backend: GpuBackend) -> Self {
        self.gpu = Some(Mutex::new(backend));
        self
    }

    pub fn with_worker(mut self, worker: DitherWorker) -> Self {
        self.worker = Some(worker);
        self
    }

    pub fn with_registry(mut self, registry: Arc<PaletteRegistry>) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &Arc<PaletteRegistry> {
        &self.registry
    }

    pub fn has_gpu(&self) -> bool {
        self.gpu.is_some()
    }

    pub fn has_worker(&self) -> bool {
        self.worker.as_ref().is_some_and(DitherWorker::is_running)
    }

    /// Dither on the calling thread (GPU first, then CPU).
    ///
    /// The input is never modified. The output has the same dimensions and
    /// alpha channel.
    pub fn apply_dithering(
        &self,
        image: &ImageBuffer,
        options: &DitherOptions,
    ) -> Result<ImageBuffer, EngineError> {
        image.validate()?;
        let palette = self.resolve_palette(options);
        let mut prepared = adjust::prepare(image, options);

        if let Some(out) = self.try_gpu(&prepared, options, palette.as_deref()) {
            return Ok(out);
        }

        tracing::debug!(algorithm = %options.algorithm, "Dithering on CPU");
        pipeline::dither_prepared(&mut prepared, options, palette.as_deref());
        Ok(prepared)
    }

    /// Dither using the GPU, then the background worker, then the calling
    /// thread.
    pub async fn apply_dithering_async(
        &self,
        image: ImageBuffer,
        options: DitherOptions,
    ) -> Result<ImageBuffer, EngineError> {
        image.validate()?;
        let palette = self.resolve_palette(&options);

        if self.gpu.is_some() {
            let prepared = adjust::prepare(&image, &options);
            if let Some(out) = self.try_gpu(&prepared, &options, palette.as_deref()) {
                return Ok(out);
            }
        }

        if let Some(worker) = &self.worker {
            let colors = palette.as_ref().map(|p| p.colors().to_vec());
            tracing::debug!(algorithm = %options.algorithm, "Dithering on background worker");
            match worker.dither(image.clone(), options.clone(), colors).await {
                Err(EngineError::WorkerUnavailable) => {
                    tracing::warn!("Background worker unavailable, dithering on caller thread");
                }
                other => return other,
            }
        } else {
            tracing::debug!(algorithm = %options.algorithm, "No background worker, dithering on CPU");
        }

        Ok(pipeline::dither_cpu(&image, &options, palette.as_deref())?)
    }

    /// Register or replace a palette from hex colours.
    pub fn register_palette<S: AsRef<str>>(&self, id: &str, colors: &[S]) -> Result<(), EngineError> {
        self.registry.register_hex(id, None, colors)?;
        Ok(())
    }

    pub fn list_algorithms(&self) -> Vec<AlgorithmInfo> {
        ditherkit_core::list_algorithms()
    }

    pub fn list_palettes(&self) -> Vec<PaletteInfo> {
        self.registry.list()
    }

    pub fn palette_colors(&self, id: &str) -> Option<Vec<String>> {
        self.registry.colors_hex(id)
    }

    fn resolve_palette(&self, options: &DitherOptions) -> Option<Arc<Palette>> {
        let id = options.palette.as_deref()?;
        let palette = self.registry.get(id);
        if palette.is_none() {
            tracing::debug!(palette = id, "Unknown palette, dithering without one");
        }
        palette
    }

    fn try_gpu(
        &self,
        prepared: &ImageBuffer,
        options: &DitherOptions,
        palette: Option<&Palette>,
    ) -> Option<ImageBuffer> {
        let gpu = self.gpu.as_ref()?;
        let mut backend = match gpu.lock() {
            Ok(backend) => backend,
            Err(_) => {
                tracing::warn!("GPU backend lock poisoned, treating GPU as unavailable");
                return None;
            }
        };
        let out = backend.dither(prepared, options, palette)?;
        tracing::debug!(algorithm = %options.algorithm, "Dithered on GPU");
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ditherkit_core::AlgorithmId;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unknown_palette_dithers_without_one() {
        let engine = DitherEngine::new();
        let image = ImageBuffer::filled(4, 4, [120, 60, 200, 255]);
        let options = DitherOptions::new().algorithm(AlgorithmId::Atkinson);

        let unknown = engine
            .apply_dithering(&image, &options.clone().palette("does-not-exist"))
            .unwrap();
        let none = engine.apply_dithering(&image, &options).unwrap();
        assert_eq!(unknown, none);
    }

    #[test]
    fn test_from_config_registers_palettes() {
        let config = EngineConfig::from_yaml_str(
            r##"
gpu:
  enabled: false
worker:
  enabled: true
palettes:
  - id: sepia
    name: Sepia
    colors: ["#2b1d0e", "#fff4e0"]
  - id: broken
    colors: ["#nothex"]
"##,
        )
        .unwrap();
        let engine = DitherEngine::from_config(&config);

        assert!(!engine.has_gpu());
        // The worker does not need a runtime to start.
        assert!(engine.has_worker());
        assert_eq!(
            engine.palette_colors("sepia"),
            Some(vec!["#2b1d0e".to_string(), "#fff4e0".to_string()])
        );
        assert!(engine.palette_colors("broken").is_none());
        assert_eq!(engine.list_palettes().last().unwrap().name, "Sepia");
    }

    #[test]
    fn test_register_palette_errors() {
        let engine = DitherEngine::new();
        assert!(matches!(
            engine.register_palette("x", &["#12345"]),
            Err(EngineError::Palette(_))
        ));
        let empty: [&str; 0] = [];
        assert!(matches!(
            engine.register_palette("x", &empty),
            Err(EngineError::Palette(_))
        ));
    }

    #[test]
    fn test_list_algorithms() {
        let engine = DitherEngine::new();
        assert_eq!(engine.list_algorithms().len(), 13);
    }
}
