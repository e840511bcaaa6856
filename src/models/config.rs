use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the config file when `--config` is not given.
pub const CONFIG_ENV: &str = "DITHERKIT_CONFIG";

/// Engine configuration loaded from YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Shader backend settings
    pub gpu: GpuConfig,

    /// Background worker settings
    pub worker: WorkerConfig,

    /// Extra palettes registered at startup
    pub palettes: Vec<PaletteConfig>,
}

/// Shader backend settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuConfig {
    pub enabled: bool,

    /// Largest accepted texture side in pixels
    pub max_texture_size: u32,

    /// Largest palette the shaders accept as a uniform array
    pub max_palette_colors: usize,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_texture_size: default_max_texture_size(),
            max_palette_colors: default_max_palette_colors(),
        }
    }
}

fn default_max_texture_size() -> u32 {
    8192
}

fn default_max_palette_colors() -> usize {
    64
}

/// Background worker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    pub enabled: bool,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A palette defined in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    pub id: String,

    /// Display name (defaults to the id)
    #[serde(default)]
    pub name: Option<String>,

    /// Hex colours, e.g. "#2b1d0e"
    pub colors: Vec<String>,
}

impl EngineConfig {
    /// Parse configuration from a YAML string
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Read and parse a YAML config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration, falling back to defaults on any failure.
    ///
    /// `path` wins over the `DITHERKIT_CONFIG` environment variable. With
    /// neither set the defaults are used silently.
    pub fn load(path: Option<&Path>) -> Self {
        let env_path = std::env::var_os(CONFIG_ENV);
        let Some(path) = path.or(env_path.as_deref().map(Path::new)) else {
            return Self::default();
        };

        match Self::from_file(path) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    palettes = config.palettes.len(),
                    gpu = config.gpu.enabled,
                    worker = config.worker.enabled,
                    "Loaded configuration"
                );
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert!(config.gpu.enabled);
        assert_eq!(config.gpu.max_texture_size, 8192);
        assert_eq!(config.gpu.max_palette_colors, 64);
        assert!(config.worker.enabled);
        assert!(config.palettes.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r##"
gpu:
  enabled: false
  max_texture_size: 4096
  max_palette_colors: 16
worker:
  enabled: false
palettes:
  - id: sepia
    name: Sepia
    colors: ["#2b1d0e", "#7a5230", "#d9b98c", "#fff4e0"]
"##;
        let config = EngineConfig::from_yaml_str(yaml).unwrap();

        assert!(!config.gpu.enabled);
        assert_eq!(config.gpu.max_texture_size, 4096);
        assert_eq!(config.gpu.max_palette_colors, 16);
        assert!(!config.worker.enabled);
        assert_eq!(config.palettes.len(), 1);
        assert_eq!(config.palettes[0].id, "sepia");
        assert_eq!(config.palettes[0].name.as_deref(), Some("Sepia"));
        assert_eq!(config.palettes[0].colors.len(), 4);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let yaml = "gpu:\n  max_palette_colors: 8\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();

        assert!(config.gpu.enabled);
        assert_eq!(config.gpu.max_texture_size, 8192);
        assert_eq!(config.gpu.max_palette_colors, 8);
        assert!(config.worker.enabled);
    }

    #[test]
    fn test_palette_name_optional() {
        let yaml = "palettes:\n  - id: duo\n    colors: [\"#000\", \"#fff\"]\n";
        let config = EngineConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.palettes[0].name, None);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "worker:\n  enabled: false").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert!(!config.worker.enabled);
        assert!(config.gpu.enabled);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(Some(&dir.path().join("missing.yaml")));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_invalid_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "gpu: [this, is, not, a, map]").unwrap();

        let config = EngineConfig::load(Some(file.path()));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_from_file_missing_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read(_)));
    }
}
