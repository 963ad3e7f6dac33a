//! Configuration for calcore.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::requests::AngleMode;
use crate::CalcoreResult;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "calcore.toml";

/// Main configuration for calcore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Evaluation engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Cache settings.
    #[serde(default)]
    pub cache: CacheConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Evaluation engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Maximum expression length (in characters).
    #[serde(default = "default_max_expression_length")]
    pub max_expression_length: usize,

    /// Significant digits used when formatting results.
    #[serde(default = "default_precision")]
    pub default_precision: usize,

    /// Upper bound accepted for a requested precision.
    #[serde(default = "default_max_precision")]
    pub max_precision: usize,

    /// Angle mode used when none is given.
    #[serde(default)]
    pub default_angle_mode: AngleMode,

    /// Try the `<number> <op> <number>` shortcut before the full pipeline.
    #[serde(default = "default_true")]
    pub quick_path: bool,
}

impl EngineConfig {
    /// Clamps a requested precision into `1..=max_precision`.
    pub fn clamp_precision(&self, precision: Option<usize>) -> usize {
        precision
            .unwrap_or(self.default_precision)
            .clamp(1, self.max_precision.max(1))
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_expression_length: default_max_expression_length(),
            default_precision: default_precision(),
            max_precision: default_max_precision(),
            default_angle_mode: AngleMode::default(),
            quick_path: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_max_expression_length() -> usize {
    500
}

fn default_precision() -> usize {
    10
}

fn default_max_precision() -> usize {
    15
}

/// Evaluation cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum cache capacity (number of entries).
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    100
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> CalcoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CalcoreResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            engine: EngineConfig::default(),
            cache: CacheConfig::default(),
        }
    }

    /// User-level configuration path (`~/.config/calcore/calcore.toml` on Linux).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("calcore").join(CONFIG_FILE_NAME))
    }

    /// Resolves which file to read: the given path if it exists, then the
    /// user-level file.
    pub fn resolve_path(path: &Path) -> Option<PathBuf> {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        Self::user_config_path().filter(|p| p.exists())
    }

    /// Tries to load configuration from current directory or uses default.
    pub fn load_or_default() -> Self {
        match Self::resolve_path(Path::new(CONFIG_FILE_NAME)) {
            Some(path) => Self::load(&path).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Invalid config, using defaults");
                Self::default_config()
            }),
            None => Self::default_config(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.engine.max_expression_length, 500);
        assert_eq!(config.engine.default_precision, 10);
        assert_eq!(config.engine.default_angle_mode, AngleMode::Degrees);
        assert_eq!(config.cache.capacity, 100);
        assert!(config.cache.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [engine]
            default_angle_mode = "rad"

            [cache]
            capacity = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.engine.default_angle_mode, AngleMode::Radians);
        assert_eq!(config.engine.max_expression_length, 500);
        assert_eq!(config.cache.capacity, 8);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::default();
        config.engine.quick_path = false;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert!(!loaded.engine.quick_path);
    }

    #[test]
    fn test_clamp_precision() {
        let engine = EngineConfig::default();
        assert_eq!(engine.clamp_precision(None), 10);
        assert_eq!(engine.clamp_precision(Some(0)), 1);
        assert_eq!(engine.clamp_precision(Some(40)), 15);
    }
}
