use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::flatten::Separator;

/// Main flatwatch configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub flatten: FlattenConfig,
    pub log_level: LogLevel,
}

/// Flattening defaults; overridable per invocation with CLI flags
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlattenConfig {
    /// Emit flattened maps (true) or raw documents (false)
    pub enabled: bool,
    /// Separator between object-key path segments
    pub separator: Separator,
    /// Root prefix for every flattened path
    pub prefix: String,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            separator: Separator::default(),
            prefix: "flatwatch".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            let path = Self::expand_path(path);
            return Self::load_from_file(&path).context(format!("Failed to load config from {}", path.display()));
        }

        // Check FLATWATCH_CONFIG env var
        if let Ok(env_path) = std::env::var("FLATWATCH_CONFIG") {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from FLATWATCH_CONFIG: {}", e);
                    }
                }
            }
        }

        // Try FLATWATCH_DIR/flatwatch.yaml
        if let Ok(flatwatch_dir) = std::env::var("FLATWATCH_DIR") {
            let path = PathBuf::from(flatwatch_dir).join("flatwatch.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from FLATWATCH_DIR: {}", e);
                    }
                }
            }
        }

        // Try ~/.config/flatwatch/flatwatch.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("flatwatch").join("flatwatch.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./flatwatch.yaml (for development)
        let local_config = PathBuf::from("flatwatch.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
