//! Configuration loading and types for wavrec
//!
//! Configuration is loaded in layers:
//! 1. Built-in defaults
//! 2. Config file (~/.config/wavrec/config.toml)
//! 3. Environment variables (WAVREC_*)
//! 4. CLI arguments (highest priority)
//!
//! The audio parameters are fixed for the lifetime of the process once
//! loaded; every recording session uses the same format.

use crate::error::WavrecError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file content
pub const DEFAULT_CONFIG: &str = r#"# Wavrec Configuration
#
# Location: ~/.config/wavrec/config.toml
# All settings can be overridden via CLI flags

[audio]
# Input device selection:
# - "auto": scan for a device whose name contains "USB" or "Microphone"
#   (the last match wins) and fall back to the system default
# - "default": always use the system default input device
# - anything else: match a device by name (exact first, then substring)
device = "auto"

# Sample rate in Hz
sample_rate = 44100

# Channel count (1 = mono)
channels = 1

# Samples per capture chunk
chunk_size = 1024

[output]
# Directory recordings are written to
# Filenames are recording_<YYYYMMDD_HHMMSS>.wav
dir = "."
"#;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub audio: AudioConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Audio capture configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AudioConfig {
    /// Device selection: "auto", "default", or a device name
    #[serde(default = "default_device")]
    pub device: String,

    /// Sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Channel count (1 = mono)
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Samples per capture chunk
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u32,
}

/// Recording output configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Directory recordings are written to
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_device() -> String {
    "auto".to_string()
}

fn default_sample_rate() -> u32 {
    44100
}

fn default_channels() -> u16 {
    1
}

fn default_chunk_size() -> u32 {
    1024
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            chunk_size: default_chunk_size(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio: AudioConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wavrec")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "wavrec")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}

/// Load configuration from file, with defaults for missing values
pub fn load_config(path: Option<&Path>) -> Result<Config, WavrecError> {
    // Start with defaults
    let mut config = Config::default();

    // Determine config file path
    let config_path = path.map(PathBuf::from).or_else(Config::default_path);

    // Load from file if it exists
    if let Some(ref path) = config_path {
        if path.exists() {
            tracing::debug!("Loading config from {:?}", path);
            let contents = std::fs::read_to_string(path)
                .map_err(|e| WavrecError::Config(format!("Failed to read config: {}", e)))?;

            config = toml::from_str(&contents)
                .map_err(|e| WavrecError::Config(format!("Invalid config: {}", e)))?;
        } else {
            tracing::debug!("Config file not found at {:?}, using defaults", path);
        }
    }

    // Override from environment variables
    if let Ok(device) = std::env::var("WAVREC_DEVICE") {
        config.audio.device = device;
    }
    if let Ok(dir) = std::env::var("WAVREC_OUTPUT_DIR") {
        config.output.dir = PathBuf::from(dir);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.audio.device, "auto");
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.audio.chunk_size, 1024);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_parse_config_toml() {
        let toml_str = r#"
            [audio]
            device = "USB Mic"
            sample_rate = 48000
            channels = 2
            chunk_size = 512

            [output]
            dir = "/tmp/recordings"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.device, "USB Mic");
        assert_eq!(config.audio.sample_rate, 48000);
        assert_eq!(config.audio.channels, 2);
        assert_eq!(config.audio.chunk_size, 512);
        assert_eq!(config.output.dir, PathBuf::from("/tmp/recordings"));
    }

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let toml_str = r#"
            [audio]
            device = "default"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.audio.device, "default");
        assert_eq!(config.audio.sample_rate, 44100);
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_default_config_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.audio.device, "auto");
        assert_eq!(config.audio.sample_rate, 44100);
    }
}
