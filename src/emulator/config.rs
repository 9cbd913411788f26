// Configuration management
//
// User-facing settings persisted as TOML next to the executable. Missing or
// unreadable files fall back to defaults so a fresh checkout runs without
// setup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;

/// Default configuration file path
const CONFIG_FILE: &str = "nescore.toml";

/// Emulator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmulatorConfig {
    /// Video settings
    pub video: VideoConfig,

    /// Screenshot settings
    pub screenshot: ScreenshotConfig,
}

/// Video configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    /// Integer window scale (1-8)
    pub scale: u32,

    /// Enable VSync
    pub vsync: bool,

    /// Target frame rate (60 for NTSC)
    pub fps: u32,
}

/// Screenshot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreenshotConfig {
    /// Directory screenshots are written to
    pub directory: PathBuf,

    /// Include a timestamp in the filename
    pub include_timestamp: bool,
}

impl Default for EmulatorConfig {
    fn default() -> Self {
        EmulatorConfig {
            video: VideoConfig {
                scale: 3,
                vsync: true,
                fps: 60,
            },
            screenshot: ScreenshotConfig {
                directory: PathBuf::from("screenshots"),
                include_timestamp: true,
            },
        }
    }
}

impl EmulatorConfig {
    /// Load the configuration file, or defaults when absent or invalid
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Load the configuration file
    pub fn load() -> Result<Self, io::Error> {
        let contents = fs::read_to_string(CONFIG_FILE)?;
        toml::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Write the configuration back to disk
    pub fn save(&self) -> Result<(), io::Error> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(CONFIG_FILE, contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert_eq!(config.video.scale, 3);
        assert!(config.video.vsync);
        assert_eq!(config.video.fps, 60);
    }

    #[test]
    fn test_config_roundtrips_through_toml() {
        let config = EmulatorConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: EmulatorConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.video.scale, config.video.scale);
        assert_eq!(parsed.screenshot.directory, config.screenshot.directory);
    }
}
