//! Engine configuration (window and screenshot captures), stored as RON

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use crate::rasterizer::{HEIGHT, WIDTH};

/// Error type for config operations
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl From<ron::Error> for ConfigError {
    fn from(e: ron::Error) -> Self {
        ConfigError::SerializeError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::ParseError(e) => Some(e),
            ConfigError::SerializeError(e) => Some(e),
        }
    }
}

/// Window and canvas setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Canvas width in pixels
    pub width: usize,
    /// Canvas height in pixels
    pub height: usize,
    /// Integer upscale from canvas to window
    pub scale: u32,
    pub high_dpi: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Square-io".to_string(),
            width: WIDTH,
            height: HEIGHT,
            scale: 3,
            high_dpi: false,
        }
    }
}

impl WindowConfig {
    /// Window size in physical pixels
    pub fn window_size(&self) -> (i32, i32) {
        let scale = self.scale.max(1) as i32;
        (self.width as i32 * scale, self.height as i32 * scale)
    }
}

/// Where screenshots go and how they are numbered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub directory: PathBuf,
    pub prefix: String,
    /// Number given to the next screenshot
    pub count: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("captures"),
            prefix: "capture".to_string(),
            count: 0,
        }
    }
}

impl CaptureConfig {
    /// `directory/prefix{count}.png` for the next capture
    pub fn current_path(&self) -> PathBuf {
        self.directory.join(format!("{}{}.png", self.prefix, self.count))
    }

    /// Mark the current capture as taken
    pub fn advance(&mut self) {
        self.count = self.count.saturating_add(1);
    }

    /// `current_path`, then advance the counter
    pub fn next_path(&mut self) -> PathBuf {
        let path = self.current_path();
        self.advance();
        path
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub window: WindowConfig,
    pub captures: CaptureConfig,
}

/// Load the config from a RON file. A missing file gives the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<EngineConfig, ConfigError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => load_config_from_str(&contents),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("No config at {}, using defaults", path.display());
            Ok(EngineConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse a config from a RON string
pub fn load_config_from_str(s: &str) -> Result<EngineConfig, ConfigError> {
    Ok(ron::from_str(s)?)
}

/// Save the config to a RON file
pub fn save_config<P: AsRef<Path>>(config: &EngineConfig, path: P) -> Result<(), ConfigError> {
    let pretty = ron::ser::PrettyConfig::new()
        .depth_limit(3)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(config, pretty)?;
    fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_path_advances_count() {
        let mut captures = CaptureConfig {
            directory: PathBuf::from("shots"),
            prefix: "frame".to_string(),
            count: 7,
        };
        assert_eq!(captures.next_path(), Path::new("shots").join("frame7.png"));
        assert_eq!(captures.next_path(), Path::new("shots").join("frame8.png"));
        assert_eq!(captures.count, 9);
    }

    #[test]
    fn test_current_path_keeps_count() {
        let mut captures = CaptureConfig {
            directory: PathBuf::from("shots"),
            prefix: "frame".to_string(),
            count: 3,
        };
        assert_eq!(captures.current_path(), Path::new("shots").join("frame3.png"));
        assert_eq!(captures.current_path(), Path::new("shots").join("frame3.png"));
        assert_eq!(captures.count, 3);
        captures.advance();
        assert_eq!(captures.current_path(), Path::new("shots").join("frame4.png"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = load_config_from_str("(window: (title: \"Demo\", scale: 2))").unwrap();
        assert_eq!(config.window.title, "Demo");
        assert_eq!(config.window.scale, 2);
        assert_eq!(config.window.width, WIDTH);
        assert_eq!(config.captures, CaptureConfig::default());
        assert_eq!(config.window.window_size(), (WIDTH as i32 * 2, HEIGHT as i32 * 2));
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(matches!(load_config_from_str("(window: ("), Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_config_gives_defaults() {
        let config = load_config("definitely/not/here.ron").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_file_round_trip() {
        let mut config = EngineConfig::default();
        config.window.width = 160;
        config.captures.count = 42;
        let path = std::env::temp_dir().join(format!("square-io-config-{}.ron", std::process::id()));
        save_config(&config, &path).unwrap();
        let loaded = load_config(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }
}
