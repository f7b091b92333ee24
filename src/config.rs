//! Runtime configuration.
//!
//! Configuration is read from JSON. Every field has a default, so an empty object, a
//! partial file or no file at all are all valid.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "learngl.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub clear_color: [f32; 4],
    pub wireframe: bool,
    pub shader_dir: PathBuf,
    pub asset_dir: PathBuf,
    pub lesson: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
            wireframe: false,
            shader_dir: PathBuf::from("shaders"),
            asset_dir: PathBuf::from("assets"),
            lesson: "textured".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Parses a configuration from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, String> {
        serde_json::from_str(s).map_err(|e| e.to_string())
    }

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Otherwise `learngl.json` in the working directory and
    /// then `learngl/config.json` in the user config directory are tried, falling back to
    /// the defaults when neither exists.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), String> {
        if let Some(path) = path {
            return Self::read(path).map(|config| (config, Some(path.to_path_buf())));
        }

        for candidate in Self::candidates() {
            if candidate.is_file() {
                return Self::read(&candidate).map(|config| (config, Some(candidate)));
            }
        }

        Ok((Self::default(), None))
    }

    fn candidates() -> Vec<PathBuf> {
        let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
        if let Some(dir) = dirs::config_dir() {
            candidates.push(dir.join("learngl").join("config.json"));
        }
        candidates
    }

    fn read(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path.display(), e))?;
        Self::from_json(&contents).map_err(|e| format!("Invalid config {}: {}", path.display(), e))
    }

    pub fn shader_path(&self, file: &str) -> PathBuf {
        self.shader_dir.join(file)
    }

    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.asset_dir.join(name)
    }

    /// Returns the configured log level, or `None` if it is not a valid level name.
    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }
}
