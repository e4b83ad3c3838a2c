use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DATA_FILE_NAME: &str = "taskboard.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Data file used when no path is given on the command line
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Columns given to boards created without any
    #[serde(default)]
    pub default_statuses: Vec<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Missing or malformed files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn default_data_file() -> Option<PathBuf> {
        dirs::data_dir().map(|data| data.join("taskboard").join(DATA_FILE_NAME))
    }

    pub fn effective_data_file(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(Self::default_data_file)
    }
}
