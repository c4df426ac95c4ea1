use crate::domain::{config::DataSfConfig, error::{DataSfError, DataSfResult}};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const CONFIG_DIR: &str = "datasf";
const PROJECT_DIR: &str = ".datasf";
const CONFIG_FILE: &str = "config.toml";

/// Configuration manager
pub struct ConfigManager {
    explicit_path: Option<PathBuf>,
    global_config_path: Option<PathBuf>,
    project_config_path: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a configuration manager, optionally pinned to one file
    pub fn new(explicit_path: Option<PathBuf>) -> Self {
        Self {
            explicit_path,
            global_config_path: Self::get_global_config_path(),
            project_config_path: Self::find_project_config_path(),
        }
    }

    /// File the configuration is read from, if any exists
    pub fn source_path(&self) -> Option<&Path> {
        if let Some(path) = &self.explicit_path {
            return Some(path.as_path());
        }
        self.project_config_path
            .iter()
            .chain(self.global_config_path.iter())
            .find(|path| path.exists())
            .map(PathBuf::as_path)
    }

    /// Load configuration, falling back to defaults when no file is found.
    ///
    /// An explicitly given path must exist.
    pub fn load_config(&self) -> DataSfResult<DataSfConfig> {
        match self.source_path() {
            Some(path) => Self::load_config_from_path(path),
            None => Ok(DataSfConfig::default()),
        }
    }

    /// Get global configuration path
    fn get_global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Find project configuration path by walking up directory tree
    fn find_project_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        Self::find_project_config_from(&current_dir)
    }

    fn find_project_config_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(PROJECT_DIR).join(CONFIG_FILE))
            .find(|path| path.exists())
    }

    /// Load configuration from specific path
    pub fn load_config_from_path(path: &Path) -> DataSfResult<DataSfConfig> {
        let content = fs::read_to_string(path).map_err(|e| DataSfError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        toml::from_str(&content).map_err(|e| DataSfError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })
    }

    /// Save configuration to specific path
    pub fn save_config_to_path(path: &Path, config: &DataSfConfig) -> DataSfResult<()> {
        let content = toml::to_string_pretty(config).map_err(|e| DataSfError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataSfError::Config {
                message: format!("Failed to create config directory: {}", e),
            })?;
        }

        fs::write(path, content).map_err(|e| DataSfError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })
    }

    /// Write a default configuration file, refusing to overwrite one
    pub fn init_config(&self, file: Option<PathBuf>) -> DataSfResult<PathBuf> {
        let path = file
            .or_else(|| self.global_config_path.clone())
            .ok_or_else(|| DataSfError::Config {
                message: "Could not determine configuration directory".to_string(),
            })?;

        if path.exists() {
            return Err(DataSfError::Config {
                message: format!("Configuration already exists at {}", path.display()),
            });
        }

        Self::save_config_to_path(&path, &DataSfConfig::default())?;
        debug!("Wrote default configuration to {}", path.display());
        Ok(path)
    }
}
