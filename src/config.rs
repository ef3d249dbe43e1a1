use serde::Deserialize;
use std::path::PathBuf;

use crate::store::StorageMode;

/// Application configuration.
///
/// Values resolve with priority: CLI flags > env vars > config file >
/// defaults. CLI overrides are applied by the binary after `load`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Port to listen on.
    pub port: u16,
    /// Persistence mode (`memory` or `file`).
    pub storage: StorageMode,
    /// Directory holding the collection files (file mode only).
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            storage: StorageMode::Memory,
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("fittrack"),
        }
    }
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            config = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;
        }

        if let Ok(port) = std::env::var("FITTRACK_PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FITTRACK_PORT", port))?;
        }
        if let Ok(storage) = std::env::var("FITTRACK_STORAGE") {
            config.storage = storage
                .parse()
                .map_err(|_| ConfigError::InvalidValue("FITTRACK_STORAGE", storage))?;
        }
        if let Ok(data_dir) = std::env::var("FITTRACK_DATA_DIR") {
            config.data_dir = PathBuf::from(data_dir);
        }

        Ok(config)
    }

    /// Default config file path: ~/.config/fittrack/config.yaml
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("fittrack")
            .join("config.yaml")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(var, value) => {
                write!(f, "Invalid value for {}: '{}'", var, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Mutex, MutexGuard, PoisonError};
    use tempfile::tempdir;

    // Config::load reads process-wide env vars, so tests that set or
    // observe them must not run concurrently.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageMode::Memory);
        assert!(config.data_dir.to_string_lossy().contains("fittrack"));
    }

    #[test]
    fn test_load_no_file_uses_defaults() {
        let _guard = env_lock();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.storage, StorageMode::Memory);
    }

    #[test]
    fn test_load_from_file() {
        let _guard = env_lock();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "port: 8080").unwrap();
        writeln!(file, "storage: file").unwrap();
        writeln!(file, "data_dir: /custom/path").unwrap();

        let config = Config::load(Some(config_path)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageMode::File);
        assert_eq!(config.data_dir, PathBuf::from("/custom/path"));
    }

    #[test]
    fn test_env_vars_override_file() {
        let _guard = env_lock();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "port: 8080").unwrap();
        writeln!(file, "storage: memory").unwrap();
        writeln!(file, "data_dir: /from/file").unwrap();

        std::env::set_var("FITTRACK_PORT", "9999");
        std::env::set_var("FITTRACK_STORAGE", "file");
        std::env::set_var("FITTRACK_DATA_DIR", "/from/env");

        let result = Config::load(Some(config_path));

        std::env::remove_var("FITTRACK_PORT");
        std::env::remove_var("FITTRACK_STORAGE");
        std::env::remove_var("FITTRACK_DATA_DIR");

        let config = result.unwrap();
        assert_eq!(config.port, 9999);
        assert_eq!(config.storage, StorageMode::File);
        assert_eq!(config.data_dir, PathBuf::from("/from/env"));
    }

    #[test]
    fn test_invalid_env_port_rejected() {
        let _guard = env_lock();
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("nonexistent.yaml");

        std::env::set_var("FITTRACK_PORT", "not-a-port");
        let result = Config::load(Some(config_path));
        std::env::remove_var("FITTRACK_PORT");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("FITTRACK_PORT"));
    }

    #[test]
    fn test_invalid_yaml_error() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "port: [not a number").unwrap();

        let result = Config::load(Some(config_path));
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_invalid_storage_mode_in_file() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "storage: sqlite").unwrap();

        assert!(Config::load(Some(config_path)).is_err());
    }
}
