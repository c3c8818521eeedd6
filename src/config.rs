//! Application configuration.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Environment variable consulted for the backend base URL.
pub const BASE_URL_ENV: &str = "MAILDECK_BASE_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the agent's control API, e.g. "http://localhost:8000".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Create Config with the given base URL.
    pub fn new(base_url: String) -> Self {
        Config {
            base_url: Some(base_url),
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Deletes the configuration file at the given path, if it exists.
    pub fn clear(path: &Path) -> Result<(), std::io::Error> {
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Path of the dashboard's configuration file, `~/.maildeck/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home_path.join(".maildeck").join("config.json"))
}

/// Resolve the backend environment for this invocation.
///
/// Precedence: `--base-url` flag, then the `MAILDECK_BASE_URL` environment
/// variable, then the saved configuration file, then the local default.
pub fn resolve_environment(flag_url: Option<&str>) -> Environment {
    if let Some(url) = flag_url {
        return Environment::from_base_url(url);
    }
    if let Ok(url) = std::env::var(BASE_URL_ENV) {
        if !url.is_empty() {
            return Environment::from_base_url(&url);
        }
    }
    if let Ok(path) = get_config_path() {
        if path.exists() {
            if let Ok(config) = Config::load_from_file(&path) {
                if let Some(url) = config.base_url {
                    return Environment::from_base_url(&url);
                }
            }
        }
    }
    Environment::Local
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new("http://10.0.0.5:8000".to_string());
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        // Attempt to save the configuration
        let config = Config::new("http://10.0.0.5:8000".to_string());
        let result = config.save(&path);

        // Check if the directories were created
        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // Saving a configuration should overwrite an existing file.
    fn test_save_overwrites_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        // Create an initial config and save it
        let config1 = Config::new("http://10.0.0.5:8000".to_string());
        config1.save(&path).unwrap();

        // Create a new config and save it to the same path
        let config2 = Config::new("http://10.0.0.6:8000".to_string());
        config2.save(&path).unwrap();

        // Load the saved config and check if it matches the second one
        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config2, loaded_config);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());
    }

    #[test]
    // Clearing should remove the file and tolerate a missing one.
    fn test_clear_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new("http://10.0.0.5:8000".to_string());
        config.save(&path).unwrap();
        assert!(path.exists());

        Config::clear(&path).unwrap();
        assert!(!path.exists());

        // A second clear on the now-missing file is not an error.
        Config::clear(&path).unwrap();
    }

    #[test]
    // An explicit flag URL wins over everything else.
    fn test_flag_url_overrides_default() {
        let env = resolve_environment(Some("http://192.168.1.20:8000"));
        assert_eq!(env.base_url(), "http://192.168.1.20:8000");
    }
}
