//! Application configuration
//!
//! Config stored at: ~/.config/garita/garita.toml

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use garita_types::{ConfigError, Result};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the sheet store; defaults to the platform data dir.
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Sheet holding one row per inspection.
    #[serde(default = "default_inspection_sheet")]
    pub inspection_sheet: String,

    /// Sheet with one consecutive-number column per branch.
    #[serde(default = "default_counter_sheet")]
    pub counter_sheet: String,

    /// Sheet keying declared vehicle data by plate.
    #[serde(default = "default_registry_sheet")]
    pub registry_sheet: String,

    /// Bounded attempts for consecutive number issuance.
    #[serde(default = "default_counter_attempts")]
    pub counter_attempts: u32,

    /// Report recipients per branch, keyed by full branch name.
    #[serde(default)]
    pub branch_recipients: HashMap<String, Vec<String>>,
}

fn default_inspection_sheet() -> String {
    "Hoja 1".to_string()
}

fn default_counter_sheet() -> String {
    "Consecutivos".to_string()
}

fn default_registry_sheet() -> String {
    "Lista de Placas".to_string()
}

fn default_counter_attempts() -> u32 {
    garita_infra::persistence::DEFAULT_COUNTER_ATTEMPTS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            inspection_sheet: default_inspection_sheet(),
            counter_sheet: default_counter_sheet(),
            registry_sheet: default_registry_sheet(),
            counter_attempts: default_counter_attempts(),
            branch_recipients: HashMap::new(),
        }
    }
}

impl Config {
    /// Default config file path (~/.config/garita/garita.toml).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("garita").join("garita.toml"))
    }

    /// Load from the default path; a missing file yields the defaults.
    pub fn load() -> Result<Config> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Config::default()),
        }
    }

    pub fn load_from(path: &PathBuf) -> Result<Config> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("failed to read {}: {e}", path.display())))?;
        let config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(format!("failed to parse {}: {e}", path.display())))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Effective store directory: the configured one, the platform data
    /// dir, or `./garita-store` as a last resort.
    pub fn resolve_store_dir(&self) -> PathBuf {
        if let Some(dir) = &self.store_dir {
            return dir.clone();
        }
        dirs::data_dir()
            .map(|dir| dir.join("garita"))
            .unwrap_or_else(|| PathBuf::from("garita-store"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.inspection_sheet, "Hoja 1");
        assert_eq!(config.counter_sheet, "Consecutivos");
        assert_eq!(config.registry_sheet, "Lista de Placas");
        assert!(config.branch_recipients.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garita.toml");

        let mut config = Config::default();
        config.branch_recipients.insert(
            "(SU03) Chorrera".to_string(),
            vec!["registro@example.com".to_string()],
        );
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.branch_recipients.len(), 1);
        assert_eq!(loaded.counter_attempts, 5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garita.toml");
        fs::write(&path, "counter_attempts = 3\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.counter_attempts, 3);
        assert_eq!(config.inspection_sheet, "Hoja 1");
    }
}
