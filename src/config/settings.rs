//! Service settings loaded from YAML.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};

/// Environment variable naming the settings file.
pub const SETTINGS_PATH_ENV: &str = "PARCEL_RATE_SETTINGS";

/// Settings file used when [`SETTINGS_PATH_ENV`] is unset.
pub const DEFAULT_SETTINGS_PATH: &str = "config/engine.yaml";

/// Top-level service settings.
///
/// Every field has a default, so a partial file (or no file) is valid.
///
/// # Example
///
/// ```
/// use parcel_rate_engine::config::EngineSettings;
///
/// let settings = EngineSettings::from_yaml_str("rules:\n  normalize_on_load: false\n", "inline").unwrap();
/// assert!(!settings.rules.normalize_on_load);
/// assert_eq!(settings.server.bind_address, "127.0.0.1:8080");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// HTTP listener settings.
    pub server: ServerSettings,
    /// Rule file settings.
    pub rules: RulesSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Socket address to bind, e.g. `0.0.0.0:8080`.
    pub bind_address: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Rule file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesSettings {
    /// Path of the rule file.
    pub path: PathBuf,
    /// Normalize and order rules when they are loaded from disk.
    pub normalize_on_load: bool,
}

impl Default for RulesSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("config/default.properties"),
            normalize_on_load: true,
        }
    }
}

impl EngineSettings {
    /// Loads settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::SettingsError`] if the file cannot be read or
    /// is not valid settings YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| EngineError::SettingsError {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Loads settings from a YAML file, falling back to defaults when the
    /// file does not exist. Any other failure is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(path = %path.display(), "Settings file not found, using defaults");
                Ok(Self::default())
            }
            _ => Self::load(path),
        }
    }

    /// Parses settings from YAML text. `origin` names the source in errors.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        // An empty document deserializes as null rather than an empty map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(content).map_err(|e| EngineError::SettingsError {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// The settings path from [`SETTINGS_PATH_ENV`], or
    /// [`DEFAULT_SETTINGS_PATH`].
    pub fn path_from_env() -> PathBuf {
        std::env::var_os(SETTINGS_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH))
    }
}
