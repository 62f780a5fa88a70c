//! TOML configuration file I/O
//!
//! Handles loading and saving the lockbox configuration to/from TOML files
//! in the user's configuration directory.

use crate::auth::policy::AuthPolicy;
use crate::error::{CofreError, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete TOML configuration structure
///
/// Contains the persistent-region location and the retry/pacing policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Override for the persisted secret-region file
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Retry and pacing policy (optional)
    #[serde(rename = "policy", default)]
    pub policy: Option<AuthPolicy>,
}

impl TomlConfig {
    /// Create a new TOML configuration
    pub fn new(storage_path: Option<PathBuf>, policy: Option<AuthPolicy>) -> Self {
        Self {
            storage_path,
            policy,
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CofreError> {
        use tracing::{debug, info, warn};

        let contents = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CofreError::Config(ConfigError::LoadFailed {
                path: path.to_string_lossy().to_string(),
            }),
            _ => CofreError::Config(ConfigError::IoError {
                message: format!("Failed to read config file: {}", e),
            }),
        })?;

        let config: TomlConfig = toml::from_str(&contents).map_err(|e| {
            CofreError::Config(ConfigError::ValidationError {
                message: format!("Failed to parse config file: {}", e),
            })
        })?;

        // Validate the policy if present
        if let Some(ref policy) = config.policy {
            debug!("Validating auth policy from config");

            policy.validate().map_err(|e| {
                warn!("Auth policy validation failed: {}", e);
                CofreError::Config(ConfigError::ValidationError {
                    message: format!("Invalid auth policy: {}", e),
                })
            })?;

            info!(
                "Loaded auth policy: message_hold={}s, alert_pulses={}, poll_interval={}s, max_poll_failures={}",
                policy.message_hold_secs,
                policy.alert_pulses,
                policy.poll_interval_secs,
                policy.max_poll_failures
            );
        } else {
            debug!("No auth policy specified in config, defaults will be used");
        }

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn to_file(&self, path: &Path) -> Result<(), CofreError> {
        if let Some(ref policy) = self.policy {
            policy.validate().map_err(|e| {
                CofreError::Config(ConfigError::ValidationError {
                    message: format!("Invalid auth policy: {}", e),
                })
            })?;
        }

        let contents = toml::to_string_pretty(self)?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CofreError::Config(ConfigError::IoError {
                    message: format!("Failed to create config directory: {}", e),
                })
            })?;
        }

        std::fs::write(path, contents).map_err(|_e| {
            CofreError::Config(ConfigError::SaveFailed {
                path: path.to_string_lossy().to_string(),
            })
        })?;

        Ok(())
    }

    /// The effective policy: configured or default
    pub fn effective_policy(&self) -> AuthPolicy {
        self.policy.clone().unwrap_or_default()
    }

    /// The effective secret-region path: configured or default
    pub fn effective_storage_path(&self) -> Result<PathBuf, CofreError> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => get_storage_path(),
        }
    }
}

impl Default for TomlConfig {
    fn default() -> Self {
        Self::new(None, Some(AuthPolicy::default()))
    }
}

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default secret-region file name
const STORAGE_FILE_NAME: &str = "secret-region.bin";

/// Get the default configuration directory
///
/// Returns ~/.config/cofre on Linux, or COFRE_CONFIG_DIR environment
/// variable if set.
pub fn get_config_dir() -> Result<PathBuf, CofreError> {
    // Allow tests to override config directory via environment variable
    if let Ok(config_dir) = std::env::var("COFRE_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        CofreError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("cofre"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, CofreError> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Get the default secret-region file path
pub fn get_storage_path() -> Result<PathBuf, CofreError> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(STORAGE_FILE_NAME))
}

/// Check if a configuration file exists at the default location
pub fn config_exists() -> Result<bool, CofreError> {
    let config_path = get_config_path()?;
    Ok(config_path.exists())
}

/// Load the configuration from the default location, or defaults when absent
pub fn load_or_default() -> Result<TomlConfig, CofreError> {
    let path = get_config_path()?;
    if path.exists() {
        TomlConfig::from_file(&path)
    } else {
        Ok(TomlConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let mut policy = AuthPolicy::default();
        policy.max_poll_failures = 5;
        let original = TomlConfig::new(Some(PathBuf::from("/tmp/region.bin")), Some(policy));

        // Save config
        original.to_file(&config_path).unwrap();

        // Load config
        let loaded = TomlConfig::from_file(&config_path).unwrap();

        assert_eq!(loaded.storage_path, original.storage_path);
        assert_eq!(loaded.policy, original.policy);
    }

    #[test]
    fn test_invalid_policy_rejected_on_load() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("bad_config.toml");

        std::fs::write(&config_path, "[policy]\nmax_poll_failures = 99\n").unwrap();

        let result = TomlConfig::from_file(&config_path);
        assert!(matches!(
            result,
            Err(CofreError::Config(ConfigError::ValidationError { .. }))
        ));
    }

    #[test]
    fn test_missing_file_reports_load_failed() {
        let temp_dir = tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        let result = TomlConfig::from_file(&missing);
        assert!(matches!(
            result,
            Err(CofreError::Config(ConfigError::LoadFailed { .. }))
        ));
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_dir = tempdir().unwrap();
        let config_path = temp_dir.path().join("empty.toml");
        std::fs::write(&config_path, "").unwrap();

        let config = TomlConfig::from_file(&config_path).unwrap();
        assert!(config.storage_path.is_none());
        assert!(config.policy.is_none());
        assert_eq!(config.effective_policy(), AuthPolicy::default());
    }
}
