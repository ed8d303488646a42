//! Configuration management for Dossier.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Credentials for the providers are never
//! read from or written to this file.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/dossier/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General settings
    pub general: GeneralConfig,
    /// Per-provider availability
    pub providers: ProvidersConfig,
}

impl AppConfig {
    /// Load configuration from the platform config directory, falling back
    /// to defaults if the file does not exist.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit file.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `DOSSIER_LOG_FILTER`: Override the default log filter
    /// - `DOSSIER_EXTRACTION_ENABLED`: Override extraction availability (true/false)
    /// - `DOSSIER_REGISTRY_ENABLED`: Override registry availability (true/false)
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `DOSSIER_*` environment overrides to an already loaded config.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("DOSSIER_LOG_FILTER") {
            tracing::debug!("Override general.log_filter from env: {}", val);
            self.general.log_filter = val;
        }

        if let Ok(val) = std::env::var("DOSSIER_EXTRACTION_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.providers.extraction.enabled = enabled;
                tracing::debug!("Override providers.extraction.enabled from env: {}", enabled);
            }
        }

        if let Ok(val) = std::env::var("DOSSIER_REGISTRY_ENABLED") {
            if let Ok(enabled) = val.parse() {
                self.providers.registry.enabled = enabled;
                tracing::debug!("Override providers.registry.enabled from env: {}", enabled);
            }
        }
    }

    /// Check values that serde alone cannot constrain.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.general.log_filter.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.log_filter".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit file.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/dossier/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs =
            ProjectDirs::from("com", "dossier", "dossier").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: "info,dossier=debug".to_string(),
        }
    }
}

/// Availability of each data provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Text-to-structure extraction provider
    pub extraction: ProviderToggle,
    /// German commercial register provider
    pub registry: RegistryConfig,
}

/// On/off switch with a human-readable status message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderToggle {
    /// Whether the provider may be used
    pub enabled: bool,
    /// Status message shown alongside the availability
    pub message: String,
}

impl Default for ProviderToggle {
    fn default() -> Self {
        Self {
            enabled: true,
            message: "Accessible".to_string(),
        }
    }
}

/// Registry provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Whether the registry may be used
    pub enabled: bool,
    /// Status message shown alongside the availability
    pub message: String,
    /// Restrict registry searches to active companies
    pub only_active: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message: "Accessible".to_string(),
            only_active: true,
        }
    }
}
