//! Core error types for Dossier.
//!
//! Each subsystem error is represented as a variant for clear error propagation.

use thiserror::Error;

/// Central error type for core record and configuration operations.
#[derive(Error, Debug)]
pub enum DossierError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (invalid identifier, constraint violated)
    #[error("validation error: {0}")]
    Validation(String),

    /// Record could not be turned into its transport mapping
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Config file not found
    #[error("config file not found at {path}")]
    NotFound {
        /// Path where config was expected
        path: String,
    },

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `DossierError`.
pub type Result<T> = std::result::Result<T, DossierError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DossierError::Validation("bad registry id".to_string());
        assert_eq!(err.to_string(), "validation error: bad registry id");

        let err = ConfigError::InvalidValue {
            field: "general.log_filter".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for general.log_filter: must not be empty"
        );
    }

    #[test]
    fn test_error_from_config() {
        let config_err = ConfigError::NoConfigDir;
        let err: DossierError = config_err.into();
        assert!(matches!(err, DossierError::Config(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DossierError = json_err.into();
        assert!(matches!(err, DossierError::Serialization(_)));
    }

    #[test]
    fn test_io_errors_stay_in_config() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: DossierError = ConfigError::from(io).into();
        assert!(matches!(err, DossierError::Config(ConfigError::Io(_))));
    }
}
