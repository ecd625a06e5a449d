//! Error types for Nimbus

use thiserror::Error;

/// The main error type for Nimbus operations
#[derive(Debug, Error)]
pub enum NimbusError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

/// Result type alias for Nimbus operations
pub type Result<T> = std::result::Result<T, NimbusError>;

impl From<toml::de::Error> for NimbusError {
    fn from(err: toml::de::Error) -> Self {
        NimbusError::TomlParseError(err.to_string())
    }
}
