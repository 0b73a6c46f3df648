//! Storefront error types.

use thiserror::Error;

/// Errors raised while loading or validating storefront configuration.
///
/// Runtime faults inside the controllers never surface as errors; they are
/// healed in place and logged.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Failed to read a config file.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("Failed to write config file {path}: {source}")]
    ConfigWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML config could not be parsed.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Config could not be encoded as TOML.
    #[error("Failed to encode TOML config: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// JSON could not be parsed or encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config parsed but holds values the controllers cannot use.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
