//! Error types for heartglow_app

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving the page configuration
#[derive(Error, Debug)]
pub enum AppError {
    /// Config file could not be read or written
    #[error("Config I/O failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for `GreetingConfig`
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config could not be serialized
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config parsed but holds an unusable value
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for heartglow_app operations
pub type Result<T> = std::result::Result<T, AppError>;
