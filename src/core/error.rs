//! Error handling for the contractgen loading and configuration layer.
//!
//! This module defines the main error type `Error` used while reading
//! declaration manifests and configuration files, along with a convenient
//! `Result` type alias. Failures inside a generation pass use
//! [`GenerationError`](crate::generation::GenerationError) instead.
//!
//! # Examples
//!
//! ```
//! use contractgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("chunk_size must be greater than zero"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for contractgen loading operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for contractgen loading operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Declaration manifest error
    #[error("Declaration error: {0}")]
    Declaration(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new declaration error
    pub fn declaration<S: Into<String>>(msg: S) -> Self {
        Self::Declaration(msg.into())
    }
}
