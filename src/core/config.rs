//! Generator configuration loaded from `contractgen.toml`.
//!
//! Every section is optional; missing keys fall back to the defaults below.
//!
//! ```toml
//! [locator]
//! source_language = "java"
//!
//! [embedding]
//! chunk_size = 1000
//!
//! [messages]
//! suffix = ".properties"
//!
//! [runtime]
//! promise = "contractgen.runtime.Promise"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Default number of element assignments per initializer unit
pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// Top-level generator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locator: LocatorConfig,
    pub embedding: EmbeddingConfig,
    pub messages: MessagesConfig,
    pub runtime: RuntimeConfig,
}

/// Resource lookup settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Language directory searched under `src/main/`
    pub source_language: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            source_language: "java".to_string(),
        }
    }
}

/// Resource embedding settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Maximum element assignments per initializer unit
    pub chunk_size: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Message bundle settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagesConfig {
    /// File suffix of locale variant files
    pub suffix: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            suffix: ".properties".to_string(),
        }
    }
}

/// Type names of the runtime library that generated service proxies call into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Eventual-result wrapper every service method must return
    pub promise: String,
    /// Injected remote service dependency
    pub remote_service: String,
    /// Request type; its builder is `{http_request}.Builder`
    pub http_request: String,
    /// HTTP method enum
    pub http_method: String,
    /// Factory for composite generic type descriptors
    pub type_literal: String,
    /// Function type used for the request interceptor
    pub function: String,
    /// Expression passed to `contentType(...)`
    pub content_type: String,
    /// Injection annotation placed on the constructor
    pub inject: String,
    /// Nullability annotation
    pub nullable: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            promise: "contractgen.runtime.Promise".to_string(),
            remote_service: "contractgen.runtime.RemoteService".to_string(),
            http_request: "contractgen.runtime.HttpRequest".to_string(),
            http_method: "contractgen.runtime.HttpMethod".to_string(),
            type_literal: "contractgen.runtime.TypeLiteral".to_string(),
            function: "java.util.function.Function".to_string(),
            content_type: "\"application/json; charset=utf-8\"".to_string(),
            inject: "javax.inject.Inject".to_string(),
            nullable: "javax.annotation.Nullable".to_string(),
        }
    }
}

impl Config {
    /// Parse a configuration document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub async fn from_file(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&content)
    }

    /// Load configuration from `path` if given, otherwise use defaults
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path).await,
            None => Ok(Self::default()),
        }
    }

    /// Reject settings the generators cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.embedding.chunk_size == 0 {
            return Err(Error::config(
                "embedding.chunk_size must be greater than zero",
            ));
        }
        if self.messages.suffix.is_empty() {
            return Err(Error::config("messages.suffix cannot be empty"));
        }
        if self.locator.source_language.is_empty() {
            return Err(Error::config("locator.source_language cannot be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.embedding.chunk_size, 1000);
        assert_eq!(config.messages.suffix, ".properties");
        assert_eq!(config.locator.source_language, "java");
        assert_eq!(config.runtime.promise, "contractgen.runtime.Promise");
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [embedding]
            chunk_size = 250

            [runtime]
            promise = "org.acme.async.Promise"
            "#,
        )
        .unwrap();

        assert_eq!(config.embedding.chunk_size, 250);
        assert_eq!(config.runtime.promise, "org.acme.async.Promise");
        assert_eq!(
            config.runtime.remote_service,
            "contractgen.runtime.RemoteService"
        );
        assert_eq!(config.messages, MessagesConfig::default());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let result = Config::from_toml_str("[embedding]\nchunk_size = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn test_load_without_path_uses_defaults() {
        let config = Config::load(None).await.unwrap();
        assert_eq!(config, Config::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("contractgen.toml");
        std::fs::write(&path, "[locator]\nsource_language = \"kotlin\"\n").unwrap();

        let config = Config::load(Some(&path)).await.unwrap();
        assert_eq!(config.locator.source_language, "kotlin");
    }
}
