//! File-based declaration manifest loader
//!
//! Populates the neutral [`DeclarationSet`] from a YAML or JSON manifest.

use async_trait::async_trait;
use tokio::fs;

use crate::core::error::{Error, Result};
use crate::declarations::DeclarationSet;

/// Loads declaration sets from some source
#[async_trait]
pub trait DeclarationLoader: Send + Sync {
    /// Load and validate the declarations found at `source`
    async fn load(&self, source: &str) -> Result<DeclarationSet>;
}

/// Loads declaration manifests from local files
pub struct FileDeclarationLoader;

impl FileDeclarationLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse manifest content, choosing the format from the source's extension
    pub fn parse(source: &str, content: &str) -> Result<DeclarationSet> {
        let declarations: DeclarationSet = if source.ends_with(".json") {
            serde_json::from_str(content)?
        } else if source.ends_with(".yaml") || source.ends_with(".yml") {
            serde_yaml::from_str(content)?
        } else {
            // Try JSON first, then YAML
            serde_json::from_str(content)
                .or_else(|_| serde_yaml::from_str(content))
                .map_err(|e| Error::declaration(format!("Failed to parse {source}: {e}")))?
        };

        declarations.validate()?;
        Ok(declarations)
    }
}

#[async_trait]
impl DeclarationLoader for FileDeclarationLoader {
    async fn load(&self, source: &str) -> Result<DeclarationSet> {
        let content = fs::read_to_string(source).await?;
        let declarations = Self::parse(source, &content)?;

        tracing::debug!(
            source,
            contracts = declarations.contracts.len(),
            types = declarations.types.len(),
            "Loaded declaration manifest"
        );
        Ok(declarations)
    }
}

impl Default for FileDeclarationLoader {
    fn default() -> Self {
        Self::new()
    }
}
