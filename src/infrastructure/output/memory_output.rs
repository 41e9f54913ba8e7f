//! In-memory artifact sink, used for dry runs and tests

use crate::generation::{ArtifactSink, GenerationError, SourceArtifact};

/// Sink that keeps every written artifact in emission order
#[derive(Debug, Default)]
pub struct MemoryArtifactSink {
    artifacts: Vec<(String, String)>,
}

impl MemoryArtifactSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content written under `qualified_name`
    pub fn get(&self, qualified_name: &str) -> Option<&str> {
        self.artifacts
            .iter()
            .find(|(name, _)| name == qualified_name)
            .map(|(_, content)| content.as_str())
    }

    /// Written names, in emission order
    pub fn names(&self) -> Vec<&str> {
        self.artifacts.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

impl ArtifactSink for MemoryArtifactSink {
    fn write(
        &mut self,
        qualified_name: &str,
        artifact: &SourceArtifact,
    ) -> Result<(), GenerationError> {
        self.artifacts
            .push((qualified_name.to_string(), artifact.content.clone()));
        Ok(())
    }
}
