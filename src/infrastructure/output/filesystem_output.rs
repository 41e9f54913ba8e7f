//! Filesystem-based artifact sink implementation

use std::fs;
use std::path::{Path, PathBuf};

use crate::generation::{ArtifactSink, GenerationError, SourceArtifact};

/// Sink that writes each artifact to `{root}/{qualified/name}.{extension}`
pub struct FileSystemArtifactSink {
    root: PathBuf,
    extension: String,
}

impl FileSystemArtifactSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "java".to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Output file for a fully-qualified artifact name
    pub fn path_for(&self, qualified_name: &str) -> PathBuf {
        let relative = qualified_name.replace('.', "/");
        self.root.join(format!("{relative}.{}", self.extension))
    }
}

impl ArtifactSink for FileSystemArtifactSink {
    fn write(
        &mut self,
        qualified_name: &str,
        artifact: &SourceArtifact,
    ) -> Result<(), GenerationError> {
        let path = self.path_for(qualified_name);

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerationError::io(parent, e))?;
        }

        fs::write(&path, artifact.content.as_bytes()).map_err(|e| GenerationError::io(&path, e))?;
        Ok(())
    }
}
