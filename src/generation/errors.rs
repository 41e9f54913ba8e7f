//! Error types for the generation domain

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during a generation pass
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(
        "Invalid return type for resource {contract}.{method}: {found}. It must be byte[] or String"
    )]
    InvalidResourceReturnType {
        contract: String,
        method: String,
        found: String,
    },

    #[error(
        "Service method {contract}.{method} must be annotated with one HTTP method: GET, POST, PUT, DELETE, HEAD"
    )]
    MissingHttpMethod { contract: String, method: String },

    #[error("Service method {contract}.{method} declares more than one HTTP method: {verbs:?}")]
    DuplicateHttpMethod {
        contract: String,
        method: String,
        verbs: Vec<String>,
    },

    #[error("Service method {contract}.{method} uses unrecognized HTTP method {verb}")]
    UnrecognizedHttpMethod {
        contract: String,
        method: String,
        verb: String,
    },

    #[error("Service method {contract}.{method} must have 0 or 1 parameters, found {count}")]
    TooManyParameters {
        contract: String,
        method: String,
        count: usize,
    },

    #[error("Service method {contract}.{method} must return {expected}<T>, found {found}")]
    NotEventualResult {
        contract: String,
        method: String,
        expected: String,
        found: String,
    },

    #[error("No declaration found for type {type_name} used by {contract}.{method}")]
    UnresolvedType {
        contract: String,
        method: String,
        type_name: String,
    },

    #[error("Missing message '{key}' for {contract} in {}", file.display())]
    MissingMessage {
        contract: String,
        key: String,
        file: PathBuf,
    },

    #[error("Artifact {0} generated more than once")]
    DuplicateArtifact(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("IO error on {}: {source}", path.display())]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Generator '{generator}' failed: {source}")]
    Aborted {
        generator: String,
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// The innermost error, looking through `Aborted` wrappers
    pub fn root_cause(&self) -> &GenerationError {
        match self {
            Self::Aborted { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
