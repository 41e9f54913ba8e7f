//! Port interfaces for the generation domain

use crate::generation::{
    ContractGroup, GenerationError, MarkerKind, PassContext, SourceArtifact,
};

/// Turns the contracts carrying one marker into source artifacts
pub trait Generator {
    /// Short name used in logs and error reports
    fn name(&self) -> &'static str;

    /// The marker whose declarations this generator receives
    fn marker(&self) -> MarkerKind;

    /// Produce every artifact for the grouped declarations of one pass
    fn generate(
        &self,
        groups: &[ContractGroup<'_>],
        context: &PassContext<'_>,
    ) -> Result<Vec<SourceArtifact>, GenerationError>;
}

/// Destination for generated artifacts
pub trait ArtifactSink {
    /// Write one artifact under its fully-qualified name
    fn write(
        &mut self,
        qualified_name: &str,
        artifact: &SourceArtifact,
    ) -> Result<(), GenerationError>;
}
