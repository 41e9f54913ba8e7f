//! Generation orchestration - discovery, dispatch and emission of one pass

use std::collections::{HashMap, HashSet};

use crate::declarations::{Contract, DeclarationSet};
use crate::generation::{
    ArtifactSink, ContractGroup, GenerationError, Generator, MarkerKind, PassContext,
    PassSummary, SourceArtifact,
};

/// Collect every method carrying `marker`, grouped by enclosing contract.
///
/// Groups appear in the order their contract is first seen; methods keep
/// their declaration order. Contracts without matching methods are skipped,
/// unless the marker is placed on the contract itself.
pub fn discover(declarations: &DeclarationSet, marker: MarkerKind) -> Vec<ContractGroup<'_>> {
    let mut groups: Vec<ContractGroup<'_>> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for contract in &declarations.contracts {
        if marker.marks_contract(contract) {
            group_slot(&mut groups, &mut index, contract);
        }
        for method in &contract.methods {
            if !marker.matches(contract, method) {
                continue;
            }
            let slot = group_slot(&mut groups, &mut index, contract);
            groups[slot].methods.push(method);
        }
    }
    groups
}

fn group_slot<'a>(
    groups: &mut Vec<ContractGroup<'a>>,
    index: &mut HashMap<&'a str, usize>,
    contract: &'a Contract,
) -> usize {
    *index.entry(contract.name.as_str()).or_insert_with(|| {
        groups.push(ContractGroup::new(contract));
        groups.len() - 1
    })
}

/// Runs generators over a declaration set and writes what they produce
pub struct GenerationPass<'a> {
    context: PassContext<'a>,
}

impl<'a> GenerationPass<'a> {
    pub fn new(context: PassContext<'a>) -> Self {
        Self { context }
    }

    /// Generate with one generator, then write its artifacts
    pub fn run(
        &self,
        generator: &dyn Generator,
        sink: &mut dyn ArtifactSink,
    ) -> Result<PassSummary, GenerationError> {
        self.run_all(&[generator], sink)
    }

    /// Generate with every generator before anything is written.
    ///
    /// A failing generator aborts the pass with nothing written; so does an
    /// artifact name produced twice.
    pub fn run_all(
        &self,
        generators: &[&dyn Generator],
        sink: &mut dyn ArtifactSink,
    ) -> Result<PassSummary, GenerationError> {
        let mut artifacts = Vec::new();
        for generator in generators {
            artifacts.extend(self.generate(*generator)?);
        }

        let mut seen = HashSet::new();
        for artifact in &artifacts {
            let name = artifact.qualified_name();
            if !seen.insert(name.clone()) {
                return Err(GenerationError::DuplicateArtifact(name));
            }
        }

        let mut summary = PassSummary::default();
        for artifact in &artifacts {
            let name = artifact.qualified_name();
            sink.write(&name, artifact)?;
            tracing::debug!(artifact = %name, "Wrote artifact");
            summary.written.push(name);
        }

        tracing::info!(
            artifacts = summary.artifacts_count(),
            "Generation pass complete"
        );
        Ok(summary)
    }

    /// Run one generator without writing anything
    pub fn generate(&self, generator: &dyn Generator) -> Result<Vec<SourceArtifact>, GenerationError> {
        let groups = discover(self.context.declarations, generator.marker());
        tracing::debug!(
            generator = generator.name(),
            marker = %generator.marker(),
            contracts = groups.len(),
            "Dispatching contracts to generator"
        );

        generator
            .generate(&groups, &self.context)
            .map_err(|e| GenerationError::Aborted {
                generator: generator.name().to_string(),
                source: Box::new(e),
            })
    }
}
