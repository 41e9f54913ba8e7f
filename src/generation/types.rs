//! Core types for the generation domain

use std::fmt;

use crate::core::utils::qualify;
use crate::declarations::{Contract, ContractMethod};

/// The marker a generator is triggered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Method-level HTTP route marker
    Path,
    /// Method-level embedded resource marker
    Resource,
    /// Contract-level message bundle marker
    Messages,
}

impl MarkerKind {
    /// Whether `method` of `contract` carries this marker
    pub fn matches(&self, contract: &Contract, method: &ContractMethod) -> bool {
        match self {
            MarkerKind::Path => method.markers.path.is_some(),
            MarkerKind::Resource => method.markers.resource.is_some(),
            MarkerKind::Messages => contract.messages,
        }
    }

    /// Whether the marker sits on `contract` itself, independent of its methods
    pub fn marks_contract(&self, contract: &Contract) -> bool {
        match self {
            MarkerKind::Messages => contract.messages,
            MarkerKind::Path | MarkerKind::Resource => false,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Path => write!(f, "path"),
            MarkerKind::Resource => write!(f, "resource"),
            MarkerKind::Messages => write!(f, "messages"),
        }
    }
}

/// One generated source unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceArtifact {
    pub namespace: String,
    pub simple_name: String,
    pub content: String,
}

impl SourceArtifact {
    pub fn new(
        namespace: impl Into<String>,
        simple_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            simple_name: simple_name.into(),
            content: content.into(),
        }
    }

    /// `{namespace}.{simple_name}`, or just the simple name in the root namespace
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.simple_name)
    }
}

/// The marked methods of one contract, in declaration order
#[derive(Debug, Clone)]
pub struct ContractGroup<'a> {
    pub contract: &'a Contract,
    pub methods: Vec<&'a ContractMethod>,
}

impl<'a> ContractGroup<'a> {
    pub fn new(contract: &'a Contract) -> Self {
        Self {
            contract,
            methods: Vec::new(),
        }
    }
}

/// Summary of a completed pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Qualified names written, in emission order
    pub written: Vec<String>,
}

impl PassSummary {
    pub fn artifacts_count(&self) -> usize {
        self.written.len()
    }
}
