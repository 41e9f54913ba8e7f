//! Resource-embedding generator
//!
//! Each accessor marked with a resource path gets an implementation that
//! returns the file's content from a generated embedded-data class. Content
//! is written as one assignment per byte (or per base64 character for text),
//! split into bounded initializer units so no single method outgrows what
//! the compiler accepts. Accessors resolving to the same path share one
//! embedded-data class.

use std::collections::BTreeMap;
use std::fs;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

use crate::core::utils::{namespace_to_path, qualify};
use crate::declarations::{Contract, ContractMethod, TypeReference};
use crate::generation::{
    BoundedBatchEmitter, ContractGroup, GenerationError, Generator, MarkerKind, PassContext,
    SourceArtifact,
};
use crate::infrastructure::{JavaClass, JavaField, JavaMethod, normalize_path};

/// How resource content is embedded
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EncodingKind {
    /// Literal byte values, returned as `byte[]`
    Raw,
    /// Base64 characters, decoded back to a `String`
    Text,
}

impl EncodingKind {
    /// Encoding demanded by an accessor's return type
    pub fn for_return_type(ty: &TypeReference) -> Option<Self> {
        if ty.is_byte_array() {
            Some(EncodingKind::Raw)
        } else if ty.is_string() {
            Some(EncodingKind::Text)
        } else {
            None
        }
    }

    fn identifier_prefix(&self) -> &'static str {
        match self {
            EncodingKind::Raw => "b",
            EncodingKind::Text => "s",
        }
    }
}

/// A generated embedded-data class for one resolved resource
#[derive(Debug, Clone)]
pub struct EmbeddedResource {
    pub kind: EncodingKind,
    pub namespace: String,
    /// Class name derived from the hash of the file name
    pub identifier: String,
    artifact: SourceArtifact,
}

impl EmbeddedResource {
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.identifier)
    }

    /// Expression an accessor returns
    fn accessor_expression(&self) -> String {
        let data = format!("{}.data", self.qualified_name());
        match self.kind {
            EncodingKind::Raw => data,
            EncodingKind::Text => format!(
                "new String(java.util.Base64.getDecoder().decode({data}.toString()), java.nio.charset.StandardCharsets.UTF_8)"
            ),
        }
    }
}

/// Pass-scoped store of embedded resources keyed by encoding and normalized path.
///
/// Misses are cached as `None` so an unresolved path is looked up once.
struct ResourceCache<'p, 'c> {
    context: &'p PassContext<'c>,
    entries: BTreeMap<(EncodingKind, String), Option<EmbeddedResource>>,
}

impl<'p, 'c> ResourceCache<'p, 'c> {
    fn new(context: &'p PassContext<'c>) -> Self {
        Self {
            context,
            entries: BTreeMap::new(),
        }
    }

    fn get_or_build(
        &mut self,
        kind: EncodingKind,
        path: &str,
    ) -> Result<Option<&EmbeddedResource>, GenerationError> {
        let key = (kind, path.to_string());
        if !self.entries.contains_key(&key) {
            let resource = build_resource(self.context, kind, path)?;
            self.entries.insert(key.clone(), resource);
        }
        Ok(self.entries.get(&key).and_then(Option::as_ref))
    }

    fn into_artifacts(self) -> impl Iterator<Item = SourceArtifact> {
        self.entries
            .into_values()
            .flatten()
            .map(|resource| resource.artifact)
    }
}

/// Generator for resource-marked accessor methods
pub struct ResourceGenerator;

impl ResourceGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ResourceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for ResourceGenerator {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn marker(&self) -> MarkerKind {
        MarkerKind::Resource
    }

    fn generate(
        &self,
        groups: &[ContractGroup<'_>],
        context: &PassContext<'_>,
    ) -> Result<Vec<SourceArtifact>, GenerationError> {
        let mut cache = ResourceCache::new(context);
        let mut artifacts = Vec::new();

        for group in groups {
            let contract = group.contract;
            let mut class = JavaClass::new(contract.namespace(), impl_name(contract))
                .implementing(&contract.name);

            for method in &group.methods {
                let kind = EncodingKind::for_return_type(&method.returns).ok_or_else(|| {
                    GenerationError::InvalidResourceReturnType {
                        contract: contract.name.clone(),
                        method: method.name.clone(),
                        found: method.returns.source_name(),
                    }
                })?;

                let path = resource_path(contract, method);
                let resource = cache.get_or_build(kind, &path)?;
                let statement = match resource {
                    Some(resource) => format!("return {};", resource.accessor_expression()),
                    None => {
                        tracing::warn!(
                            contract = %contract.name,
                            method = %method.name,
                            path = %path,
                            "Resource not found, accessor returns null"
                        );
                        "return null;".to_string()
                    }
                };
                class.add_method(JavaMethod::overriding(method).line(statement));
            }

            artifacts.push(SourceArtifact::new(
                contract.namespace(),
                class.name.clone(),
                context.emitter.render(&class)?,
            ));
        }

        artifacts.extend(cache.into_artifacts());
        Ok(artifacts)
    }
}

fn impl_name(contract: &Contract) -> String {
    format!("{}Impl", contract.simple_name())
}

/// Normalized logical path of the resource a method refers to
pub fn resource_path(contract: &Contract, method: &ContractMethod) -> String {
    let marker = method.markers.resource.as_deref().unwrap_or_default();
    let base = namespace_to_path(contract.namespace());
    if base.is_empty() {
        normalize_path(marker)
    } else {
        normalize_path(&format!("{base}/{marker}"))
    }
}

fn build_resource(
    context: &PassContext<'_>,
    kind: EncodingKind,
    path: &str,
) -> Result<Option<EmbeddedResource>, GenerationError> {
    let Some(file) = context.locator.resolve(path) else {
        return Ok(None);
    };
    let bytes = fs::read(&file).map_err(|e| GenerationError::io(&file, e))?;

    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let identifier = format!(
        "{}{}",
        kind.identifier_prefix(),
        hex::encode(Sha256::digest(file_name.as_bytes()))
    );
    let namespace = match path.rfind('/') {
        Some(idx) => path[..idx].replace('/', "."),
        None => String::new(),
    };

    let mut class = JavaClass::new(&namespace, &identifier);
    let mut batches = BoundedBatchEmitter::new(context.config.embedding.chunk_size, "i");
    match kind {
        EncodingKind::Raw => {
            class = class.field(JavaField::new(format!(
                "public static final byte[] data = new byte[{}]",
                bytes.len()
            )));
            batches.extend(
                bytes
                    .iter()
                    .enumerate()
                    .map(|(n, byte)| format!("data[{n}] = {};", *byte as i8)),
            );
        }
        EncodingKind::Text => {
            class = class.field(JavaField::new(
                "public static final StringBuilder data = new StringBuilder()",
            ));
            batches.extend(
                STANDARD
                    .encode(&bytes)
                    .chars()
                    .map(|c| format!("data.append('{c}');")),
            );
        }
    }

    let batches = batches.finish();
    for invocation in &batches.invocations {
        class.add_static_init(invocation.clone());
    }
    let units = batches.units.len();
    for unit in batches.units {
        class.add_method(
            JavaMethod::new(format!("private static void {}()", unit.name)).lines(unit.statements),
        );
    }

    tracing::info!(
        path,
        file = %file.display(),
        class = %qualify(&namespace, &identifier),
        bytes = bytes.len(),
        units,
        "Embedding resource"
    );

    let artifact = SourceArtifact::new(&namespace, &identifier, context.emitter.render(&class)?);
    Ok(Some(EmbeddedResource {
        kind,
        namespace,
        identifier,
        artifact,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::declarations::DeclarationSet;
    use crate::generation::GenerationPass;
    use crate::infrastructure::{MemoryArtifactSink, ResourceLocator, SourceEmitter};
    use std::path::Path;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    fn write_file(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn run(
        root: &Path,
        declarations: &DeclarationSet,
        config: &Config,
    ) -> Result<MemoryArtifactSink, GenerationError> {
        let locator = ResourceLocator::new(root, &config.locator);
        let emitter = SourceEmitter::new()?;
        let pass = GenerationPass::new(PassContext::new(declarations, &locator, config, &emitter));
        let mut sink = MemoryArtifactSink::new();
        pass.run(&ResourceGenerator::new(), &mut sink)?;
        Ok(sink)
    }

    fn hashed(prefix: &str, file_name: &str) -> String {
        format!("{prefix}{}", hex::encode(Sha256::digest(file_name.as_bytes())))
    }

    #[test]
    fn test_encoding_kind_for_return_type() {
        assert_eq!(
            EncodingKind::for_return_type(&TypeReference::new("byte[]")),
            Some(EncodingKind::Raw)
        );
        assert_eq!(
            EncodingKind::for_return_type(&TypeReference::new("java.lang.String")),
            Some(EncodingKind::Text)
        );
        assert_eq!(EncodingKind::for_return_type(&TypeReference::new("int")), None);
    }

    #[test]
    fn test_resource_path_resolves_relative_segments() {
        let contract = Contract::new("com.example.ui.Assets");
        let method = ContractMethod::new("logo", TypeReference::new("byte[]"))
            .with_resource("../shared/./logo.png");
        assert_eq!(resource_path(&contract, &method), "com/example/shared/logo.png");

        let root_contract = Contract::new("Assets");
        let method = ContractMethod::new("logo", TypeReference::new("byte[]"))
            .with_resource("logo.png");
        assert_eq!(resource_path(&root_contract, &method), "logo.png");
    }

    #[test]
    fn test_raw_resource_embedding() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "com/example/data.bin", &[1, 2, 255]);

        let declarations = DeclarationSet::new(vec![Contract::new("com.example.Assets").with_method(
            ContractMethod::new("data", TypeReference::new("byte[]")).with_resource("data.bin"),
        )]);
        let sink = run(dir.path(), &declarations, &Config::default()).unwrap();

        let class = hashed("b", "data.bin");
        let qualified = format!("com.example.{class}");
        assert_eq!(sink.names(), vec!["com.example.AssetsImpl", qualified.as_str()]);

        let implementation = sink.get("com.example.AssetsImpl").unwrap();
        assert!(implementation.contains("public class AssetsImpl implements com.example.Assets {"));
        assert!(implementation.contains("public byte[] data() {"));
        assert!(implementation.contains(&format!("return {qualified}.data;")));

        let embedded = sink.get(&qualified).unwrap();
        assert!(embedded.contains("public static final byte[] data = new byte[3];"));
        assert!(embedded.contains("data[0] = 1;"));
        assert!(embedded.contains("data[2] = -1;"));
        assert!(embedded.contains("static {\n        i0();\n    }"));
    }

    #[test]
    fn test_text_resource_embedding() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "src/main/resources/com/example/hello.txt", b"hi");

        let declarations = DeclarationSet::new(vec![Contract::new("com.example.Assets").with_method(
            ContractMethod::new("hello", TypeReference::new("String")).with_resource("hello.txt"),
        )]);
        let sink = run(dir.path(), &declarations, &Config::default()).unwrap();

        let qualified = format!("com.example.{}", hashed("s", "hello.txt"));
        let implementation = sink.get("com.example.AssetsImpl").unwrap();
        assert!(implementation.contains(&format!(
            "java.util.Base64.getDecoder().decode({qualified}.data.toString())"
        )));

        // "hi" encodes to "aGk="
        let embedded = sink.get(&qualified).unwrap();
        assert!(embedded.contains("public static final StringBuilder data = new StringBuilder();"));
        for c in ['a', 'G', 'k', '='] {
            assert!(embedded.contains(&format!("data.append('{c}');")));
        }
    }

    #[test]
    #[traced_test]
    fn test_missing_resource_returns_null() {
        let dir = TempDir::new().unwrap();
        let declarations = DeclarationSet::new(vec![Contract::new("com.example.Assets").with_method(
            ContractMethod::new("gone", TypeReference::new("byte[]"))
                .with_resource("contractgen-missing-5d1c.bin"),
        )]);
        let sink = run(dir.path(), &declarations, &Config::default()).unwrap();

        assert_eq!(sink.len(), 1);
        assert!(sink.get("com.example.AssetsImpl").unwrap().contains("return null;"));
        assert!(logs_contain("Resource not found"));
    }

    #[test]
    fn test_invalid_return_type_is_fatal() {
        let dir = TempDir::new().unwrap();
        let declarations = DeclarationSet::new(vec![Contract::new("com.example.Assets").with_method(
            ContractMethod::new("size", TypeReference::new("int")).with_resource("x.bin"),
        )]);
        let error = run(dir.path(), &declarations, &Config::default()).unwrap_err();
        assert!(matches!(
            error.root_cause(),
            GenerationError::InvalidResourceReturnType { found, .. } if found == "int"
        ));
    }

    #[test]
    fn test_chunking_splits_units() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "a/blob.bin", &[7u8; 25]);

        let mut config = Config::default();
        config.embedding.chunk_size = 10;
        let declarations = DeclarationSet::new(vec![Contract::new("a.Blobs").with_method(
            ContractMethod::new("blob", TypeReference::new("byte[]")).with_resource("blob.bin"),
        )]);
        let sink = run(dir.path(), &declarations, &config).unwrap();

        let embedded = sink.get(&format!("a.{}", hashed("b", "blob.bin"))).unwrap();
        assert!(embedded.contains("static {\n        i0();\n        i1();\n        i2();\n    }"));
        assert!(embedded.contains("private static void i2() {"));
        assert!(!embedded.contains("i3"));
        assert!(embedded.contains("data[24] = 7;"));
    }
}
