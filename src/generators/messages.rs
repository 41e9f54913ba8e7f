//! Message-bundle generator
//!
//! A contract marked for messages is implemented once per locale file found
//! next to its base `.properties` file. Each method returns its template with
//! `{n}` placeholders replaced by the n-th argument.

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::utils::{java_string_literal, namespace_to_path};
use crate::declarations::{Contract, Parameter};
use crate::generation::{
    ContractGroup, GenerationError, Generator, MarkerKind, PassContext, SourceArtifact,
};
use crate::generators::properties::{Properties, decode_properties, parse_properties};
use crate::infrastructure::{JavaClass, JavaMethod};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is valid"));

/// A properties file holding one locale's messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleVariant {
    pub path: PathBuf,
    /// Part of the file name between the contract name and the suffix, e.g. `_es`
    pub locale_suffix: String,
}

/// Generator for message-marked contracts
pub struct MessageGenerator;

impl MessageGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MessageGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for MessageGenerator {
    fn name(&self) -> &'static str {
        "messages"
    }

    fn marker(&self) -> MarkerKind {
        MarkerKind::Messages
    }

    fn generate(
        &self,
        groups: &[ContractGroup<'_>],
        context: &PassContext<'_>,
    ) -> Result<Vec<SourceArtifact>, GenerationError> {
        let suffix = &context.config.messages.suffix;
        let mut artifacts = Vec::new();

        for group in groups {
            let contract = group.contract;
            let base = format!("{}{suffix}", namespace_to_path(&contract.name));
            let Some(base_file) = context.locator.resolve(&base) else {
                tracing::debug!(contract = %contract.name, base = %base, "No message file found");
                continue;
            };

            for variant in locale_variants(&base_file, contract.simple_name(), suffix)? {
                let bytes =
                    fs::read(&variant.path).map_err(|e| GenerationError::io(&variant.path, e))?;
                let messages = parse_properties(&decode_properties(bytes));
                let class = bundle_class(group, &variant, &messages)?;

                tracing::debug!(
                    contract = %contract.name,
                    file = %variant.path.display(),
                    class = %class.name,
                    "Generated message bundle"
                );
                artifacts.push(SourceArtifact::new(
                    contract.namespace(),
                    class.name.clone(),
                    context.emitter.render(&class)?,
                ));
            }
        }
        Ok(artifacts)
    }
}

/// Locale files in the base file's directory, sorted by file name
pub fn locale_variants(
    base_file: &Path,
    simple_name: &str,
    suffix: &str,
) -> Result<Vec<LocaleVariant>, GenerationError> {
    let Some(directory) = base_file.parent() else {
        return Ok(Vec::new());
    };

    let mut variants = Vec::new();
    for entry in fs::read_dir(directory).map_err(|e| GenerationError::io(directory, e))? {
        let entry = entry.map_err(|e| GenerationError::io(directory, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let locale_suffix = file_name
            .strip_prefix(simple_name)
            .and_then(|rest| rest.strip_suffix(suffix));
        if let Some(locale_suffix) = locale_suffix {
            variants.push(LocaleVariant {
                locale_suffix: locale_suffix.to_string(),
                path,
            });
        }
    }

    variants.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(variants)
}

fn bundle_class(
    group: &ContractGroup<'_>,
    variant: &LocaleVariant,
    messages: &Properties,
) -> Result<JavaClass, GenerationError> {
    let contract: &Contract = group.contract;
    let mut class = JavaClass::new(
        contract.namespace(),
        format!("{}Impl{}", contract.simple_name(), variant.locale_suffix),
    )
    .implementing(&contract.name);

    for method in &group.methods {
        let template = messages.get(&method.name).ok_or_else(|| {
            GenerationError::MissingMessage {
                contract: contract.name.clone(),
                key: method.name.clone(),
                file: variant.path.clone(),
            }
        })?;
        let expression = message_expression(template, &method.params);
        class.add_method(JavaMethod::overriding(method).line(format!("return {expression};")));
    }
    Ok(class)
}

enum Part<'a> {
    Literal(String),
    Argument(&'a str),
}

/// Java string expression for a message template.
///
/// `{n}` with `n` a valid argument index becomes that argument; any other
/// placeholder is kept inline as `???token???`.
pub fn message_expression(template: &str, params: &[Parameter]) -> String {
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut last = 0;

    for captures in PLACEHOLDER.captures_iter(template) {
        let (Some(whole), Some(token)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        literal.push_str(&template[last..whole.start()]);
        last = whole.end();

        let token = token.as_str();
        match token.parse::<usize>().ok().and_then(|index| params.get(index)) {
            Some(param) => {
                if !literal.is_empty() {
                    parts.push(Part::Literal(std::mem::take(&mut literal)));
                }
                parts.push(Part::Argument(&param.name));
            }
            None => {
                tracing::warn!(template, token, "Unresolvable message placeholder");
                literal.push_str(&format!("???{token}???"));
            }
        }
    }
    literal.push_str(&template[last..]);
    if !literal.is_empty() {
        parts.push(Part::Literal(literal));
    }

    // Keep the expression a string concatenation when it starts with arguments
    let needs_leading_literal = match parts.as_slice() {
        [] => return "\"\"".to_string(),
        [Part::Argument(_)] | [Part::Argument(_), Part::Argument(_), ..] => true,
        _ => false,
    };

    let mut rendered: Vec<String> = parts
        .into_iter()
        .map(|part| match part {
            Part::Literal(text) => java_string_literal(&text),
            Part::Argument(name) => name.to_string(),
        })
        .collect();
    if needs_leading_literal {
        rendered.insert(0, "\"\"".to_string());
    }
    rendered.join(" + ")
}
