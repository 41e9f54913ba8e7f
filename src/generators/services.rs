//! Service-proxy generator
//!
//! Contract methods carrying a path marker become calls to an injected
//! remote service. Body verbs pass their argument through as the request
//! body; the others flatten it into query parameters.

use std::fmt;

use crate::core::config::RuntimeConfig;
use crate::core::utils::{java_string_literal, lowercase_first};
use crate::declarations::{Contract, ContractMethod, Parameter, TypeReference};
use crate::generation::{
    ContractGroup, GenerationError, Generator, MarkerKind, PassContext, SourceArtifact,
};
use crate::infrastructure::{JavaClass, JavaField, JavaMethod};

const SERVICE_FIELD: &str = "service";
const INTERCEPTOR_FIELD: &str = "requestBuilderInterceptor";
const GETTER_PREFIX: &str = "get";
const CONTINUATION: &str = "        ";

/// HTTP verbs a service method may be marked with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
}

impl HttpMethod {
    /// Parse a verb marker, ignoring case
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    /// Whether the argument travels as the request body
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        };
        f.write_str(name)
    }
}

/// Generator for path-marked service methods
pub struct ServiceGenerator;

impl ServiceGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ServiceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for ServiceGenerator {
    fn name(&self) -> &'static str {
        "services"
    }

    fn marker(&self) -> MarkerKind {
        MarkerKind::Path
    }

    fn generate(
        &self,
        groups: &[ContractGroup<'_>],
        context: &PassContext<'_>,
    ) -> Result<Vec<SourceArtifact>, GenerationError> {
        let runtime = &context.config.runtime;
        let mut artifacts = Vec::with_capacity(groups.len());

        for group in groups {
            let contract = group.contract;
            let mut class = service_class(contract, runtime);
            for method in &group.methods {
                class.add_method(service_method(contract, method, context)?);
            }

            tracing::debug!(
                contract = %contract.name,
                methods = group.methods.len(),
                "Generated service proxy"
            );
            artifacts.push(SourceArtifact::new(
                contract.namespace(),
                class.name.clone(),
                context.emitter.render(&class)?,
            ));
        }
        Ok(artifacts)
    }
}

fn interceptor_type(runtime: &RuntimeConfig) -> String {
    let builder = format!("{}.Builder", runtime.http_request);
    format!("{}<{builder}, {builder}>", runtime.function)
}

/// Fields, constructor and request helper shared by every proxy
fn service_class(contract: &Contract, runtime: &RuntimeConfig) -> JavaClass {
    let builder = format!("{}.Builder", runtime.http_request);
    let interceptor = interceptor_type(runtime);
    let simple_name = format!("{}Impl", contract.simple_name());

    let mut class = JavaClass::new(contract.namespace(), &simple_name)
        .implementing(&contract.name)
        .field(JavaField::new(format!(
            "private final {} {SERVICE_FIELD}",
            runtime.remote_service
        )))
        .field(
            JavaField::new(format!("private final {interceptor} {INTERCEPTOR_FIELD}"))
                .annotated(&runtime.nullable),
        );

    class.add_method(
        JavaMethod::new(format!(
            "public {simple_name}({} {SERVICE_FIELD}, @{} {interceptor} {INTERCEPTOR_FIELD})",
            runtime.remote_service, runtime.nullable
        ))
        .annotated(&runtime.inject)
        .line(format!(
            "this.{SERVICE_FIELD} = java.util.Objects.requireNonNull({SERVICE_FIELD});"
        ))
        .line(format!("this.{INTERCEPTOR_FIELD} = {INTERCEPTOR_FIELD};")),
    );

    class.add_method(
        JavaMethod::new(format!(
            "private {builder} requestBuilder(String path, @{} Object requestDto, {} method)",
            runtime.nullable, runtime.http_method
        ))
        .line(format!(
            "{builder} builder = {SERVICE_FIELD}.requestBuilder(path, requestDto)"
        ))
        .line(format!("{CONTINUATION}.method(method)"))
        .line(format!("{CONTINUATION}.contentType({});", runtime.content_type))
        .line(format!("return {INTERCEPTOR_FIELD} != null"))
        .line(format!("{CONTINUATION}? {INTERCEPTOR_FIELD}.apply(builder)"))
        .line(format!("{CONTINUATION}: builder;")),
    );

    class
}

fn service_method(
    contract: &Contract,
    method: &ContractMethod,
    context: &PassContext<'_>,
) -> Result<JavaMethod, GenerationError> {
    let runtime = &context.config.runtime;
    let http_method = http_method(contract, method)?;

    if method.params.len() > 1 {
        return Err(GenerationError::TooManyParameters {
            contract: contract.name.clone(),
            method: method.name.clone(),
            count: method.params.len(),
        });
    }
    let descriptor = response_descriptor(contract, method, runtime)?;
    let param = method.params.first();

    let (body, query) = if http_method.has_body() {
        (param.map_or("null", |p| p.name.as_str()), Vec::new())
    } else {
        let query = match param {
            Some(param) => query_params(contract, method, param, context)?,
            None => Vec::new(),
        };
        ("null", query)
    };

    let path = method.markers.path.as_deref().unwrap_or_default();
    let mut lines = vec![format!(
        "return {SERVICE_FIELD}.invoke(requestBuilder({}, {body}, {}.{http_method})",
        java_string_literal(path),
        runtime.http_method
    )];
    lines.extend(query.iter().map(|(name, value)| {
        format!(
            "{CONTINUATION}.queryParam({}, {value})",
            java_string_literal(name)
        )
    }));
    lines.push(format!("{CONTINUATION}.build(), {descriptor});"));

    Ok(JavaMethod::overriding(method).lines(lines))
}

/// The single recognized verb of a method
fn http_method(contract: &Contract, method: &ContractMethod) -> Result<HttpMethod, GenerationError> {
    match method.markers.verbs.as_slice() {
        [] => Err(GenerationError::MissingHttpMethod {
            contract: contract.name.clone(),
            method: method.name.clone(),
        }),
        [verb] => HttpMethod::from_marker(verb).ok_or_else(|| {
            GenerationError::UnrecognizedHttpMethod {
                contract: contract.name.clone(),
                method: method.name.clone(),
                verb: verb.clone(),
            }
        }),
        verbs => Err(GenerationError::DuplicateHttpMethod {
            contract: contract.name.clone(),
            method: method.name.clone(),
            verbs: verbs.to_vec(),
        }),
    }
}

/// Class-literal expression describing the payload of the eventual result
fn response_descriptor(
    contract: &Contract,
    method: &ContractMethod,
    runtime: &RuntimeConfig,
) -> Result<String, GenerationError> {
    let returns = &method.returns;
    let payload = match returns.args.as_slice() {
        [payload] if returns.name == runtime.promise => payload,
        _ => {
            return Err(GenerationError::NotEventualResult {
                contract: contract.name.clone(),
                method: method.name.clone(),
                expected: runtime.promise.clone(),
                found: returns.source_name(),
            });
        }
    };

    if !payload.is_generic() {
        return Ok(format!("{}.class", payload.name));
    }
    let args: Vec<String> = payload
        .args
        .iter()
        .map(|arg| format!("{}.class", arg.name))
        .collect();
    Ok(format!(
        "{}.create({}.class, {})",
        runtime.type_literal,
        payload.name,
        args.join(", ")
    ))
}

/// Flatten the sole argument of a query-style method into `(name, value)` pairs.
///
/// Public fields come first, then public `get*` getters. A getter whose
/// derived name matches an earlier entry replaces that entry's value in place.
fn query_params(
    contract: &Contract,
    method: &ContractMethod,
    param: &Parameter,
    context: &PassContext<'_>,
) -> Result<Vec<(String, String)>, GenerationError> {
    if param.ty.is_scalar() {
        return Ok(vec![(
            param.name.clone(),
            string_expression(&param.name, &param.ty),
        )]);
    }

    let declaration = context.declarations.find_type(&param.ty.name).ok_or_else(|| {
        GenerationError::UnresolvedType {
            contract: contract.name.clone(),
            method: method.name.clone(),
            type_name: param.ty.source_name(),
        }
    })?;

    let mut params: Vec<(String, String)> = declaration
        .fields
        .iter()
        .filter(|field| field.public)
        .map(|field| {
            (
                field.name.clone(),
                string_expression(&format!("{}.{}", param.name, field.name), &field.ty),
            )
        })
        .collect();

    for getter in declaration.methods.iter().filter(|m| m.public && m.params.is_empty()) {
        let Some(remainder) = getter.name.strip_prefix(GETTER_PREFIX) else {
            continue;
        };
        if remainder.is_empty() {
            continue;
        }
        let name = lowercase_first(remainder);
        let value = string_expression(&format!("{}.{}()", param.name, getter.name), &getter.returns);
        match params.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => params.push((name, value)),
        }
    }

    Ok(params)
}

fn string_expression(expression: &str, ty: &TypeReference) -> String {
    if ty.is_string() {
        expression.to_string()
    } else {
        format!("String.valueOf({expression})")
    }
}
