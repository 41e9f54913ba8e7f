//! Java class model and its tera-based renderer
//!
//! Generators describe the classes they want as a [`JavaClass`]; the
//! [`SourceEmitter`] owns the formatting.

use serde::Serialize;
use tera::{Context, Tera};

use crate::declarations::ContractMethod;
use crate::generation::GenerationError;

const CLASS_TEMPLATE_NAME: &str = "class.java";
const CLASS_TEMPLATE: &str = include_str!("../../../templates/java/class.java.tera");

/// A field declaration, rendered as `{declaration};`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaField {
    pub annotations: Vec<String>,
    pub declaration: String,
}

impl JavaField {
    pub fn new(declaration: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            declaration: declaration.into(),
        }
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }
}

/// A method or constructor with a pre-formatted signature and body lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaMethod {
    pub annotations: Vec<String>,
    pub signature: String,
    pub body: Vec<String>,
}

impl JavaMethod {
    pub fn new(signature: impl Into<String>) -> Self {
        Self {
            annotations: Vec::new(),
            signature: signature.into(),
            body: Vec::new(),
        }
    }

    /// Public `@Override` implementation of a contract method
    pub fn overriding(method: &ContractMethod) -> Self {
        let params: Vec<String> = method
            .params
            .iter()
            .map(|p| format!("{} {}", p.ty.source_name(), p.name))
            .collect();
        Self::new(format!(
            "public {} {}({})",
            method.returns.source_name(),
            method.name,
            params.join(", ")
        ))
        .annotated("Override")
    }

    pub fn annotated(mut self, annotation: impl Into<String>) -> Self {
        self.annotations.push(annotation.into());
        self
    }

    /// Append one body line; continuation lines carry their own extra indent
    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.body.push(line.into());
        self
    }

    pub fn lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body.extend(lines.into_iter().map(Into::into));
        self
    }

    fn to_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.annotations.iter().map(|a| format!("@{a}")).collect();
        lines.push(format!("{} {{", self.signature));
        lines.extend(self.body.iter().map(|line| format!("    {line}")));
        lines.push("}".to_string());
        lines
    }
}

/// One top-level class to emit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JavaClass {
    pub package: String,
    pub name: String,
    pub implements: Vec<String>,
    pub fields: Vec<JavaField>,
    pub static_init: Vec<String>,
    pub methods: Vec<JavaMethod>,
}

impl JavaClass {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn implementing(mut self, interface: impl Into<String>) -> Self {
        self.implements.push(interface.into());
        self
    }

    pub fn field(mut self, field: JavaField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_method(&mut self, method: JavaMethod) {
        self.methods.push(method);
    }

    pub fn add_static_init(&mut self, line: impl Into<String>) {
        self.static_init.push(line.into());
    }
}

/// Flattened view handed to the template
#[derive(Serialize)]
struct ClassView<'a> {
    package: &'a str,
    name: &'a str,
    implements: &'a [String],
    field_lines: Vec<String>,
    members: Vec<Vec<String>>,
}

impl<'a> From<&'a JavaClass> for ClassView<'a> {
    fn from(class: &'a JavaClass) -> Self {
        let field_lines = class
            .fields
            .iter()
            .flat_map(|field| {
                field
                    .annotations
                    .iter()
                    .map(|a| format!("@{a}"))
                    .chain(std::iter::once(format!("{};", field.declaration)))
            })
            .collect();

        let mut members = Vec::new();
        if !class.static_init.is_empty() {
            let mut block = vec!["static {".to_string()];
            block.extend(class.static_init.iter().map(|line| format!("    {line}")));
            block.push("}".to_string());
            members.push(block);
        }
        members.extend(class.methods.iter().map(JavaMethod::to_lines));

        Self {
            package: &class.package,
            name: &class.name,
            implements: &class.implements,
            field_lines,
            members,
        }
    }
}

/// Renders [`JavaClass`] models to source text
pub struct SourceEmitter {
    tera: Tera,
}

impl SourceEmitter {
    pub fn new() -> Result<Self, GenerationError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(CLASS_TEMPLATE_NAME, CLASS_TEMPLATE)
            .map_err(|e| GenerationError::RenderError(format!("Failed to add template: {e}")))?;
        Ok(Self { tera })
    }

    pub fn render(&self, class: &JavaClass) -> Result<String, GenerationError> {
        let context = Context::from_serialize(ClassView::from(class)).map_err(|e| {
            GenerationError::RenderError(format!("Failed to build context for {}: {e}", class.name))
        })?;
        self.tera.render(CLASS_TEMPLATE_NAME, &context).map_err(|e| {
            GenerationError::RenderError(format!("Failed to render {}: {e}", class.name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declarations::TypeReference;

    #[test]
    fn test_render_class_with_field_and_method() {
        let emitter = SourceEmitter::new().unwrap();
        let mut class = JavaClass::new("com.example", "ApiImpl")
            .implementing("com.example.Api")
            .field(JavaField::new("private final int x"));
        class.add_method(
            JavaMethod::new("public int x()")
                .annotated("Override")
                .line("return x;"),
        );

        let source = emitter.render(&class).unwrap();
        assert_eq!(
            source.trim_end(),
            "package com.example;\n\
             \n\
             // Generated by contractgen. Do not edit.\n\
             public class ApiImpl implements com.example.Api {\n    \
             private final int x;\n\
             \n    \
             @Override\n    \
             public int x() {\n        \
             return x;\n    \
             }\n\
             }"
        );
    }

    #[test]
    fn test_render_static_block_and_default_package() {
        let emitter = SourceEmitter::new().unwrap();
        let mut class = JavaClass::new("", "b00");
        class.add_static_init("i0();");
        class.add_method(JavaMethod::new("private static void i0()").line("data[0] = 1;"));

        let source = emitter.render(&class).unwrap();
        assert!(source.starts_with("// Generated by contractgen"));
        assert!(source.contains("public class b00 {\n"));
        assert!(source.contains("    static {\n        i0();\n    }\n"));
        assert!(source.contains("    private static void i0() {\n        data[0] = 1;\n    }\n"));
    }

    #[test]
    fn test_overriding_signature() {
        let method = ContractMethod::new("greet", TypeReference::new("String"))
            .with_param("name", TypeReference::new("String"))
            .with_param(
                "tags",
                TypeReference::generic("java.util.List", vec![TypeReference::new("String")]),
            );
        let overriding = JavaMethod::overriding(&method);
        assert_eq!(overriding.annotations, vec!["Override".to_string()]);
        assert_eq!(
            overriding.signature,
            "public String greet(String name, java.util.List<String> tags)"
        );
    }

    #[test]
    fn test_field_annotations_render_on_their_own_line() {
        let emitter = SourceEmitter::new().unwrap();
        let class = JavaClass::new("a", "B")
            .field(JavaField::new("private final Object o").annotated("javax.annotation.Nullable"));
        let source = emitter.render(&class).unwrap();
        assert!(source.contains("    @javax.annotation.Nullable\n    private final Object o;\n"));
    }
}
