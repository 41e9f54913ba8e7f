//! Neutral declaration model the generators work on.
//!
//! These types describe contracts the way a host compiler would expose them:
//! names, parameters, type references and marker metadata. Nothing here
//! knows how the declarations were discovered.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};
use crate::core::utils::split_qualified_name;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

const BOXED_PRIMITIVES: &[&str] = &[
    "java.lang.Boolean",
    "java.lang.Byte",
    "java.lang.Short",
    "java.lang.Integer",
    "java.lang.Long",
    "java.lang.Character",
    "java.lang.Float",
    "java.lang.Double",
    "Boolean",
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Character",
    "Float",
    "Double",
];

/// A reference to a type, possibly instantiated with generic arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeReference {
    /// Fully-qualified raw name, e.g. `java.util.List` or `byte[]`
    pub name: String,
    /// Generic arguments in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<TypeReference>,
}

impl TypeReference {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, args: Vec<TypeReference>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Whether the type carries generic arguments
    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// Source form including generic arguments, e.g. `java.util.List<com.example.User>`
    pub fn source_name(&self) -> String {
        if self.args.is_empty() {
            return self.name.clone();
        }
        let args: Vec<String> = self.args.iter().map(TypeReference::source_name).collect();
        format!("{}<{}>", self.name, args.join(", "))
    }

    pub fn is_primitive(&self) -> bool {
        !self.is_generic() && PRIMITIVES.contains(&self.name.as_str())
    }

    pub fn is_string(&self) -> bool {
        !self.is_generic() && matches!(self.name.as_str(), "String" | "java.lang.String")
    }

    pub fn is_byte_array(&self) -> bool {
        !self.is_generic() && self.name == "byte[]"
    }

    /// Primitives, their boxed forms and strings render directly as one value
    pub fn is_scalar(&self) -> bool {
        self.is_primitive()
            || self.is_string()
            || (!self.is_generic() && BOXED_PRIMITIVES.contains(&self.name.as_str()))
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source_name())
    }
}

/// A named, typed method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeReference) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Marker metadata attached to a contract method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MethodMarkers {
    /// HTTP route template; marks a service method
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// HTTP verb markers exactly as declared
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub verbs: Vec<String>,
    /// Resource path relative to the contract's namespace
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

/// A method of an abstract contract
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractMethod {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    pub returns: TypeReference,
    #[serde(default)]
    pub markers: MethodMarkers,
}

impl ContractMethod {
    pub fn new(name: impl Into<String>, returns: TypeReference) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns,
            markers: MethodMarkers::default(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: TypeReference) -> Self {
        self.params.push(Parameter::new(name, ty));
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.markers.path = Some(path.into());
        self
    }

    pub fn with_verb(mut self, verb: impl Into<String>) -> Self {
        self.markers.verbs.push(verb.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.markers.resource = Some(resource.into());
        self
    }
}

/// An abstract type whose methods describe the behaviour to generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    /// Fully-qualified name
    pub name: String,
    /// Contract-level message bundle marker
    #[serde(default)]
    pub messages: bool,
    #[serde(default)]
    pub methods: Vec<ContractMethod>,
}

impl Contract {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: false,
            methods: Vec::new(),
        }
    }

    pub fn with_method(mut self, method: ContractMethod) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_messages(mut self) -> Self {
        self.messages = true;
        self
    }

    pub fn namespace(&self) -> &str {
        split_qualified_name(&self.name).0
    }

    pub fn simple_name(&self) -> &str {
        split_qualified_name(&self.name).1
    }
}

fn default_public() -> bool {
    true
}

/// A field of a declared parameter type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDeclaration {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeReference,
    #[serde(default = "default_public")]
    pub public: bool,
}

/// A method of a declared parameter type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDeclaration {
    pub name: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    pub returns: TypeReference,
    #[serde(default = "default_public")]
    pub public: bool,
}

/// Member shape of a concrete type used as a service parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldDeclaration>,
    #[serde(default)]
    pub methods: Vec<MethodDeclaration>,
}

/// Every declaration visible to one generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclarationSet {
    pub contracts: Vec<Contract>,
    pub types: Vec<TypeDeclaration>,
}

impl DeclarationSet {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self {
            contracts,
            types: Vec::new(),
        }
    }

    pub fn with_type(mut self, declaration: TypeDeclaration) -> Self {
        self.types.push(declaration);
        self
    }

    /// Look up the member shape of a type by its fully-qualified name
    pub fn find_type(&self, name: &str) -> Option<&TypeDeclaration> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Check names are present and unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for contract in &self.contracts {
            if contract.name.is_empty() {
                return Err(Error::declaration("contract name cannot be empty"));
            }
            if !seen.insert(contract.name.as_str()) {
                return Err(Error::declaration(format!(
                    "duplicate contract {}",
                    contract.name
                )));
            }
            for method in &contract.methods {
                if method.name.is_empty() {
                    return Err(Error::declaration(format!(
                        "contract {} declares a method without a name",
                        contract.name
                    )));
                }
            }
        }

        let mut seen_types = std::collections::HashSet::new();
        for declaration in &self.types {
            if !seen_types.insert(declaration.name.as_str()) {
                return Err(Error::declaration(format!(
                    "duplicate type {}",
                    declaration.name
                )));
            }
        }
        Ok(())
    }
}
