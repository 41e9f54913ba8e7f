//! contractgen - generates Java implementations of declared contracts
//!
//! A generation pass reads a declaration manifest, finds the methods that
//! carry a generator's marker and emits Java source for them:
//!
//! - [`generators::ResourceGenerator`] embeds resource files into generated classes
//! - [`generators::ServiceGenerator`] builds remote-service proxies for HTTP routes
//! - [`generators::MessageGenerator`] implements message bundles per locale
#![deny(unsafe_code)]

pub mod core;
pub mod declarations;
pub mod generation;
pub mod generators;
pub mod infrastructure;

pub use crate::core::{Config, Error, Result};
pub use crate::generation::{GenerationError, GenerationPass, PassContext, PassSummary};
