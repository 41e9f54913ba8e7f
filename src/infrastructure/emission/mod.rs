//! Source emission - class models rendered through embedded templates

pub mod java;

pub use java::*;
