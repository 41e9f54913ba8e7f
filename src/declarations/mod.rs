//! Declaration model and the adapters that populate it

pub mod loader;
pub mod types;

pub use loader::*;
pub use types::*;
