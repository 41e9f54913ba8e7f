//! Infrastructure layer - concrete implementations of domain ports

pub mod emission;
pub mod locator;
pub mod output;

pub use emission::*;
pub use locator::*;
pub use output::*;
