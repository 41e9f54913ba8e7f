//! Generation domain module - the framework every generator plugs into
//!
//! A pass discovers the declarations carrying a generator's marker, groups
//! them per contract, hands the groups to the generator and writes the
//! resulting artifacts through an [`ArtifactSink`]. A failing generator
//! aborts the whole pass before anything is written.

pub mod batch;
pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod traits;
pub mod types;

pub use batch::*;
pub use context::*;
pub use errors::*;
pub use orchestrator::*;
pub use traits::*;
pub use types::*;
