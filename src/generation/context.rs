//! Generation context - the state shared by every generator of one pass

use crate::core::Config;
use crate::declarations::DeclarationSet;
use crate::infrastructure::{ResourceLocator, SourceEmitter};

/// Read-only collaborators handed to each generator.
///
/// Anything a generator caches lives in its own `generate` call, so nothing
/// outlives the pass.
pub struct PassContext<'a> {
    pub declarations: &'a DeclarationSet,
    pub locator: &'a ResourceLocator,
    pub config: &'a Config,
    pub emitter: &'a SourceEmitter,
}

impl<'a> PassContext<'a> {
    pub fn new(
        declarations: &'a DeclarationSet,
        locator: &'a ResourceLocator,
        config: &'a Config,
        emitter: &'a SourceEmitter,
    ) -> Self {
        Self {
            declarations,
            locator,
            config,
            emitter,
        }
    }
}
