use tracing::{debug, warn};

use super::{BuilderRegistry, LibtestBuilder, TestBinaryBuilder};
use crate::binary::BinaryHandle;
use crate::error::ResolutionError;

/// Picks the builder for a binary from its override declaration.
pub struct BuilderResolver {
    registry: BuilderRegistry,
}

impl BuilderResolver {
    pub fn new(registry: BuilderRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        &self.registry
    }

    /// Exactly one override constructs the named builder; none, or more than
    /// one, falls back to [`LibtestBuilder`].
    pub fn resolve(
        &self,
        handle: &BinaryHandle,
    ) -> Result<Box<dyn TestBinaryBuilder>, ResolutionError> {
        debug!(binary = %handle.location(), "looking up test builder");

        let overrides = handle.builder_overrides();
        match overrides.as_slice() {
            [key] => {
                debug!(builder = key, "constructing test builder");
                self.registry.construct(key)
            }
            [] => Ok(Self::default_builder()),
            _ => {
                warn!(
                    binary = %handle.location(),
                    overrides = ?overrides,
                    "multiple test builder overrides declared, using default builder"
                );
                Ok(Self::default_builder())
            }
        }
    }

    pub fn default_builder() -> Box<dyn TestBinaryBuilder> {
        Box::new(LibtestBuilder::new())
    }
}

impl Default for BuilderResolver {
    fn default() -> Self {
        Self::new(BuilderRegistry::new())
    }
}
