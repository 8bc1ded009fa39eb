use std::collections::BTreeMap;
use tracing::debug;

use super::{LibtestBuilder, ManifestBuilder, TestBinaryBuilder};
use crate::error::ResolutionError;

pub const LIBTEST_KEY: &str = "libtest";
pub const MANIFEST_KEY: &str = "manifest";

pub type BuilderFactory =
    Box<dyn Fn() -> anyhow::Result<Box<dyn TestBinaryBuilder>> + Send + Sync>;

/// Maps the keys used in builder override declarations to factories.
pub struct BuilderRegistry {
    factories: BTreeMap<String, BuilderFactory>,
}

impl BuilderRegistry {
    pub fn new() -> Self {
        let mut registry = Self::empty();

        registry.register(LIBTEST_KEY, || Ok(Box::new(LibtestBuilder::new())));
        registry.register(MANIFEST_KEY, || Ok(Box::new(ManifestBuilder::new())));
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// Adds a factory, replacing any previous one under the same key.
    pub fn register<F>(&mut self, key: impl Into<String>, factory: F)
    where
        F: Fn() -> anyhow::Result<Box<dyn TestBinaryBuilder>> + Send + Sync + 'static,
    {
        let key = key.into();
        debug!(key = %key, "registering test builder");
        self.factories.insert(key, Box::new(factory));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn construct(&self, key: &str) -> Result<Box<dyn TestBinaryBuilder>, ResolutionError> {
        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| ResolutionError::unknown_builder(key, self.keys()))?;

        factory().map_err(|e| ResolutionError::construction(key, e.to_string()))
    }
}

impl Default for BuilderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
