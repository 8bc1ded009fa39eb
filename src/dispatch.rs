use tracing::debug;

use crate::binary::{BinaryHandle, FsModuleLoader, ModuleLoader};
use crate::builder::{BuilderRegistry, BuilderResolver, TestBinaryBuilder};
use crate::error::Result;
use crate::node::TestNode;
use crate::options::DiscoveryOptions;

pub const DISPATCHING_BUILDER_NAME: &str = "dispatch";

/// Entry point: loads a binary, resolves its builder and delegates to it.
///
/// Loading and resolution failures never escape `build_from_*`; they come
/// back as a not-runnable placeholder for the binary. What the resolved
/// builder returns is passed through untouched.
pub struct DispatchingBuilder {
    loader: Box<dyn ModuleLoader>,
    resolver: BuilderResolver,
}

impl DispatchingBuilder {
    pub fn new() -> Self {
        Self::with_parts(Box::new(FsModuleLoader), BuilderRegistry::new())
    }

    pub fn with_parts(loader: Box<dyn ModuleLoader>, registry: BuilderRegistry) -> Self {
        Self {
            loader,
            resolver: BuilderResolver::new(registry),
        }
    }

    pub fn registry(&self) -> &BuilderRegistry {
        self.resolver.registry()
    }

    pub fn build_from_path(&self, path: &str, options: &DiscoveryOptions) -> TestNode {
        debug!(path, "loading binary");

        match self.loader.load(path) {
            Ok(handle) => self.build_using_inner_builder(&handle, path, options),
            Err(e) => {
                debug!(path, error = %e, "binary could not be loaded");
                TestNode::not_runnable(path, e.to_string())
            }
        }
    }

    pub fn build_from_handle(&self, handle: &BinaryHandle, options: &DiscoveryOptions) -> TestNode {
        let location = handle.location();
        debug!(binary = %location, "building from loaded binary");

        self.build_using_inner_builder(handle, &location, options)
    }

    /// Like [`build_from_path`](Self::build_from_path), but hands loading and
    /// resolution errors back to the caller.
    pub fn try_build_from_path(&self, path: &str, options: &DiscoveryOptions) -> Result<TestNode> {
        let handle = self.loader.load(path)?;
        let builder = self.resolver.resolve(&handle)?;
        Ok(builder.build(&handle, options))
    }

    fn build_using_inner_builder(
        &self,
        handle: &BinaryHandle,
        name: &str,
        options: &DiscoveryOptions,
    ) -> TestNode {
        let builder = match self.resolver.resolve(handle) {
            Ok(builder) => builder,
            Err(e) => {
                debug!(binary = name, error = %e, "test builder could not be resolved");
                return TestNode::not_runnable(name, e.to_string());
            }
        };

        debug!(binary = name, builder = builder.name(), "delegating to test builder");
        builder.build(handle, options)
    }
}

impl Default for DispatchingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBinaryBuilder for DispatchingBuilder {
    fn name(&self) -> &str {
        DISPATCHING_BUILDER_NAME
    }

    fn build(&self, handle: &BinaryHandle, options: &DiscoveryOptions) -> TestNode {
        self.build_from_handle(handle, options)
    }
}
