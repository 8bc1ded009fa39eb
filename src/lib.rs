//! binsuite
//!
//! Picks the test builder for a compiled test binary, either the one the
//! binary declares in its suite manifest or the libtest default, and turns
//! load and resolution failures into a not-runnable node for that binary.
pub mod binary;
pub mod builder;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod logging;
pub mod node;
pub mod options;
pub mod output;
pub mod utils;

pub use binary::{Annotation, BinaryHandle, DeclaredTest, FsModuleLoader, ModuleLoader};
pub use builder::{BuilderRegistry, BuilderResolver, TestBinaryBuilder};
pub use dispatch::DispatchingBuilder;
pub use node::{NodeKind, RunState, TestNode};
pub use options::DiscoveryOptions;
