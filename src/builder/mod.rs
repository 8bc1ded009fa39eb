pub mod libtest;
pub mod manifest;
pub mod registry;
pub mod resolver;

pub use libtest::LibtestBuilder;
pub use manifest::ManifestBuilder;
pub use registry::{BuilderFactory, BuilderRegistry};
pub use resolver::BuilderResolver;

use tracing::warn;

use crate::binary::{Annotation, BinaryHandle};
use crate::node::{property, TestNode};
use crate::options::DiscoveryOptions;

/// Discovers the tests in a binary and arranges them into a tree.
///
/// Implementations own their failures: a binary that cannot be listed comes
/// back as a not-runnable node rather than an error.
pub trait TestBinaryBuilder: Send + Sync {
    fn name(&self) -> &str;

    fn build(&self, handle: &BinaryHandle, options: &DiscoveryOptions) -> TestNode;
}

/// Copies category and property annotations of the binary onto its root node.
///
/// Property annotations naming a reserved key are dropped.
pub fn apply_binary_annotations(root: &mut TestNode, handle: &BinaryHandle) {
    let mut categories = Vec::new();
    for annotation in handle.annotations() {
        match annotation {
            Annotation::Category { name } => {
                categories.push(serde_json::Value::from(name.as_str()));
            }
            Annotation::Property { name, .. } if property::is_reserved(name) => {
                warn!(
                    binary = %handle.location(),
                    property = %name,
                    "ignoring property annotation with reserved name"
                );
            }
            Annotation::Property { name, value } => {
                root.set_property(name.as_str(), value.as_str());
            }
            Annotation::TestBuilder { .. } => {}
        }
    }

    if !categories.is_empty() {
        root.set_property(property::CATEGORY, categories);
    }
}
