use tracing::debug;

use super::libtest::{OPTION_BENCHMARKS, OPTION_FILTER};
use super::{apply_binary_annotations, TestBinaryBuilder};
use crate::binary::BinaryHandle;
use crate::node::{NodeKind, RunState, TestNode, IGNORED_REASON};
use crate::options::DiscoveryOptions;

pub const MANIFEST_BUILDER_NAME: &str = "manifest";

/// Builds the tree from the tests a binary declares in its suite manifest,
/// without executing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestBuilder;

impl ManifestBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl TestBinaryBuilder for ManifestBuilder {
    fn name(&self) -> &str {
        MANIFEST_BUILDER_NAME
    }

    fn build(&self, handle: &BinaryHandle, options: &DiscoveryOptions) -> TestNode {
        let filter = options.get_str(OPTION_FILTER);
        let include_benchmarks = options.get_bool(OPTION_BENCHMARKS).unwrap_or(true);

        let mut root = TestNode::binary(&handle.location());
        apply_binary_annotations(&mut root, handle);

        for test in handle.declared_tests() {
            if filter.as_deref().is_some_and(|f| !test.name.contains(f)) {
                continue;
            }
            if test.benchmark && !include_benchmarks {
                continue;
            }

            let kind = if test.benchmark {
                NodeKind::Benchmark
            } else {
                NodeKind::Test
            };

            if test.ignored {
                let reason = test.reason.as_deref().unwrap_or(IGNORED_REASON);
                root.insert_case(&test.name, kind, RunState::Ignored, Some(reason));
            } else {
                root.insert_case(&test.name, kind, RunState::Runnable, None);
            }
        }

        debug!(
            binary = %handle.location(),
            declared = handle.declared_tests().len(),
            tests = root.count_cases(),
            "built tests from manifest"
        );
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{Annotation, DeclaredTest};
    use serde_json::json;

    fn handle() -> BinaryHandle {
        BinaryHandle::new("target/debug/deps/codec-3f2a")
            .with_builder_override("manifest")
            .with_annotation(Annotation::Category {
                name: "slow".to_string(),
            })
            .with_declared_test(DeclaredTest::new("codec::roundtrip"))
            .with_declared_test(DeclaredTest {
                name: "codec::fuzz".to_string(),
                ignored: true,
                reason: Some("needs corpus".to_string()),
                benchmark: false,
            })
            .with_declared_test(DeclaredTest {
                name: "codec::slow_path".to_string(),
                ignored: true,
                reason: None,
                benchmark: false,
            })
            .with_declared_test(DeclaredTest {
                name: "throughput".to_string(),
                ignored: false,
                reason: None,
                benchmark: true,
            })
    }

    #[test]
    fn test_builds_declared_tests() {
        let node = ManifestBuilder::new().build(&handle(), &DiscoveryOptions::new());

        assert_eq!(node.name, "codec-3f2a");
        assert_eq!(node.count_cases(), 4);
        assert_eq!(node.count_in_state(RunState::Ignored), 2);
        assert_eq!(
            node.find("codec::fuzz").and_then(|n| n.skip_reason()),
            Some("needs corpus")
        );
        assert_eq!(
            node.find("codec::slow_path").and_then(|n| n.skip_reason()),
            Some("ignored")
        );
        assert_eq!(
            node.find("throughput").map(|n| n.kind),
            Some(NodeKind::Benchmark)
        );
        assert_eq!(node.property("category"), Some(&json!(["slow"])));
    }

    #[test]
    fn test_filter_and_benchmarks_options() {
        let options = DiscoveryOptions::new()
            .with(OPTION_FILTER, "round")
            .with(OPTION_BENCHMARKS, false);
        let node = ManifestBuilder::new().build(&handle(), &options);

        assert_eq!(node.count_cases(), 1);
        assert!(node.find("codec::roundtrip").is_some());
    }

    #[test]
    fn test_numeric_filter_from_pair() {
        let handle = BinaryHandle::new("suite")
            .with_declared_test(DeclaredTest::new("regress::issue_2021"))
            .with_declared_test(DeclaredTest::new("codec::roundtrip"));
        let options = DiscoveryOptions::from_pairs(&["filter=2021"]).unwrap();

        let node = ManifestBuilder::new().build(&handle, &options);

        assert_eq!(node.count_cases(), 1);
        assert!(node.find("regress::issue_2021").is_some());
    }

    #[test]
    fn test_no_declared_tests_is_empty_but_runnable() {
        let handle = BinaryHandle::new("suite").with_builder_override("manifest");
        let node = ManifestBuilder::new().build(&handle, &DiscoveryOptions::new());

        assert!(node.is_runnable());
        assert!(node.children.is_empty());
    }
}
