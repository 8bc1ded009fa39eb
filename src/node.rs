use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::utils::string::split_test_path;

/// Property keys set on nodes by the dispatch layer and the shipped builders.
pub mod property {
    pub const SKIP_REASON: &str = "skip_reason";
    pub const CATEGORY: &str = "category";

    /// Keys that annotations may not set directly.
    pub const RESERVED: &[&str] = &[SKIP_REASON, CATEGORY];

    pub fn is_reserved(name: &str) -> bool {
        RESERVED.contains(&name)
    }
}

pub const IGNORED_REASON: &str = "ignored";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Binary,
    Module,
    Test,
    Benchmark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Runnable,
    NotRunnable,
    Ignored,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Runnable => "runnable",
            RunState::NotRunnable => "not_runnable",
            RunState::Ignored => "ignored",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestNode {
    pub name: String,
    pub full_name: String,
    pub kind: NodeKind,
    pub run_state: RunState,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, serde_json::Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TestNode>,
}

impl TestNode {
    /// Root node for a binary identified by `identifier` (usually its path).
    pub fn binary(identifier: &str) -> Self {
        Self {
            name: binary_display_name(identifier),
            full_name: identifier.to_string(),
            kind: NodeKind::Binary,
            run_state: RunState::Runnable,
            properties: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Placeholder standing in for a whole binary that could not be built.
    pub fn not_runnable(identifier: &str, reason: impl Into<String>) -> Self {
        let reason: String = reason.into();
        let mut node = Self::binary(identifier);
        node.run_state = RunState::NotRunnable;
        node.set_property(property::SKIP_REASON, reason);
        node
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn skip_reason(&self) -> Option<&str> {
        self.property(property::SKIP_REASON)
            .and_then(|v| v.as_str())
    }

    pub fn is_runnable(&self) -> bool {
        self.run_state == RunState::Runnable
    }

    /// Inserts a test case at `path` (segments separated by `::`), creating
    /// intermediate module nodes on the way.
    pub fn insert_case(
        &mut self,
        path: &str,
        kind: NodeKind,
        run_state: RunState,
        skip_reason: Option<&str>,
    ) {
        let segments = split_test_path(path);
        let Some((leaf, modules)) = segments.split_last() else {
            return;
        };

        let mut current = self;
        let mut prefix = String::new();
        for segment in modules {
            if !prefix.is_empty() {
                prefix.push_str("::");
            }
            prefix.push_str(segment);

            let index = match current
                .children
                .iter()
                .position(|c| c.kind == NodeKind::Module && c.name == *segment)
            {
                Some(index) => index,
                None => {
                    current.children.push(TestNode {
                        name: segment.to_string(),
                        full_name: prefix.clone(),
                        kind: NodeKind::Module,
                        run_state: RunState::Runnable,
                        properties: BTreeMap::new(),
                        children: Vec::new(),
                    });
                    current.children.len() - 1
                }
            };
            current = &mut current.children[index];
        }

        let mut case = TestNode {
            name: leaf.to_string(),
            full_name: segments.join("::"),
            kind,
            run_state,
            properties: BTreeMap::new(),
            children: Vec::new(),
        };
        if let Some(reason) = skip_reason {
            case.set_property(property::SKIP_REASON, reason);
        }
        current.children.push(case);
    }

    /// Number of test and benchmark leaves below (and including) this node.
    pub fn count_cases(&self) -> usize {
        self.count_matching(|_| true)
    }

    pub fn count_in_state(&self, state: RunState) -> usize {
        self.count_matching(|n| n.run_state == state)
    }

    fn count_matching(&self, predicate: impl Fn(&TestNode) -> bool + Copy) -> usize {
        let own = matches!(self.kind, NodeKind::Test | NodeKind::Benchmark) && predicate(self);
        usize::from(own)
            + self
                .children
                .iter()
                .map(|c| c.count_matching(predicate))
                .sum::<usize>()
    }

    pub fn find(&self, full_name: &str) -> Option<&TestNode> {
        if self.full_name == full_name && self.kind != NodeKind::Binary {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(full_name))
    }
}

fn binary_display_name(identifier: &str) -> String {
    Path::new(identifier)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(identifier)
        .to_string()
}
