pub mod loader;
pub mod manifest;

pub use loader::{FsModuleLoader, ModuleLoader};
pub use manifest::SuiteManifest;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Metadata declared on a test binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Annotation {
    /// Names the registry key of the builder that should discover the binary.
    TestBuilder { builder: String },
    Category { name: String },
    Property { name: String, value: String },
}

/// A test the binary declares up front, without being executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeclaredTest {
    pub name: String,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub benchmark: bool,
}

impl DeclaredTest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignored: false,
            reason: None,
            benchmark: false,
        }
    }
}

/// A loaded test binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryHandle {
    path: PathBuf,
    annotations: Vec<Annotation>,
    declared_tests: Vec<DeclaredTest>,
}

impl BinaryHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            annotations: Vec::new(),
            declared_tests: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn with_builder_override(self, builder: impl Into<String>) -> Self {
        self.with_annotation(Annotation::TestBuilder {
            builder: builder.into(),
        })
    }

    pub fn with_declared_test(mut self, test: DeclaredTest) -> Self {
        self.declared_tests.push(test);
        self
    }

    pub fn with_manifest(mut self, manifest: SuiteManifest) -> Self {
        self.annotations.extend(manifest.annotations);
        self.declared_tests.extend(manifest.tests);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The binary's path rendered as a string, used as its identity.
    pub fn location(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.location())
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn builder_overrides(&self) -> Vec<&str> {
        self.annotations
            .iter()
            .filter_map(|a| match a {
                Annotation::TestBuilder { builder } => Some(builder.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn declared_tests(&self) -> &[DeclaredTest] {
        &self.declared_tests
    }
}
