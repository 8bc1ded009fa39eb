use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::{Annotation, DeclaredTest};
use crate::error::LoadError;

/// Suffixes probed next to a binary, in order.
pub const MANIFEST_SUFFIXES: &[&str] = &[".suite.json", ".suite.yaml", ".suite.yml"];

/// Sidecar file declaring metadata for a test binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteManifest {
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub tests: Vec<DeclaredTest>,
}

impl SuiteManifest {
    /// Returns the first sidecar manifest that exists for `binary`.
    pub fn locate(binary: &Path) -> Option<PathBuf> {
        MANIFEST_SUFFIXES.iter().find_map(|suffix| {
            let mut candidate = binary.as_os_str().to_owned();
            candidate.push(suffix);
            let candidate = PathBuf::from(candidate);
            trace!(path = %candidate.display(), "probing suite manifest");
            candidate.is_file().then_some(candidate)
        })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::read(path, e))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let manifest: Self = match extension {
            "json" => serde_json::from_str(&content)
                .map_err(|e| LoadError::manifest(path, e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| LoadError::manifest(path, e.to_string()))?,
            other => {
                return Err(LoadError::manifest(
                    path,
                    format!("unsupported manifest format: {other}"),
                ))
            }
        };

        debug!(
            path = %path.display(),
            annotations = manifest.annotations.len(),
            tests = manifest.tests.len(),
            "loaded suite manifest"
        );
        Ok(manifest)
    }

    /// Loads the sidecar manifest for `binary`, or an empty one if there is none.
    pub fn for_binary(binary: &Path) -> Result<Self, LoadError> {
        match Self::locate(binary) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_locate_json_sidecar() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("codec-3f2a");
        fs::write(&binary, b"\x7fELF").unwrap();
        fs::write(temp_dir.path().join("codec-3f2a.suite.json"), "{}").unwrap();

        let located = SuiteManifest::locate(&binary).unwrap();
        assert_eq!(located, temp_dir.path().join("codec-3f2a.suite.json"));
    }

    #[test]
    fn test_locate_keeps_binary_extension() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("codec.exe");
        fs::write(temp_dir.path().join("codec.exe.suite.yml"), "{}").unwrap();

        let located = SuiteManifest::locate(&binary).unwrap();
        assert_eq!(located, temp_dir.path().join("codec.exe.suite.yml"));
    }

    #[test]
    fn test_missing_sidecar_is_empty_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let binary = temp_dir.path().join("codec");

        let manifest = SuiteManifest::for_binary(&binary).unwrap();
        assert_eq!(manifest, SuiteManifest::default());
    }

    #[test]
    fn test_load_yaml_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codec.suite.yaml");
        fs::write(
            &path,
            r#"
annotations:
  - kind: test_builder
    builder: manifest
  - kind: property
    name: owner
    value: storage-team
tests:
  - name: codec::roundtrip
  - name: codec::fuzz
    ignored: true
    reason: needs corpus
"#,
        )
        .unwrap();

        let manifest = SuiteManifest::load(&path).unwrap();
        assert_eq!(manifest.annotations.len(), 2);
        assert_eq!(manifest.tests.len(), 2);
        assert!(manifest.tests[1].ignored);
        assert_eq!(manifest.tests[1].reason.as_deref(), Some("needs corpus"));
    }

    #[test]
    fn test_unknown_top_level_key_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("codec.suite.json");
        fs::write(&path, r#"{"builder": "manifest"}"#).unwrap();

        let err = SuiteManifest::load(&path).unwrap_err();
        assert!(matches!(err, LoadError::Manifest { .. }));
        assert!(err.to_string().contains("builder"));
    }
}
