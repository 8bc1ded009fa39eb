use std::fs;
use std::path::Path;
use tracing::debug;

use super::{BinaryHandle, SuiteManifest};
use crate::error::LoadError;

pub trait ModuleLoader: Send + Sync {
    fn load(&self, path: &str) -> Result<BinaryHandle, LoadError>;
}

/// Loads binaries from the filesystem together with their sidecar manifest.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsModuleLoader;

impl ModuleLoader for FsModuleLoader {
    fn load(&self, path: &str) -> Result<BinaryHandle, LoadError> {
        let binary = Path::new(path);

        let metadata = match fs::metadata(binary) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::not_found(binary));
            }
            Err(e) => return Err(LoadError::read(binary, e)),
        };

        if !metadata.is_file() {
            return Err(LoadError::not_a_file(binary));
        }

        let manifest = SuiteManifest::for_binary(binary)?;
        debug!(
            path,
            size = metadata.len(),
            annotations = manifest.annotations.len(),
            "loaded test binary"
        );

        Ok(BinaryHandle::new(binary).with_manifest(manifest))
    }
}
