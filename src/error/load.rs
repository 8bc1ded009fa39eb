use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("not a test binary (expected a regular file): {path}")]
    NotAFile { path: PathBuf },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid suite manifest '{path}': {message}")]
    Manifest { path: PathBuf, message: String },
}

impl LoadError {
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound { path: path.into() }
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn manifest(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Manifest {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = LoadError::not_found("target/debug/deps/missing");
        assert_eq!(err.to_string(), "file not found: target/debug/deps/missing");
    }

    #[test]
    fn test_not_a_file_display() {
        let err = LoadError::not_a_file("/tmp");
        assert_eq!(
            err.to_string(),
            "not a test binary (expected a regular file): /tmp"
        );
    }

    #[test]
    fn test_read_display_includes_source() {
        let source = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = LoadError::read("/bin/suite", source);
        assert_eq!(err.to_string(), "failed to read '/bin/suite': denied");
    }

    #[test]
    fn test_manifest_display() {
        let err = LoadError::manifest("suite.suite.json", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "invalid suite manifest 'suite.suite.json': expected value at line 1"
        );
    }
}
