use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("invalid option '{pair}': expected KEY=VALUE")]
    InvalidPair { pair: String },

    #[error("failed to read options file '{path}': {message}")]
    FileReadError { path: PathBuf, message: String },

    #[error("failed to parse options file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported options format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },
}

impl OptionsError {
    pub fn invalid_pair(pair: impl Into<String>) -> Self {
        Self::InvalidPair { pair: pair.into() }
    }

    pub fn file_read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::FileReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
