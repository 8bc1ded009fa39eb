use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("no test builder registered under '{key}' (available: {})", available.join(", "))]
    UnknownBuilder { key: String, available: Vec<String> },

    /// The factory's own message is the whole display, so it can be surfaced
    /// as a skip reason unchanged.
    #[error("{message}")]
    Construction { builder: String, message: String },
}

impl ResolutionError {
    pub fn unknown_builder(key: impl Into<String>, available: Vec<String>) -> Self {
        Self::UnknownBuilder {
            key: key.into(),
            available,
        }
    }

    pub fn construction(builder: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Construction {
            builder: builder.into(),
            message: message.into(),
        }
    }

    pub fn builder_key(&self) -> &str {
        match self {
            Self::UnknownBuilder { key, .. } => key,
            Self::Construction { builder, .. } => builder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_builder_display() {
        let err = ResolutionError::unknown_builder(
            "nextest",
            vec!["libtest".to_string(), "manifest".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "no test builder registered under 'nextest' (available: libtest, manifest)"
        );
    }

    #[test]
    fn test_construction_display_is_message_only() {
        let err = ResolutionError::construction("bad", "no parameterless ctor");
        assert_eq!(err.to_string(), "no parameterless ctor");
        assert_eq!(err.builder_key(), "bad");
    }
}
