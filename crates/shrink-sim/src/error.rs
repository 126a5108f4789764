use std::path::PathBuf;

use shrink_core::{ConfigError, ShrinkError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("file not found: {}", path.display())]
    MissingPath { path: PathBuf },

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("invalid script {}: {message}", path.display())]
    InvalidScript { path: PathBuf, message: String },

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("shrink setup failed: {0}")]
    Shrink(#[from] ShrinkError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn script(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidScript {
            path: path.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingPath { .. } | Self::InvalidArgument { .. } => 2,
            Self::InvalidScript { .. } | Self::Config(_) => 3,
            Self::Shrink(_) => 4,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use shrink_core::{ConfigurationError, ShrinkError};

    use super::SimError;

    #[test]
    fn exit_codes_group_by_cause() {
        assert_eq!(SimError::invalid("frame-ms must be positive").exit_code(), 2);
        assert_eq!(SimError::script("a.toml", "bad step").exit_code(), 3);
        let shrink = ShrinkError::from(ConfigurationError::NonFiniteGeometry);
        assert_eq!(SimError::from(shrink).exit_code(), 4);
    }

    #[test]
    fn messages_name_the_path() {
        let err = SimError::MissingPath {
            path: "missing/script.toml".into(),
        };
        assert_eq!(err.to_string(), "file not found: missing/script.toml");
        let err = SimError::script("demo.toml", "expected a table");
        assert!(err.to_string().contains("demo.toml"));
        assert!(err.to_string().contains("expected a table"));
    }
}
