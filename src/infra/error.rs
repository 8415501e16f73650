use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("telemetry initialization failed: {0}")]
    Telemetry(String),
    #[error("failed to load posts from `{}`: {message}", path.display())]
    Posts { path: PathBuf, message: String },
}

impl InfraError {
    pub fn telemetry(message: impl Into<String>) -> Self {
        Self::Telemetry(message.into())
    }

    pub fn posts(path: &Path, message: impl Into<String>) -> Self {
        Self::Posts {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
