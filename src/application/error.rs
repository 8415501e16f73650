use thiserror::Error;

use crate::{
    application::{hooks::HookError, render::HighlightError},
    config::LoadError,
    infra::error::InfraError,
};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error(transparent)]
    Highlight(#[from] HighlightError),
    #[error(transparent)]
    Hook(#[from] HookError),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    /// Messages for this error and each of its sources, outermost first.
    pub fn chain(&self) -> Vec<String> {
        let mut messages = vec![self.to_string()];
        let mut current = std::error::Error::source(self);
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_includes_sources() {
        let source = serde_json::from_str::<u8>("nope").expect_err("invalid json");
        let error = AppError::from(HookError::Payload {
            key: "pinned".to_string(),
            source,
        });

        let chain = error.chain();
        assert!(chain[0].starts_with("failed to encode payload entry `pinned`"));
        assert!(chain.len() >= 2);
    }
}
