use std::sync::Arc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    #[error("no lexer found for language `{language}`")]
    UnknownLanguage { language: String },
    #[error("failed to highlight `{language}` code: {message}")]
    Highlighting { language: String, message: String },
    #[error("unknown highlighting theme `{theme}`")]
    UnknownTheme { theme: String },
    #[error("failed to render stylesheet for theme `{theme}`: {message}")]
    Stylesheet { theme: String, message: String },
}

impl HighlightError {
    pub fn unknown_language(language: impl Into<String>) -> Self {
        Self::UnknownLanguage {
            language: language.into(),
        }
    }
}

/// Tokenizer that turns source code into inline HTML markup for one language.
///
/// Implementations must not fall back to another lexer when `language` is not
/// recognised; they return [`HighlightError::UnknownLanguage`] instead.
pub trait Highlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

impl<H: Highlighter + ?Sized> Highlighter for &H {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        (**self).highlight(code, language)
    }
}

impl<H: Highlighter + ?Sized> Highlighter for Arc<H> {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        (**self).highlight(code, language)
    }
}
