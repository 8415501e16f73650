use metrics::counter;
use tracing::warn;

use super::{
    alias::resolve_alias,
    service::highlighter,
    tableize::{TableizeOptions, tableize_with},
    types::{HighlightError, Highlighter},
};

pub const METRIC_HIGHLIGHT_BLOCKS: &str = "postpress_highlight_total";
pub const METRIC_HIGHLIGHT_FAILURES: &str = "postpress_highlight_failures_total";

/// Alias resolution, delegated tokenization, then table wrapping.
#[derive(Debug, Clone)]
pub struct CodeFormatter<H> {
    highlighter: H,
    options: TableizeOptions,
}

impl<H: Highlighter> CodeFormatter<H> {
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            options: TableizeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: TableizeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &TableizeOptions {
        &self.options
    }

    /// Errors from the highlighter, an unknown lexer in particular, are
    /// returned as-is; there is no fallback language.
    pub fn format(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let language = resolve_alias(language);

        let highlighted = match self.highlighter.highlight(code, language) {
            Ok(html) => html,
            Err(err) => {
                warn!(
                    target = "application::render::highlight",
                    language,
                    error = %err,
                    "highlighting failed"
                );
                counter!(METRIC_HIGHLIGHT_FAILURES).increment(1);
                return Err(err);
            }
        };

        counter!(METRIC_HIGHLIGHT_BLOCKS).increment(1);
        Ok(tableize_with(&highlighted, language, &self.options))
    }
}

/// Format one code block with the shared class-based highlighter.
pub fn highlight(code: &str, language: &str) -> Result<String, HighlightError> {
    CodeFormatter::new(highlighter()).format(code, language)
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, num::NonZeroU32};

    use super::*;

    /// Echoes the code back and records which language was requested.
    #[derive(Default)]
    struct RecordingHighlighter {
        requested: RefCell<Vec<String>>,
    }

    impl Highlighter for RecordingHighlighter {
        fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
            self.requested.borrow_mut().push(language.to_string());
            if language == "klingon" {
                return Err(HighlightError::unknown_language(language));
            }
            Ok(code.to_string())
        }
    }

    fn requested_for(language: &str) -> String {
        let recorder = RecordingHighlighter::default();
        CodeFormatter::new(&recorder)
            .format("x\n", language)
            .expect("format succeeds");
        let requested = recorder.requested.borrow();
        requested.first().cloned().expect("delegate called once")
    }

    #[test]
    fn aliases_are_resolved_before_delegating() {
        assert_eq!(requested_for("ru"), "ruby");
        assert_eq!(requested_for("yml"), "yaml");
        assert_eq!(requested_for("m"), "objc");
        assert_eq!(requested_for("pl"), "perl");
        assert_eq!(requested_for("go"), "go");
        assert_eq!(requested_for(""), "");
    }

    #[test]
    fn resolved_language_becomes_code_class() {
        let html = CodeFormatter::new(RecordingHighlighter::default())
            .format("puts 1\n", "ru")
            .expect("format succeeds");

        assert!(html.contains("<code class='ruby'><span class='line'>puts 1\n</span></code>"));
    }

    #[test]
    fn unknown_language_error_propagates() {
        let err = CodeFormatter::new(RecordingHighlighter::default())
            .format("x", "klingon")
            .expect_err("unknown lexer");

        assert_eq!(err, HighlightError::unknown_language("klingon"));
    }

    #[test]
    fn options_control_the_gutter() {
        let formatter =
            CodeFormatter::new(RecordingHighlighter::default()).with_options(TableizeOptions {
                line_numbers: true,
                start_line: NonZeroU32::MIN,
            });

        let html = formatter.format("a\nb\n", "go").expect("format succeeds");
        assert!(html.contains("<span class='line-number'>2</span>"));
        assert!(!html.contains("<span class='line-number'>3</span>"));
    }
}
