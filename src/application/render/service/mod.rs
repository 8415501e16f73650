mod highlight;

use std::sync::Arc;

use once_cell::sync::Lazy;
use syntect::{
    dumps::from_uncompressed_data,
    highlighting::{Theme, ThemeSet},
    html::{ClassStyle, css_for_theme_with_class_style},
    parsing::SyntaxSet,
};

use crate::application::render::types::{HighlightError, Highlighter};

use highlight::{find_syntax, highlight_classed, highlight_inline};

static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(|| {
    let syntax_bytes = include_bytes!(env!("SYNTAX_PACK_FILE"));
    from_uncompressed_data(syntax_bytes).expect("syntax pack must be valid")
});

static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

static SHARED_HIGHLIGHTER: Lazy<Arc<SyntectHighlighter>> =
    Lazy::new(|| Arc::new(SyntectHighlighter::new()));

/// Syntect-backed highlighter.
///
/// Emits class-based `<span>` markup by default; with a theme it emits inline
/// `style` attributes instead, which needs no stylesheet.
#[derive(Debug, Clone)]
pub struct SyntectHighlighter {
    syntax_set: &'static SyntaxSet,
    class_style: ClassStyle,
    theme: Option<&'static Theme>,
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self {
            syntax_set: &SYNTAX_SET,
            class_style: ClassStyle::Spaced,
            theme: None,
        }
    }

    pub fn with_theme(theme: &str) -> Result<Self, HighlightError> {
        Ok(Self {
            theme: Some(find_theme(theme)?),
            ..Self::new()
        })
    }

    pub fn supports(&self, language: &str) -> bool {
        find_syntax(self.syntax_set, language).is_some()
    }
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        match self.theme {
            Some(theme) => highlight_inline(language, code, self.syntax_set, theme),
            None => highlight_classed(language, code, self.syntax_set, self.class_style),
        }
    }
}

/// Access the shared class-based highlighter, initialised on first use.
pub fn highlighter() -> Arc<SyntectHighlighter> {
    Arc::clone(&SHARED_HIGHLIGHTER)
}

/// Stylesheet for the class-based markup, rendered from a built-in theme.
pub fn theme_css(theme: &str) -> Result<String, HighlightError> {
    let resolved = find_theme(theme)?;
    css_for_theme_with_class_style(resolved, ClassStyle::Spaced).map_err(|err| {
        HighlightError::Stylesheet {
            theme: theme.to_string(),
            message: err.to_string(),
        }
    })
}

pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEME_SET.themes.keys().map(String::as_str)
}

fn find_theme(name: &str) -> Result<&'static Theme, HighlightError> {
    THEME_SET
        .themes
        .get(name)
        .ok_or_else(|| HighlightError::UnknownTheme {
            theme: name.to_string(),
        })
}
