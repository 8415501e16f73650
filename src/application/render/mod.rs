//! Code block formatting: alias resolution, syntect highlighting, and the
//! table scaffold templates expect around every block.
//!
//! Everything here is pure and synchronous. The syntect syntax and theme sets
//! are loaded once per process and shared read-only afterwards.

mod alias;
mod formatter;
mod service;
mod tableize;
mod types;

pub use alias::resolve_alias;
pub use formatter::{CodeFormatter, METRIC_HIGHLIGHT_BLOCKS, METRIC_HIGHLIGHT_FAILURES, highlight};
pub use service::{SyntectHighlighter, highlighter, theme_css, theme_names};
pub use tableize::{TableizeOptions, tableize, tableize_with};
pub use types::{HighlightError, Highlighter};
