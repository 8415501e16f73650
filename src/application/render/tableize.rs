use std::num::NonZeroU32;

const LINE_OPEN: &str = "<span class='line'>";
const LINE_CLOSE: &str = "</span>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableizeOptions {
    /// Emit a gutter cell with one line number per line.
    pub line_numbers: bool,
    pub start_line: NonZeroU32,
}

impl Default for TableizeOptions {
    fn default() -> Self {
        Self {
            line_numbers: false,
            start_line: NonZeroU32::MIN,
        }
    }
}

impl From<&crate::config::HighlightSettings> for TableizeOptions {
    fn from(settings: &crate::config::HighlightSettings) -> Self {
        Self {
            line_numbers: settings.line_numbers,
            start_line: settings.start_line,
        }
    }
}

pub fn tableize(html: &str, language: &str) -> String {
    tableize_with(html, language, &TableizeOptions::default())
}

/// Wrap highlighted markup in the table scaffold, one line marker per line.
///
/// Lines keep their `\n` terminators; a trailing fragment without one still
/// counts as a line, and empty input yields no markers at all.
pub fn tableize_with(html: &str, language: &str, options: &TableizeOptions) -> String {
    let lines: Vec<&str> = html.split_inclusive('\n').collect();
    let mut table =
        String::with_capacity(html.len() + lines.len() * (LINE_OPEN.len() + LINE_CLOSE.len()) + 160);

    table.push_str("<div class=\"highlight\"><table><tr>");

    if options.line_numbers {
        push_gutter(&mut table, lines.len(), options.start_line);
    }

    table.push_str("<td class='code'><pre><code class='");
    table.push_str(&ammonia::clean_text(language));
    table.push_str("'>");
    for line in &lines {
        table.push_str(LINE_OPEN);
        table.push_str(line);
        table.push_str(LINE_CLOSE);
    }
    table.push_str("</code></pre></td></tr></table></div>");

    table
}

fn push_gutter(table: &mut String, count: usize, start: NonZeroU32) {
    table.push_str("<td class='gutter'><pre class='line-numbers'>");
    let first = u64::from(start.get());
    for number in (first..).take(count) {
        table.push_str("<span class='line-number'>");
        table.push_str(&number.to_string());
        table.push_str("</span>\n");
    }
    table.push_str("</pre></td>");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_each_line_in_a_marker() {
        let html = tableize("a\nb\n", "go");

        assert_eq!(
            html,
            "<div class=\"highlight\"><table><tr><td class='code'><pre><code class='go'>\
             <span class='line'>a\n</span><span class='line'>b\n</span>\
             </code></pre></td></tr></table></div>"
        );
    }

    #[test]
    fn empty_code_keeps_scaffold() {
        let html = tableize("", "go");

        assert_eq!(html.matches(LINE_OPEN).count(), 0);
        assert!(html.starts_with("<div class=\"highlight\"><table><tr>"));
        assert!(html.ends_with("</code></pre></td></tr></table></div>"));
    }

    #[test]
    fn empty_language_gives_empty_class() {
        assert!(tableize("x", "").contains("<code class=''>"));
    }

    #[test]
    fn trailing_fragment_without_newline_is_a_line() {
        let html = tableize("a\nb", "go");
        assert_eq!(html.matches(LINE_OPEN).count(), 2);
        assert!(html.contains("<span class='line'>b</span>"));
    }

    #[test]
    fn language_cannot_break_out_of_attribute() {
        let html = tableize("x", "go' onclick='x");
        assert!(!html.contains("onclick='x'"));
    }

    #[test]
    fn gutter_numbers_from_start_line() {
        let options = TableizeOptions {
            line_numbers: true,
            start_line: NonZeroU32::new(7).expect("non-zero"),
        };
        let html = tableize_with("a\nb\nc\n", "go", &options);

        assert!(html.contains(
            "<td class='gutter'><pre class='line-numbers'>\
             <span class='line-number'>7</span>\n\
             <span class='line-number'>8</span>\n\
             <span class='line-number'>9</span>\n\
             </pre></td><td class='code'>"
        ));
        assert_eq!(html.matches(LINE_OPEN).count(), 3);
    }
}
