use syntect::{
    easy::HighlightLines,
    highlighting::{Style, Theme},
    html::{
        ClassStyle, IncludeBackground, line_tokens_to_classed_spans,
        styled_line_to_highlighted_html,
    },
    parsing::{ParseState, Scope, ScopeStack, ScopeStackOp, SyntaxReference, SyntaxSet},
    util::LinesWithEndings,
};

use crate::application::render::types::HighlightError;

/// Lexer tags authors use that syntect resolves neither by token nor by name.
const LEXER_TAGS: &[(&str, &str)] = &[
    ("objc", "Objective-C"),
    ("objcpp", "Objective-C++"),
    ("shell", "Bourne Again Shell (bash)"),
];

/// Classed markup in which every line is self-contained.
///
/// Scopes still open at the end of a line are closed before its newline and
/// reopened at the start of the next one, so splitting the output on `\n`
/// yields balanced fragments.
pub(crate) fn highlight_classed(
    language: &str,
    code: &str,
    syntax_set: &SyntaxSet,
    class_style: ClassStyle,
) -> Result<String, HighlightError> {
    let syntax = find_syntax(syntax_set, language)
        .ok_or_else(|| HighlightError::unknown_language(language))?;
    let failed = |message: String| HighlightError::Highlighting {
        language: language.to_string(),
        message,
    };

    let mut parse_state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    let mut html = String::with_capacity(code.len() * 3);

    for line in LinesWithEndings::from(code) {
        let (content, ending) = split_line_ending(line);
        let ops: Vec<(usize, ScopeStackOp)> = parse_state
            .parse_line(line, syntax_set)
            .map_err(|err| failed(err.to_string()))?
            .into_iter()
            .map(|(index, op)| (index.min(content.len()), op))
            .collect();

        let reopened = stack.len();
        for scope in stack.as_slice() {
            push_scope_open(&mut html, *scope, class_style);
        }

        let (spans, delta) = line_tokens_to_classed_spans(content, &ops, class_style, &mut stack)
            .map_err(|err| failed(err.to_string()))?;
        html.push_str(&spans);

        let open = (reopened as isize + delta).max(0);
        for _ in 0..open {
            html.push_str("</span>");
        }
        html.push_str(ending);
    }

    Ok(html)
}

fn push_scope_open(html: &mut String, scope: Scope, class_style: ClassStyle) {
    let prefix = match class_style {
        ClassStyle::SpacedPrefixed { prefix } => prefix,
        _ => "",
    };
    html.push_str("<span class=\"");
    for (index, atom) in scope.build_string().split('.').enumerate() {
        if index > 0 {
            html.push(' ');
        }
        html.push_str(prefix);
        html.push_str(atom);
    }
    html.push_str("\">");
}

/// Inline-styled markup, with each newline kept outside the styled spans.
pub(crate) fn highlight_inline(
    language: &str,
    code: &str,
    syntax_set: &SyntaxSet,
    theme: &Theme,
) -> Result<String, HighlightError> {
    let syntax = find_syntax(syntax_set, language)
        .ok_or_else(|| HighlightError::unknown_language(language))?;
    let failed = |message: String| HighlightError::Highlighting {
        language: language.to_string(),
        message,
    };

    let mut lines = HighlightLines::new(syntax, theme);
    let mut html = String::with_capacity(code.len() * 2);

    for line in LinesWithEndings::from(code) {
        let (content, ending) = split_line_ending(line);
        let regions = lines
            .highlight_line(line, syntax_set)
            .map_err(|err| failed(err.to_string()))?;

        let mut offset = 0;
        let visible: Vec<(Style, &str)> = regions
            .into_iter()
            .filter_map(|(style, text)| {
                let start = offset;
                offset += text.len();
                let end = offset.min(content.len());
                (end > start).then(|| (style, &text[..end - start]))
            })
            .collect();

        let fragment = styled_line_to_highlighted_html(&visible, IncludeBackground::No)
            .map_err(|err| failed(err.to_string()))?;
        html.push_str(&fragment);
        html.push_str(ending);
    }

    Ok(html)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    let content = line.strip_suffix('\n').unwrap_or(line);
    line.split_at(content.len())
}

pub(crate) fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    if token.is_empty() {
        return None;
    }

    let lowercase = token.to_ascii_lowercase();
    syntax_set
        .find_syntax_by_token(&lowercase)
        .or_else(|| syntax_set.find_syntax_by_name(token))
        .or_else(|| syntax_set.find_syntax_by_extension(&lowercase))
        .or_else(|| {
            LEXER_TAGS
                .iter()
                .find(|(tag, _)| *tag == lowercase)
                .and_then(|(_, name)| syntax_set.find_syntax_by_name(name))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn syntax_set() -> SyntaxSet {
        SyntaxSet::load_defaults_newlines()
    }

    #[test]
    fn scope_classes_follow_class_style() {
        let scope = Scope::new("string.quoted.double").expect("valid scope");

        let mut spaced = String::new();
        push_scope_open(&mut spaced, scope, ClassStyle::Spaced);
        assert_eq!(spaced, "<span class=\"string quoted double\">");

        let mut prefixed = String::new();
        push_scope_open(
            &mut prefixed,
            scope,
            ClassStyle::SpacedPrefixed { prefix: "hl-" },
        );
        assert_eq!(prefixed, "<span class=\"hl-string hl-quoted hl-double\">");
    }

    #[test]
    fn each_line_closes_its_own_spans() {
        let set = syntax_set();
        let code = "/* one\ntwo */\nx := 1\n";
        let html = highlight_classed("go", code, &set, ClassStyle::Spaced).expect("go is known");

        let lines: Vec<&str> = html.split_inclusive('\n').collect();
        assert_eq!(lines.len(), code.lines().count());
        for line in lines {
            assert_eq!(
                line.matches("<span").count(),
                line.matches("</span>").count(),
                "unbalanced line: {line}"
            );
            assert!(line.ends_with("</span>\n"), "newline must follow closed spans: {line}");
        }
    }

    #[test]
    fn scopes_spanning_lines_are_reopened() {
        let set = syntax_set();
        let html = highlight_classed("go", "/* one\ntwo */\n", &set, ClassStyle::Spaced)
            .expect("go is known");

        let second = html.split_inclusive('\n').nth(1).expect("two lines");
        assert!(second.starts_with("<span class=\"source go\"><span class=\"comment"));
    }

    #[test]
    fn inline_newlines_sit_outside_styled_spans() {
        let set = syntax_set();
        let themes = syntect::highlighting::ThemeSet::load_defaults();
        let theme = &themes.themes["InspiredGitHub"];
        let html = highlight_inline("go", "/* one\ntwo */\n", &set, theme).expect("go is known");

        let lines: Vec<&str> = html.split_inclusive('\n').collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(line.ends_with("</span>\n"), "{line}");
            assert!(line.contains("style=\""));
        }
    }

    #[test]
    fn empty_code_produces_no_markup() {
        let set = syntax_set();
        let html = highlight_classed("go", "", &set, ClassStyle::Spaced).expect("go is known");
        assert!(html.is_empty());
    }

    #[test]
    fn lookup_ignores_token_case() {
        let set = syntax_set();
        assert!(find_syntax(&set, "GO").is_some());
        assert!(find_syntax(&set, "Ruby").is_some());
        assert!(find_syntax(&set, "").is_none());
    }
}
