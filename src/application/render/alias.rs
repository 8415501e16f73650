/// Short language codes authors use in fenced blocks, mapped to lexer names.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    ("ru", "ruby"),
    ("m", "objc"),
    ("pl", "perl"),
    ("yml", "yaml"),
];

/// Case-sensitive; anything not in the table, empty strings included, is
/// returned unchanged.
pub fn resolve_alias(language: &str) -> &str {
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == language)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(language)
}

#[cfg(test)]
mod tests {
    use super::resolve_alias;

    #[test]
    fn maps_known_aliases() {
        assert_eq!(resolve_alias("ru"), "ruby");
        assert_eq!(resolve_alias("m"), "objc");
        assert_eq!(resolve_alias("pl"), "perl");
        assert_eq!(resolve_alias("yml"), "yaml");
    }

    #[test]
    fn passes_everything_else_through() {
        assert_eq!(resolve_alias("go"), "go");
        assert_eq!(resolve_alias(""), "");
        assert_eq!(resolve_alias("RU"), "RU");
        assert_eq!(resolve_alias("ruby"), "ruby");
    }
}
