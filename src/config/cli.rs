use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the postpress binary.
#[derive(Debug, Parser)]
#[command(
    name = "postpress",
    version,
    about = "Pre-render plugins for static blogs"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "POSTPRESS_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Highlight a code block and wrap it in the table scaffold.
    Highlight(HighlightArgs),
    /// Order posts pinned-first and print the pre-render payload as JSON.
    Pinned(PinnedArgs),
    /// Print the stylesheet for class-based highlight markup.
    #[command(name = "theme-css")]
    ThemeCss(ThemeCssArgs),
    /// Print the asset pipeline paths as TOML.
    Assets,
}

#[derive(Debug, Args, Default, Clone)]
pub struct LoggingOverrides {
    /// Override the log level filter.
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct HighlightArgs {
    #[command(flatten)]
    pub overrides: HighlightOverrides,

    /// Language of the block; short aliases such as `ru` or `yml` are accepted.
    #[arg(long = "lang", short = 'l', value_name = "LANG")]
    pub language: String,

    /// File containing the code; stdin is read when omitted.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct HighlightOverrides {
    /// Emit a line-number gutter.
    #[arg(
        long = "line-numbers",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub line_numbers: Option<bool>,

    /// Number of the first line in the gutter.
    #[arg(long = "start-line", value_name = "N")]
    pub start_line: Option<u32>,

    /// Highlight with inline styles from this built-in theme.
    #[arg(long = "theme", value_name = "NAME")]
    pub theme: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct PinnedArgs {
    #[command(flatten)]
    pub overrides: PluginOverrides,

    /// JSON file with the post collection.
    #[arg(value_name = "POSTS", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,
}

#[derive(Debug, Args, Default, Clone)]
pub struct PluginOverrides {
    /// Payload key the ordered posts are attached under.
    #[arg(long = "pinned-key", value_name = "KEY")]
    pub pinned_key: Option<String>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ThemeCssArgs {
    /// Built-in theme to render.
    #[arg(long = "theme", value_name = "NAME")]
    pub theme: Option<String>,
}
