//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{num::NonZeroU32, str::FromStr};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

pub use cli::{
    CliArgs, Command, HighlightArgs, HighlightOverrides, LoggingOverrides, PinnedArgs,
    PluginOverrides, ThemeCssArgs,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "postpress";
const ENV_PREFIX: &str = "POSTPRESS";
const DEFAULT_START_LINE: u32 = 1;
const DEFAULT_STYLESHEET_THEME: &str = "InspiredGitHub";
const DEFAULT_PINNED_KEY: &str = "pinned";

const DEFAULT_HTTP_PATH: &str = "/";
const DEFAULT_HTTP_IMAGES_PATH: &str = "source/images";
const DEFAULT_HTTP_GENERATED_IMAGES_PATH: &str = "source/images";
const DEFAULT_HTTP_FONTS_PATH: &str = "source/fonts";
const DEFAULT_CSS_DIR: &str = "source/stylesheets";
const DEFAULT_SASS_DIR: &str = "sass";
const DEFAULT_IMAGES_DIR: &str = "source/images";
const DEFAULT_FONTS_DIR: &str = "source/fonts";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub highlight: HighlightSettings,
    pub plugins: PluginSettings,
    pub assets: AssetSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct HighlightSettings {
    pub line_numbers: bool,
    pub start_line: NonZeroU32,
    /// When set, blocks carry inline styles from this theme instead of classes.
    pub theme: Option<String>,
    pub stylesheet_theme: String,
}

#[derive(Debug, Clone)]
pub struct PluginSettings {
    pub pinned: bool,
    pub pinned_key: String,
}

/// Paths handed to the external stylesheet compiler. Not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetSettings {
    pub http_path: String,
    pub http_images_path: String,
    pub http_generated_images_path: String,
    pub http_fonts_path: String,
    pub css_dir: String,
    pub sass_dir: String,
    pub images_dir: String,
    pub fonts_dir: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_logging_overrides(&cli.logging);
    match &cli.command {
        Command::Highlight(args) => raw.apply_highlight_overrides(&args.overrides),
        Command::Pinned(args) => raw.apply_plugin_overrides(&args.overrides),
        Command::ThemeCss(args) => {
            if let Some(theme) = args.theme.as_ref() {
                raw.highlight.stylesheet_theme = Some(theme.clone());
            }
        }
        Command::Assets => {}
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the process arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    use clap::Parser;

    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    highlight: RawHighlightSettings,
    plugins: RawPluginSettings,
    assets: RawAssetSettings,
}

impl RawSettings {
    fn apply_logging_overrides(&mut self, overrides: &LoggingOverrides) {
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_highlight_overrides(&mut self, overrides: &HighlightOverrides) {
        if let Some(enabled) = overrides.line_numbers {
            self.highlight.line_numbers = Some(enabled);
        }
        if let Some(start) = overrides.start_line {
            self.highlight.start_line = Some(start);
        }
        if let Some(theme) = overrides.theme.as_ref() {
            self.highlight.theme = Some(theme.clone());
        }
    }

    fn apply_plugin_overrides(&mut self, overrides: &PluginOverrides) {
        if let Some(key) = overrides.pinned_key.as_ref() {
            self.plugins.pinned_key = Some(key.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            logging,
            highlight,
            plugins,
            assets,
        } = raw;

        let logging = build_logging_settings(logging)?;
        let highlight = build_highlight_settings(highlight)?;
        let plugins = build_plugin_settings(plugins)?;
        let assets = build_asset_settings(assets);

        Ok(Self {
            logging,
            highlight,
            plugins,
            assets,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_highlight_settings(
    highlight: RawHighlightSettings,
) -> Result<HighlightSettings, LoadError> {
    let start_value = highlight.start_line.unwrap_or(DEFAULT_START_LINE);
    let start_line = NonZeroU32::new(start_value)
        .ok_or_else(|| LoadError::invalid("highlight.start_line", "must be greater than zero"))?;

    let theme = highlight.theme.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let stylesheet_theme = highlight
        .stylesheet_theme
        .unwrap_or_else(|| DEFAULT_STYLESHEET_THEME.to_string());
    if stylesheet_theme.trim().is_empty() {
        return Err(LoadError::invalid(
            "highlight.stylesheet_theme",
            "theme name must not be empty",
        ));
    }

    Ok(HighlightSettings {
        line_numbers: highlight.line_numbers.unwrap_or(false),
        start_line,
        theme,
        stylesheet_theme,
    })
}

fn build_plugin_settings(plugins: RawPluginSettings) -> Result<PluginSettings, LoadError> {
    let pinned_key = plugins
        .pinned_key
        .unwrap_or_else(|| DEFAULT_PINNED_KEY.to_string());
    if pinned_key.trim().is_empty() {
        return Err(LoadError::invalid(
            "plugins.pinned_key",
            "payload key must not be empty",
        ));
    }

    Ok(PluginSettings {
        pinned: plugins.pinned.unwrap_or(true),
        pinned_key,
    })
}

fn build_asset_settings(assets: RawAssetSettings) -> AssetSettings {
    let or_default = |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

    AssetSettings {
        http_path: or_default(assets.http_path, DEFAULT_HTTP_PATH),
        http_images_path: or_default(assets.http_images_path, DEFAULT_HTTP_IMAGES_PATH),
        http_generated_images_path: or_default(
            assets.http_generated_images_path,
            DEFAULT_HTTP_GENERATED_IMAGES_PATH,
        ),
        http_fonts_path: or_default(assets.http_fonts_path, DEFAULT_HTTP_FONTS_PATH),
        css_dir: or_default(assets.css_dir, DEFAULT_CSS_DIR),
        sass_dir: or_default(assets.sass_dir, DEFAULT_SASS_DIR),
        images_dir: or_default(assets.images_dir, DEFAULT_IMAGES_DIR),
        fonts_dir: or_default(assets.fonts_dir, DEFAULT_FONTS_DIR),
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawHighlightSettings {
    line_numbers: Option<bool>,
    start_line: Option<u32>,
    theme: Option<String>,
    stylesheet_theme: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPluginSettings {
    pinned: Option<bool>,
    pinned_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAssetSettings {
    http_path: Option<String>,
    http_images_path: Option<String>,
    http_generated_images_path: Option<String>,
    http_fonts_path: Option<String>,
    css_dir: Option<String>,
    sass_dir: Option<String>,
    images_dir: Option<String>,
    fonts_dir: Option<String>,
}
