use std::{
    fs,
    io::{self, Read, Write},
    process,
};

use postpress::{
    application::{
        error::AppError,
        hooks::{PluginRegistry, RenderPayload},
        pinned,
        render::{CodeFormatter, SyntectHighlighter, TableizeOptions, highlighter, theme_css},
    },
    config::{self, Command, HighlightArgs, PinnedArgs, Settings},
    infra::{error::InfraError, posts, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

fn main() {
    if let Err(error) = run() {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    let chain = error.chain();
    if dispatcher::has_been_set() {
        error!(error = %error, chain = ?chain, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, chain = ?chain, "application error");
    });
}

fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()?;

    telemetry::init(&settings.logging)?;

    let output = match &cli_args.command {
        Command::Highlight(args) => run_highlight(&settings, args)?,
        Command::Pinned(args) => run_pinned(&settings, args)?,
        Command::ThemeCss(_) => theme_css(&settings.highlight.stylesheet_theme)?,
        Command::Assets => toml::to_string_pretty(&settings.assets)
            .map_err(|err| AppError::unexpected(format!("failed to encode asset paths: {err}")))?,
    };

    write_stdout(&output)
}

fn run_highlight(settings: &Settings, args: &HighlightArgs) -> Result<String, AppError> {
    let code = match args.file.as_ref() {
        Some(path) => fs::read_to_string(path).map_err(InfraError::from)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(InfraError::from)?;
            buffer
        }
    };

    let options = TableizeOptions::from(&settings.highlight);
    let html = match settings.highlight.theme.as_deref() {
        Some(theme) => CodeFormatter::new(SyntectHighlighter::with_theme(theme)?)
            .with_options(options)
            .format(&code, &args.language)?,
        None => CodeFormatter::new(highlighter())
            .with_options(options)
            .format(&code, &args.language)?,
    };

    Ok(html)
}

fn run_pinned(settings: &Settings, args: &PinnedArgs) -> Result<String, AppError> {
    let site = posts::load_site(&args.file)?;

    let mut registry = PluginRegistry::new();
    pinned::register(&mut registry, &settings.plugins);

    let mut payload = RenderPayload::new();
    registry.run_pre_render(&site, &mut payload)?;

    info!(
        target = "postpress::pinned",
        posts = site.posts.len(),
        entries = payload.len(),
        "pre-render hooks complete"
    );

    serde_json::to_string_pretty(&payload)
        .map_err(|err| AppError::unexpected(format!("failed to encode payload: {err}")))
}

fn write_stdout(output: &str) -> Result<(), AppError> {
    let mut stdout = io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .map_err(InfraError::from)?;
    if !output.ends_with('\n') {
        stdout.write_all(b"\n").map_err(InfraError::from)?;
    }
    stdout.flush().map_err(InfraError::from)?;
    Ok(())
}
