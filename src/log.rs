//! Program logging, built on `fern`.
//!
//! Messages go to the console and, for the `run` command, to two files in the output folder: one
//! for ordinary progress messages and one for warnings and errors. Console output is coloured by
//! level when it is going to a terminal.
use anyhow::{Context, Result, anyhow, bail};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};
use std::env;
use std::fmt::Arguments;
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::OnceLock;

/// Set once the global logger has been installed
static LOGGER_INIT: OnceLock<()> = OnceLock::new();

/// The log level used when neither `settings.toml` nor `TRANSMISSION_LOG_LEVEL` gives one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable which overrides the log level from `settings.toml`
const LOG_LEVEL_ENV_VAR: &str = "TRANSMISSION_LOG_LEVEL";

/// Log file for messages below warning level
const LOG_INFO_FILE_NAME: &str = "transmission_info.log";

/// Log file for warnings and errors
const LOG_ERROR_FILE_NAME: &str = "transmission_error.log";

/// Whether [`init`] has completed successfully
pub fn is_logger_initialised() -> bool {
    LOGGER_INIT.get().is_some()
}

/// Install the program logger.
///
/// The log level is taken from the `TRANSMISSION_LOG_LEVEL` environment variable if it is set and
/// from `log_level_from_settings` otherwise. Valid levels are `off`, `error`, `warn`, `info`,
/// `debug` and `trace` (in any case).
///
/// # Arguments
///
/// * `log_level_from_settings` - The log level from `settings.toml`
/// * `log_file_dir` - Folder in which to create log files, if any
pub fn init(log_level_from_settings: &str, log_file_dir: Option<&Path>) -> Result<()> {
    let log_level = match env::var(LOG_LEVEL_ENV_VAR) {
        Ok(level) => parse_log_level(&level)
            .with_context(|| format!("Invalid value for {LOG_LEVEL_ENV_VAR}"))?,
        Err(_) => parse_log_level(log_level_from_settings)?,
    };

    let mut dispatch = Dispatch::new().chain(console_dispatch(log_level));
    if let Some(dir) = log_file_dir {
        dispatch = dispatch.chain(file_dispatch(log_level, dir)?);
    }
    dispatch.apply()?;

    LOGGER_INIT
        .set(())
        .map_err(|()| anyhow!("Logger already initialised"))
}

/// Convert a log level string (case insensitive) to a [`LevelFilter`]
fn parse_log_level(log_level: &str) -> Result<LevelFilter> {
    let level = match log_level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    };

    Ok(level)
}

/// Console output: warnings and errors to stderr, everything else to stdout
fn console_dispatch(log_level: LevelFilter) -> Dispatch {
    let stdout_colours = std::io::stdout().is_terminal().then(level_colours);
    let stderr_colours = std::io::stderr().is_terminal().then(level_colours);

    Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    format_record(out, message, record, stdout_colours.as_ref());
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    format_record(out, message, record, stderr_colours.as_ref());
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        )
}

/// File output.
///
/// The info log always records at least `info` messages and the error log always records
/// warnings and errors, whatever the console log level.
fn file_dispatch(log_level: LevelFilter, dir: &Path) -> Result<Dispatch> {
    let create = |file_name: &str| {
        let file_path = dir.join(file_name);
        File::create(&file_path)
            .with_context(|| format!("Could not create log file {}", file_path.display()))
    };

    let dispatch = Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(|out, message, record| format_record(out, message, record, None))
                .level(log_level.max(LevelFilter::Info))
                .chain(create(LOG_INFO_FILE_NAME)?),
        )
        .chain(
            Dispatch::new()
                .format(|out, message, record| format_record(out, message, record, None))
                .level(LevelFilter::Warn)
                .chain(create(LOG_ERROR_FILE_NAME)?),
        );

    Ok(dispatch)
}

/// The colour used for each log level on a terminal
fn level_colours() -> ColoredLevelConfig {
    ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta)
}

/// Format a log message as `[HH:MM:SS LEVEL target] message`
fn format_record(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    colours: Option<&ColoredLevelConfig>,
) {
    let timestamp = Local::now().format("%H:%M:%S");
    let target = record.target();
    match colours {
        Some(colours) => {
            let level = colours.color(record.level());
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
        None => {
            let level = record.level();
            out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
        }
    }
}
