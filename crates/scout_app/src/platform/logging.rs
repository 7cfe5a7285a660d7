//! Platform logging initialization for the scout terminal client.
//!
//! Stdout belongs to the conversation, so log records go to a file and,
//! optionally, to stderr.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Destination for log output.
pub enum LogDestination<'a> {
    /// Write to the given file.
    File(&'a Path),
    /// Write to the given file and to stderr.
    FileAndStderr(&'a Path),
}

/// Initialize the global logger. Fails if the log file cannot be created.
pub fn initialize(destination: LogDestination<'_>, level: LevelFilter) -> Result<()> {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::with_capacity(2);
    let path = match destination {
        LogDestination::File(path) => path,
        LogDestination::FileAndStderr(path) => {
            loggers.push(TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ));
            path
        }
    };
    loggers.push(create_file_logger(path, level, config)?);

    CombinedLogger::init(loggers).context("logger already initialized")
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Result<Box<WriteLogger<File>>> {
    let file = File::create(path)
        .with_context(|| format!("could not create log file at {}", path.display()))?;
    Ok(WriteLogger::new(level, config, file))
}
