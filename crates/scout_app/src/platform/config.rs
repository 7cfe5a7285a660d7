use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use scout_engine::{ClientSettings, DEFAULT_BASE_URL};

/// Search papers and stream PDF summaries from the Paper Scout backend.
#[derive(Debug, Clone, Parser)]
#[command(name = "scout", version, about)]
pub struct Args {
    /// Base URL of the backend serving /search and /summarize.
    #[arg(long, env = "SCOUT_BACKEND_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// File the session log is written to.
    #[arg(long, default_value = "scout.log")]
    pub log_file: PathBuf,

    /// Also write log records to stderr.
    #[arg(long)]
    pub log_stderr: bool,

    /// Log at debug level.
    #[arg(long, short)]
    pub verbose: bool,

    /// Abort a turn whose request (stream included) takes longer than this.
    #[arg(long)]
    pub request_timeout_secs: Option<u64>,
}

impl Args {
    pub fn log_level(&self) -> LevelFilter {
        if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            ..ClientSettings::default()
        }
    }
}
