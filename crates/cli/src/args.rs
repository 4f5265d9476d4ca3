//! Process arguments for the `invmgr` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use invmgr_config::{InvMgrConfig, LogFormat};
use invmgr_observability::LogSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(value: LogFormatArg) -> Self {
        match value {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

/// Interactive inventory manager: track items and who borrowed them.
#[derive(Debug, Parser)]
#[command(name = "invmgr", version)]
pub struct Cli {
    /// Data file to load and save (overrides `storage.data_file`)
    #[arg(short, long)]
    pub data_file: Option<PathBuf>,

    /// Only save on `bye` instead of after every change
    #[arg(long)]
    pub no_autosave: bool,

    /// Diagnostic log format on stderr
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormatArg>,

    /// Quiet mode (errors only in diagnostic logs)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of loaded configuration.
    pub fn apply(&self, config: &mut InvMgrConfig) {
        if let Some(path) = &self.data_file {
            config.storage.data_file = path.clone();
        }
        if self.no_autosave {
            config.storage.autosave = false;
        }
        if let Some(format) = self.log_format {
            config.log.format = format.into();
        }
        if self.quiet {
            config.log.level = "error".to_string();
        } else if self.verbose {
            config.log.level = "debug".to_string();
        }
    }
}

pub fn log_settings(config: &InvMgrConfig) -> LogSettings {
    LogSettings {
        level: config.log.level.clone(),
        json: config.log.format == LogFormat::Json,
    }
}
