//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`LogLevel`] - Verbosity of the tracing output
//!
//! Flags override values from the `--config` file, which override the
//! built-in defaults of [`AnalysisConfig`].
//!
//! ```rust
//! use chatstat::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatstat", "chat.txt", "--no-plots", "-o", "results"]);
//! let config = args.to_config()?;
//!
//! assert!(!config.enable_plots);
//! assert_eq!(config.output_dir.to_str(), Some("results"));
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::AnalysisConfig;
use crate::error::Result;

/// Response times, message lengths and activity charts
/// from WhatsApp chat exports.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstat")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstat
    chatstat chats.txt -o out
    chatstat chats.txt --response-timelimit 2 --no-plots
    chatstat chats.txt --export-records --json --top-words 50
    chatstat -c chatstat.toml")]
pub struct Args {
    /// Path to the chat export [default: data/chats.txt]
    pub input: Option<PathBuf>,

    /// Existing directory for all outputs [default: out]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Longest gap in hours that still counts as a response [default: 6]
    #[arg(long, value_name = "HOURS")]
    pub response_timelimit: Option<f64>,

    /// Skip rendering the PNG charts
    #[arg(long)]
    pub no_plots: bool,

    /// Also write the enriched message table (messages.csv)
    #[arg(long)]
    pub export_records: bool,

    /// Also write the JSON report (report.json)
    #[arg(long)]
    pub json: bool,

    /// Words per sender in the JSON report [default: 20]
    #[arg(long, value_name = "N")]
    pub top_words: Option<usize>,

    /// Log verbosity, overridden by RUST_LOG
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,
}

impl Args {
    /// Builds the effective configuration: defaults, then the config file,
    /// then flags.
    pub fn to_config(&self) -> Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_toml_file(path)?,
            None => AnalysisConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Applies the flags that were given on top of `config`.
    pub fn apply(&self, mut config: AnalysisConfig) -> AnalysisConfig {
        if let Some(input) = &self.input {
            config.input_path.clone_from(input);
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir.clone_from(dir);
        }
        if let Some(hours) = self.response_timelimit {
            config.response_timelimit_hours = hours;
        }
        if self.no_plots {
            config.enable_plots = false;
        }
        if self.export_records {
            config.export_records = true;
        }
        if self.json {
            config.export_json = true;
        }
        if let Some(n) = self.top_words {
            config.top_words = n;
        }
        config
    }
}

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Filter directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Returns all supported level names.
    pub fn all_names() -> &'static [&'static str] {
        &["error", "warn", "info", "debug", "trace"]
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_directive())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!(
                "Unknown log level: '{}'. Expected one of: {}",
                s,
                LogLevel::all_names().join(", ")
            )),
        }
    }
}
