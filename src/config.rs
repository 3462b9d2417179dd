//! Configuration for the analysis pipeline.
//!
//! [`AnalysisConfig`] replaces the constants a one-shot script would hard-code:
//! the response-time staleness cutoff, the plot toggle and the input/output
//! locations. It is a plain serde struct, so it can be built in code with the
//! `with_*` methods or loaded from a TOML file.
//!
//! # Example
//!
//! ```rust
//! use chatstat::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_response_timelimit_hours(2.0)
//!     .with_plots(false);
//!
//! assert_eq!(config.response_timelimit().num_hours(), 2);
//! ```
//!
//! ```rust
//! use chatstat::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::from_toml_str(r#"
//! response_timelimit_hours = 12
//! enable_plots = false
//! output_dir = "results"
//! "#)?;
//!
//! assert!(!config.enable_plots);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatError, Result};

/// Default staleness cutoff for response times, in hours.
pub const DEFAULT_RESPONSE_TIMELIMIT_HOURS: f64 = 6.0;

/// Largest accepted chart width or height, in pixels.
pub const MAX_PLOT_SIZE: u32 = 16_384;

/// File names written inside [`AnalysisConfig::output_dir`].
pub mod files {
    pub const SUMMARY: &str = "results.csv";
    pub const RECORDS: &str = "messages.csv";
    pub const REPORT: &str = "report.json";
    pub const ABS_PER_HOUR: &str = "abs_messages_per_hour_plt.png";
    pub const AVG_PER_HOUR: &str = "avg_messages_per_hour_plt.png";
    pub const OVER_THE_YEAR: &str = "abs_messages_over_the_year_plt.png";
}

/// Configuration for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum gap between sender switches that still counts as a response (default: 6)
    pub response_timelimit_hours: f64,

    /// Render the PNG charts (default: true)
    pub enable_plots: bool,

    /// Chat export to read (default: `data/chats.txt`)
    pub input_path: PathBuf,

    /// Directory for all outputs; must already exist (default: `out`)
    pub output_dir: PathBuf,

    /// Field delimiter of the CSV outputs (default: `,`)
    pub csv_delimiter: char,

    /// Also write the enriched message table (default: false)
    pub export_records: bool,

    /// Also write the JSON report (default: false)
    pub export_json: bool,

    /// Words per sender kept in the JSON report (default: 20)
    pub top_words: usize,

    /// Chart width in pixels (default: 960)
    pub plot_width: u32,

    /// Chart height in pixels (default: 540)
    pub plot_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            response_timelimit_hours: DEFAULT_RESPONSE_TIMELIMIT_HOURS,
            enable_plots: true,
            input_path: PathBuf::from("data/chats.txt"),
            output_dir: PathBuf::from("out"),
            csv_delimiter: ',',
            export_records: false,
            export_json: false,
            top_words: 20,
            plot_width: 960,
            plot_height: 540,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ChatstatError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ChatstatError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if !self.response_timelimit_hours.is_finite() || self.response_timelimit_hours < 0.0 {
            return Err(ChatstatError::config(format!(
                "response_timelimit_hours must be a non-negative number, got {}",
                self.response_timelimit_hours
            )));
        }
        let sides = 1..=MAX_PLOT_SIZE;
        if !sides.contains(&self.plot_width) || !sides.contains(&self.plot_height) {
            return Err(ChatstatError::config(format!(
                "plot size must be between 1 and {MAX_PLOT_SIZE} pixels per side, got {}x{}",
                self.plot_width, self.plot_height
            )));
        }
        if !self.csv_delimiter.is_ascii() || matches!(self.csv_delimiter, '\0' | '\n' | '\r' | '"')
        {
            return Err(ChatstatError::config(format!(
                "csv_delimiter {:?} cannot be used as a field separator",
                self.csv_delimiter
            )));
        }
        Ok(())
    }

    /// Staleness cutoff as a duration, at millisecond resolution.
    pub fn response_timelimit(&self) -> TimeDelta {
        TimeDelta::milliseconds((self.response_timelimit_hours * 3_600_000.0).round() as i64)
    }

    /// CSV delimiter as the byte the csv writer expects.
    pub fn csv_delimiter_byte(&self) -> u8 {
        u8::try_from(self.csv_delimiter).unwrap_or(b',')
    }

    /// Path of an output file inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    #[must_use]
    pub fn with_response_timelimit_hours(mut self, hours: f64) -> Self {
        self.response_timelimit_hours = hours;
        self
    }

    #[must_use]
    pub fn with_plots(mut self, enabled: bool) -> Self {
        self.enable_plots = enabled;
        self
    }

    #[must_use]
    pub fn with_input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_csv_delimiter(mut self, delimiter: char) -> Self {
        self.csv_delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_export_records(mut self, enabled: bool) -> Self {
        self.export_records = enabled;
        self
    }

    #[must_use]
    pub fn with_export_json(mut self, enabled: bool) -> Self {
        self.export_json = enabled;
        self
    }

    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    #[must_use]
    pub fn with_plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_width = width;
        self.plot_height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.response_timelimit(), TimeDelta::hours(6));
        assert!(config.enable_plots);
        assert_eq!(config.input_path, PathBuf::from("data/chats.txt"));
        assert_eq!(config.output_path(files::SUMMARY), PathBuf::from("out/results.csv"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_fractional_timelimit() {
        let config = AnalysisConfig::new().with_response_timelimit_hours(1.5);
        assert_eq!(config.response_timelimit(), TimeDelta::minutes(90));
    }

    #[test]
    fn test_builder_chain() {
        let config = AnalysisConfig::new()
            .with_plots(false)
            .with_output_dir("results")
            .with_csv_delimiter(';')
            .with_export_records(true)
            .with_export_json(true)
            .with_top_words(5)
            .with_plot_size(640, 480);

        assert!(!config.enable_plots);
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.csv_delimiter_byte(), b';');
        assert!(config.export_records);
        assert!(config.export_json);
        assert_eq!(config.top_words, 5);
        assert_eq!((config.plot_width, config.plot_height), (640, 480));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = AnalysisConfig::from_toml_str("response_timelimit_hours = 3\n").unwrap();
        assert_eq!(config.response_timelimit(), TimeDelta::hours(3));
        assert!(config.enable_plots);
        assert_eq!(config.top_words, 20);
    }

    #[test]
    fn test_from_toml_rejects_negative_limit() {
        let err = AnalysisConfig::from_toml_str("response_timelimit_hours = -1.0").unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_from_toml_rejects_unknown_type() {
        assert!(AnalysisConfig::from_toml_str("enable_plots = \"yes\"").is_err());
    }

    #[test]
    fn test_validate_plot_size() {
        let config = AnalysisConfig::new().with_plot_size(0, 100);
        assert!(config.validate().is_err());

        let huge = AnalysisConfig::new().with_plot_size(u32::MAX, u32::MAX);
        let err = huge.validate().unwrap_err();
        assert!(err.to_string().contains("16384"));

        let edge = AnalysisConfig::new().with_plot_size(MAX_PLOT_SIZE, 1);
        assert!(edge.validate().is_ok());
        assert!(edge.with_plot_size(MAX_PLOT_SIZE + 1, 1).validate().is_err());
    }

    #[test]
    fn test_from_toml_rejects_huge_plot() {
        let err = AnalysisConfig::from_toml_str("plot_width = 4294967295\nplot_height = 4294967295")
            .unwrap_err();
        assert!(matches!(err, ChatstatError::Config { .. }));
    }

    #[test]
    fn test_validate_delimiter() {
        let config = AnalysisConfig::new().with_csv_delimiter('"');
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_delimiter() {
        let config = AnalysisConfig::from_toml_str("csv_delimiter = \";\"").unwrap();
        assert_eq!(config.csv_delimiter_byte(), b';');
        assert!(AnalysisConfig::from_toml_str("csv_delimiter = \"é\"").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = AnalysisConfig::from_toml_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ChatstatError::Config { .. }));
    }
}
