//! End-to-end analysis pipeline.
//!
//! ```text
//! chats.txt -> ChatParser -> records -> Summary / WordFrequency / ActivitySeries
//!                                    -> results.csv, charts, optional exports
//! ```
//!
//! Parsing failures abort the run. Output failures do not: each file is
//! written on its own and failures are collected in an [`OutputReport`].
//!
//! # Example
//!
//! ```rust
//! use chatstat::analysis::analyze_str;
//! use chatstat::config::AnalysisConfig;
//!
//! let analysis = analyze_str(
//!     "[01.01.23, 10:00:00] Alice: Hi\n[01.01.23, 10:05:00] Bob: Hello",
//!     &AnalysisConfig::default(),
//! )?;
//!
//! assert_eq!(analysis.records.len(), 2);
//! assert_eq!(analysis.summary.distinct_days, 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, files};
use crate::core::{ActivitySeries, Summary, WordFrequency, word_frequency_by_sender};
use crate::error::{ChatstatError, Result};
use crate::message::MessageRecord;
use crate::parser::ChatParser;

/// Everything derived from one chat export.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub records: Vec<MessageRecord>,
    pub summary: Summary,
    pub words: BTreeMap<String, WordFrequency>,
    pub activity: ActivitySeries,
}

impl Analysis {
    /// Derives all statistics from already enriched records.
    pub fn from_records(records: Vec<MessageRecord>) -> Self {
        let summary = Summary::compute(&records);
        let words = word_frequency_by_sender(&records);
        let activity = ActivitySeries::compute(&records);
        Self {
            records,
            summary,
            words,
            activity,
        }
    }
}

/// Parses `content` and derives all statistics.
pub fn analyze_str(content: &str, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;
    let records = ChatParser::with_config(config).parse_str(content)?;
    Ok(Analysis::from_records(records))
}

/// Reads the export at `path` and derives all statistics.
pub fn analyze_file(path: impl AsRef<Path>, config: &AnalysisConfig) -> Result<Analysis> {
    config.validate()?;
    let records = ChatParser::with_config(config).parse(path.as_ref())?;
    Ok(Analysis::from_records(records))
}

/// Outcome of [`write_outputs`].
#[derive(Debug, Default)]
pub struct OutputReport {
    /// Files written successfully, in write order
    pub written: Vec<PathBuf>,
    /// One [`ChatstatError::OutputWrite`] per file that failed
    pub failures: Vec<ChatstatError>,
}

impl OutputReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: PathBuf, result: Result<()>) {
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "wrote output");
                self.written.push(path);
            }
            Err(err) => {
                warn!(error = %err, "output failed");
                self.failures.push(err);
            }
        }
    }
}

/// Writes every enabled output into `config.output_dir`.
///
/// The directory is not created. Each file is attempted even if an earlier
/// one failed.
pub fn write_outputs(analysis: &Analysis, config: &AnalysisConfig) -> OutputReport {
    let mut report = OutputReport::default();

    #[cfg(feature = "csv-output")]
    {
        let delimiter = config.csv_delimiter_byte();
        let path = config.output_path(files::SUMMARY);
        let result = crate::core::output::write_summary_csv(&analysis.summary, &path, delimiter);
        report.record(path, result);

        if config.export_records {
            let path = config.output_path(files::RECORDS);
            let result =
                crate::core::output::write_records_csv(&analysis.records, &path, delimiter);
            report.record(path, result);
        }
    }
    #[cfg(not(feature = "csv-output"))]
    {
        debug!("csv-output feature disabled, skipping summary table");
    }

    #[cfg(feature = "json-output")]
    {
        if config.export_json {
            let path = config.output_path(files::REPORT);
            let result = crate::core::output::write_report_json(
                &analysis.summary,
                &analysis.words,
                config.top_words,
                &path,
            );
            report.record(path, result);
        }
    }

    if config.enable_plots {
        write_plots(analysis, config, &mut report);
    } else {
        debug!("plots disabled");
    }

    info!(
        written = report.written.len(),
        failed = report.failures.len(),
        "outputs finished"
    );
    report
}

#[cfg(feature = "plots")]
fn write_plots(analysis: &Analysis, config: &AnalysisConfig, report: &mut OutputReport) {
    use crate::plot::{daily_counts_chart, hourly_averages_chart, hourly_counts_chart, write_chart};

    let charts = [
        (files::ABS_PER_HOUR, hourly_counts_chart(&analysis.activity)),
        (files::AVG_PER_HOUR, hourly_averages_chart(&analysis.activity)),
        (files::OVER_THE_YEAR, daily_counts_chart(&analysis.activity)),
    ];

    for (file_name, chart) in charts {
        let path = config.output_path(file_name);
        let result = write_chart(&chart, &path, (config.plot_width, config.plot_height));
        report.record(path, result);
    }
}

#[cfg(not(feature = "plots"))]
fn write_plots(_analysis: &Analysis, _config: &AnalysisConfig, _report: &mut OutputReport) {
    debug!("plots feature disabled, skipping charts");
}

/// Analyzes `config.input_path` and writes all outputs.
pub fn run(config: &AnalysisConfig) -> Result<(Analysis, OutputReport)> {
    let analysis = analyze_file(&config.input_path, config)?;
    let report = write_outputs(&analysis, config);
    Ok((analysis, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CHAT: &str = "[01.01.23, 10:00:00] Alice: Hi\n\
                        there\n\
                        [01.01.23, 10:05:00] Bob: Hello\n\
                        [02.01.23, 09:00:00] Alice: Morning\n";

    #[test]
    fn test_analyze_str() {
        let analysis = analyze_str(CHAT, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.records.len(), 4);
        assert_eq!(analysis.summary.distinct_days, 2);
        assert_eq!(analysis.words["Alice"].get("there"), 1);
        assert_eq!(analysis.activity.distinct_days, 2);
    }

    #[test]
    fn test_analyze_str_rejects_invalid_config() {
        let config = AnalysisConfig::new().with_response_timelimit_hours(f64::NAN);
        assert!(matches!(
            analyze_str(CHAT, &config),
            Err(ChatstatError::Config { .. })
        ));
    }

    #[test]
    fn test_run_writes_all_outputs() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("chats.txt");
        std::fs::write(&input, CHAT).unwrap();

        let config = AnalysisConfig::new()
            .with_input_path(&input)
            .with_output_dir(dir.path())
            .with_export_records(true)
            .with_export_json(true)
            .with_plot_size(200, 100);

        let (_, report) = run(&config).unwrap();
        assert!(report.is_success(), "{:?}", report.failures);
        assert_eq!(report.written.len(), 6);
        for name in [
            files::SUMMARY,
            files::RECORDS,
            files::REPORT,
            files::ABS_PER_HOUR,
            files::AVG_PER_HOUR,
            files::OVER_THE_YEAR,
        ] {
            assert!(dir.path().join(name).is_file(), "{name} missing");
        }
    }

    #[test]
    fn test_plots_disabled() {
        let dir = tempdir().unwrap();
        let config = AnalysisConfig::new().with_output_dir(dir.path()).with_plots(false);
        let analysis = analyze_str(CHAT, &config).unwrap();

        let report = write_outputs(&analysis, &config);
        assert_eq!(report.written, vec![dir.path().join(files::SUMMARY)]);
        assert!(!dir.path().join(files::ABS_PER_HOUR).exists());
    }

    #[test]
    fn test_missing_output_dir_fails_each_output() {
        let dir = tempdir().unwrap();
        let config = AnalysisConfig::new()
            .with_output_dir(dir.path().join("missing"))
            .with_plot_size(50, 50);
        let analysis = analyze_str(CHAT, &config).unwrap();

        let report = write_outputs(&analysis, &config);
        assert!(report.written.is_empty());
        assert_eq!(report.failures.len(), 4);
        assert!(report.failures.iter().all(ChatstatError::is_output_write));
    }

    #[test]
    fn test_one_failing_output_does_not_stop_others() {
        let dir = tempdir().unwrap();
        // A directory where the summary file should be makes only that write fail
        std::fs::create_dir(dir.path().join(files::SUMMARY)).unwrap();

        let config = AnalysisConfig::new()
            .with_output_dir(dir.path())
            .with_plot_size(50, 50);
        let analysis = analyze_str(CHAT, &config).unwrap();

        let report = write_outputs(&analysis, &config);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.written.len(), 3);
        assert!(dir.path().join(files::OVER_THE_YEAR).is_file());
    }

    #[test]
    fn test_oversized_plots_rejected() {
        let dir = tempdir().unwrap();
        let config = AnalysisConfig::new()
            .with_output_dir(dir.path())
            .with_plot_size(u32::MAX, u32::MAX);
        assert!(matches!(
            analyze_str(CHAT, &config),
            Err(ChatstatError::Config { .. })
        ));

        // Skipping validation still fails only the charts
        let analysis = analyze_str(CHAT, &AnalysisConfig::default()).unwrap();
        let report = write_outputs(&analysis, &config);
        assert_eq!(report.written, vec![dir.path().join(files::SUMMARY)]);
        assert_eq!(report.failures.len(), 3);
        assert!(!dir.path().join(files::ABS_PER_HOUR).exists());
    }

    #[test]
    fn test_run_missing_input() {
        let config = AnalysisConfig::new().with_input_path("/nonexistent/chats.txt");
        assert!(run(&config).unwrap_err().is_input_not_found());
    }
}
