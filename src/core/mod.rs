//! Analysis over reconstructed records.
//!
//! This module contains:
//! - [`response_time`] - Sender-switch detection and the staleness filter
//! - [`stats`] - Per-sender averages and messages ratios
//! - [`words`] - Word usage frequency
//! - [`activity`] - Hour-of-day and per-day message counts for the charts
//! - [`output`] - Format writers (summary CSV, records CSV, JSON report)
//!
//! # Quick Start
//!
//! ```rust
//! use chatstat::core::{ActivitySeries, Summary, estimate_response_times, word_frequency_by_sender};
//! use chatstat::parsing::{classify_lines, reconstruct_records};
//! use chrono::TimeDelta;
//!
//! let lines = classify_lines("[01.01.23, 10:00:00] Alice: Hi\n[01.01.23, 10:05:00] Bob: Hello")?;
//! let records = estimate_response_times(reconstruct_records(lines)?, TimeDelta::hours(6))?;
//!
//! let summary = Summary::compute(&records);
//! let words = word_frequency_by_sender(&records);
//! let activity = ActivitySeries::compute(&records);
//!
//! assert_eq!(summary.senders.len(), 2);
//! assert_eq!(words["Bob"].get("Hello"), 1);
//! assert_eq!(activity.hourly["Alice"][10], 1);
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

pub mod activity;
pub mod output;
pub mod response_time;
pub mod stats;
pub mod words;

pub use activity::ActivitySeries;
pub use response_time::{estimate_response_times, sender_switch_points};
pub use stats::{SenderRatio, SenderStats, Summary};
pub use words::{WordFrequency, word_frequency_by_sender};

// Re-export MessageRecord from the crate root
pub use crate::MessageRecord;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_summary_csv, write_records_csv, write_summary_csv};
#[cfg(feature = "json-output")]
pub use output::{to_report_json, write_report_json};
