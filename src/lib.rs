//! # Chatstat
//!
//! A Rust library for analyzing WhatsApp chat exports: who answers how fast,
//! who writes how much, and when.
//!
//! ## Overview
//!
//! Chatstat reads the plain-text export format
//!
//! ```text
//! [DD.MM.YY, HH:MM:SS] Sender: Message
//! ```
//!
//! where lines without the bracketed prefix continue the previous message.
//! From that it derives:
//! - **Response times** - the gap between sender switches, ignoring gaps longer
//!   than a staleness cutoff (6 hours by default)
//! - **Per-sender statistics** - average response time, average message length,
//!   messages per day and pairwise messages-per-day ratios
//! - **Activity** - messages per rounded hour of day and per calendar day,
//!   rendered as PNG line charts
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstat::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let chat = "[01.01.23, 10:00:00] Alice: Hi\n\
//!                 [01.01.23, 10:05:00] Bob: Hello\n\
//!                 [01.01.23, 10:06:00] Bob: How are you?\n";
//!
//!     let records = ChatParser::new().parse_str(chat)?;
//!     let summary = Summary::compute(&records);
//!
//!     let bob = summary.sender("Bob").unwrap();
//!     assert_eq!(bob.response_count, 1);
//!     assert_eq!(bob.average_response_time, Some(chrono::TimeDelta::minutes(5)));
//!     Ok(())
//! }
//! ```
//!
//! ## Full Pipeline
//!
//! ```rust,no_run
//! use chatstat::analysis::run;
//! use chatstat::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::new()
//!     .with_input_path("data/chats.txt")
//!     .with_output_dir("out");
//!
//! let (analysis, report) = run(&config)?;
//! println!("{} messages, {} files written", analysis.records.len(), report.written.len());
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`ChatParser`](parser::ChatParser), file to enriched records
//! - [`parsing`] - Line classifier and record reconstructor
//! - [`core`] - Statistics over records
//!   - [`core::response_time`] - [`estimate_response_times`](core::estimate_response_times)
//!   - [`core::stats`] - [`Summary`](core::Summary), [`SenderStats`](core::SenderStats)
//!   - [`core::words`] - [`WordFrequency`](core::WordFrequency)
//!   - [`core::activity`] - [`ActivitySeries`](core::ActivitySeries)
//!   - [`core::output`] - Summary CSV, records CSV, JSON report
//! - `plot` - PNG charts (feature `plots`)
//! - [`analysis`] - End-to-end pipeline and [`OutputReport`](analysis::OutputReport)
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig), TOML loading
//! - [`error`] - Unified error types ([`ChatstatError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod analysis;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod message;
pub mod parser;
pub mod parsing;
#[cfg(feature = "plots")]
pub mod plot;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatError, Result};
pub use message::{MessageHeader, MessageRecord, ParsedLine};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstat::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{MessageHeader, MessageRecord, ParsedLine};

    pub use crate::error::{ChatstatError, Result};

    pub use crate::config::AnalysisConfig;
    pub use crate::parser::ChatParser;
    pub use crate::parsing::{classify_line, classify_lines, reconstruct_records};

    pub use crate::core::{
        ActivitySeries, SenderRatio, SenderStats, Summary, WordFrequency,
        estimate_response_times, word_frequency_by_sender,
    };

    pub use crate::analysis::{Analysis, OutputReport, analyze_file, analyze_str, write_outputs};

    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_summary_csv, write_records_csv, write_summary_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_report_json, write_report_json};
}
