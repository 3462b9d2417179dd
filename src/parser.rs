//! Chat export parser: file in, enriched records out.
//!
//! [`ChatParser`] chains the three parsing stages:
//!
//! 1. [`classify_lines`](crate::parsing::classify_lines) - grammar match per line
//! 2. [`reconstruct_records`](crate::parsing::reconstruct_records) - sender/timestamp carry-forward
//! 3. [`estimate_response_times`](crate::core::estimate_response_times) - staleness-filtered response times
//!
//! # Example
//!
//! ```rust,no_run
//! use chatstat::parser::ChatParser;
//!
//! let parser = ChatParser::new();
//! let records = parser.parse("data/chats.txt".as_ref())?;
//!
//! for record in &records {
//!     if let Some(rt) = record.response_time {
//!         println!("{} answered after {}s", record.sender, rt.num_seconds());
//!     }
//! }
//! # Ok::<(), chatstat::ChatstatError>(())
//! ```

use std::fs;
use std::path::Path;

use chrono::TimeDelta;
use tracing::{debug, info};

use crate::config::AnalysisConfig;
use crate::core::estimate_response_times;
use crate::error::{ChatstatError, Result};
use crate::message::{MessageRecord, ParsedLine};
use crate::parsing::{classify_lines, reconstruct_records};

/// Parser for `[DD.MM.YY, HH:MM:SS] Sender: Message` exports.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatParser {
    response_timelimit: TimeDelta,
}

impl ChatParser {
    /// Creates a parser with the default 6 hour staleness cutoff.
    pub fn new() -> Self {
        Self::with_config(&AnalysisConfig::default())
    }

    /// Creates a parser using the cutoff of `config`.
    pub fn with_config(config: &AnalysisConfig) -> Self {
        Self {
            response_timelimit: config.response_timelimit(),
        }
    }

    /// Overrides the staleness cutoff.
    #[must_use]
    pub fn with_response_timelimit(mut self, limit: TimeDelta) -> Self {
        self.response_timelimit = limit;
        self
    }

    pub fn response_timelimit(&self) -> TimeDelta {
        self.response_timelimit
    }

    /// Reads and parses an export file.
    ///
    /// # Errors
    ///
    /// [`ChatstatError::InputNotFound`] if the file is missing, unreadable or
    /// not UTF-8; otherwise any error of [`parse_str`](Self::parse_str).
    pub fn parse(&self, path: &Path) -> Result<Vec<MessageRecord>> {
        let content =
            fs::read_to_string(path).map_err(|e| ChatstatError::input_not_found(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "read chat export");
        self.parse_str(&content)
    }

    /// Parses export content held in memory.
    pub fn parse_str(&self, content: &str) -> Result<Vec<MessageRecord>> {
        let lines = self.classify(content)?;
        let line_count = lines.len();

        let records = reconstruct_records(lines)?;
        debug!(
            lines = line_count,
            records = records.len(),
            "reconstructed records"
        );

        let records = estimate_response_times(records, self.response_timelimit)?;
        info!(
            records = records.len(),
            responses = records.iter().filter(|r| r.response_time.is_some()).count(),
            "parsed chat export"
        );
        Ok(records)
    }

    /// Only runs the line classifier.
    pub fn classify(&self, content: &str) -> Result<Vec<ParsedLine>> {
        classify_lines(content)
    }
}

impl Default for ChatParser {
    fn default() -> Self {
        Self::new()
    }
}
