//! Unified error types for chatstat.
//!
//! This module provides a single [`ChatstatError`] enum that covers all error
//! cases in the library. Parsing errors carry the 1-based line number and the
//! offending line so a malformed export can be corrected by hand.
//!
//! # Fatal vs. per-output errors
//!
//! Every variant except [`ChatstatError::OutputWrite`] aborts the run. Output
//! errors are collected per file by
//! [`write_outputs`](crate::analysis::write_outputs) so one unwritable chart
//! does not prevent the summary table from being written.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// A specialized [`Result`] type for chatstat operations.
///
/// # Example
///
/// ```rust
/// use chatstat::error::Result;
/// use chatstat::MessageRecord;
///
/// fn my_function() -> Result<Vec<MessageRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatError>;

/// The error type for all chatstat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatError {
    /// The chat export is missing, unreadable, or not valid UTF-8.
    #[error("Cannot read chat export {}: {source}", path.display())]
    InputNotFound {
        /// Path that was requested
        path: PathBuf,
        /// The underlying read error
        #[source]
        source: io::Error,
    },

    /// A message header matched the line grammar but its timestamp is not a
    /// valid date/time.
    #[error("Line {line}: {reason} (content: {content:?})")]
    Parse {
        /// 1-based line number
        line: usize,
        /// The raw line
        content: String,
        /// What went wrong
        reason: String,
    },

    /// A continuation line appeared before any message header, so there is no
    /// sender or timestamp to attribute it to.
    #[error(
        "Line {line}: continuation line before the first message header (content: {content:?})"
    )]
    InputFormat {
        /// 1-based line number
        line: usize,
        /// The raw line
        content: String,
    },

    /// Timestamps go backwards between two sender-switch points.
    ///
    /// Usually a local-time export crossing a daylight-saving fall-back, or
    /// an export stitched together out of order.
    #[error(
        "Line {line}: timestamp is {gap_seconds}s earlier than the previous sender switch; \
         reorder the messages or correct the timestamp on this line (exports in local time \
         repeat an hour when daylight saving ends)"
    )]
    NegativeResponseTime {
        /// 1-based line number of the later switch point
        line: usize,
        /// Magnitude of the negative gap in seconds
        gap_seconds: i64,
    },

    /// Writing one output file failed.
    #[error("Failed to write {}: {source}", path.display())]
    OutputWrite {
        /// Destination that could not be written
        path: PathBuf,
        /// The underlying writer error
        #[source]
        source: OutputErrorKind,
    },

    /// Invalid configuration value or configuration file.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Description of what's wrong
        message: String,
    },
}

/// Kinds of output errors, one per writer backend.
#[derive(Debug, Error)]
pub enum OutputErrorKind {
    /// File creation or write error
    #[error("{0}")]
    Io(#[from] io::Error),
    /// CSV writer error
    #[cfg(feature = "csv-output")]
    #[error("{0}")]
    Csv(#[from] csv::Error),
    /// JSON serialization error
    #[cfg(feature = "json-output")]
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Chart drawing or PNG encoding error
    #[cfg(feature = "plots")]
    #[error("{0}")]
    Plot(String),
}

impl ChatstatError {
    /// Creates an input-not-found error for `path`.
    pub fn input_not_found(path: impl AsRef<Path>, source: io::Error) -> Self {
        ChatstatError::InputNotFound {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a parse error for a line.
    pub fn parse(line: usize, content: impl Into<String>, reason: impl Into<String>) -> Self {
        ChatstatError::Parse {
            line,
            content: content.into(),
            reason: reason.into(),
        }
    }

    /// Creates an input-format error for an orphan continuation line.
    pub fn input_format(line: usize, content: impl Into<String>) -> Self {
        ChatstatError::InputFormat {
            line,
            content: content.into(),
        }
    }

    /// Creates an output error for `path`.
    pub fn output_write(path: impl AsRef<Path>, source: impl Into<OutputErrorKind>) -> Self {
        ChatstatError::OutputWrite {
            path: path.as_ref().to_path_buf(),
            source: source.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        ChatstatError::Config {
            message: message.into(),
        }
    }

    /// Returns `true` if the input file could not be read.
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, ChatstatError::InputNotFound { .. })
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatstatError::Parse { .. })
    }

    /// Returns `true` if this is an input-format error.
    pub fn is_input_format(&self) -> bool {
        matches!(self, ChatstatError::InputFormat { .. })
    }

    /// Returns `true` if this is an output write error.
    pub fn is_output_write(&self) -> bool {
        matches!(self, ChatstatError::OutputWrite { .. })
    }

    /// Returns the offending line number, if the error refers to one.
    pub fn line_number(&self) -> Option<usize> {
        match self {
            ChatstatError::Parse { line, .. }
            | ChatstatError::InputFormat { line, .. }
            | ChatstatError::NegativeResponseTime { line, .. } => Some(*line),
            _ => None,
        }
    }
}
