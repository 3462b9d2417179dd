//! Line and message types.
//!
//! - [`ParsedLine`] is the classification of one raw line: either a message
//!   start with a [`MessageHeader`] or a continuation carrying only a body.
//! - [`MessageRecord`] is a fully attributed message after reconstruction,
//!   optionally enriched with a response time.
//!
//! # Example
//!
//! ```
//! use chatstat::{MessageHeader, ParsedLine};
//! use chrono::NaiveDate;
//!
//! let ts = NaiveDate::from_ymd_opt(2023, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(10, 0, 0)
//!     .unwrap();
//!
//! let start = ParsedLine::message(1, MessageHeader::new(ts, "Alice"), "Hi");
//! let cont = ParsedLine::continuation(2, "there");
//!
//! assert_eq!(start.sender(), Some("Alice"));
//! assert!(cont.is_continuation());
//! ```

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

/// Timestamp and sender taken from a `[DD.MM.YY, HH:MM:SS] Sender: ` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageHeader {
    pub timestamp: NaiveDateTime,
    pub sender: String,
}

impl MessageHeader {
    pub fn new(timestamp: NaiveDateTime, sender: impl Into<String>) -> Self {
        Self {
            timestamp,
            sender: sender.into(),
        }
    }
}

/// One classified input line.
///
/// Timestamp and sender are bundled in a single optional header, so a line
/// either has both or neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 1-based line number in the export
    pub line_number: usize,
    /// Present when the line starts a new message
    pub header: Option<MessageHeader>,
    /// Message text, without the line terminator
    pub body: String,
}

impl ParsedLine {
    /// A line that starts a new message.
    pub fn message(line_number: usize, header: MessageHeader, body: impl Into<String>) -> Self {
        Self {
            line_number,
            header: Some(header),
            body: body.into(),
        }
    }

    /// A line without a prefix.
    pub fn continuation(line_number: usize, body: impl Into<String>) -> Self {
        Self {
            line_number,
            header: None,
            body: body.into(),
        }
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.header.as_ref().map(|h| h.timestamp)
    }

    pub fn sender(&self) -> Option<&str> {
        self.header.as_ref().map(|h| h.sender.as_str())
    }

    pub fn is_continuation(&self) -> bool {
        self.header.is_none()
    }
}

/// A reconstructed, fully attributed message.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `line_number` | `usize` | Source line the record came from |
/// | `timestamp` | `NaiveDateTime` | Own or carried-forward timestamp |
/// | `sender` | `String` | Own or carried-forward sender |
/// | `body` | `String` | Never empty |
/// | `response_time` | `Option<TimeDelta>` | Only on non-stale sender switches |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    pub line_number: usize,
    pub timestamp: NaiveDateTime,
    pub sender: String,
    pub body: String,
    pub response_time: Option<TimeDelta>,
}

impl MessageRecord {
    /// Creates a record without a response time.
    pub fn new(
        line_number: usize,
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            timestamp,
            sender: sender.into(),
            body: body.into(),
            response_time: None,
        }
    }

    /// Builder-style method to set the response time.
    #[must_use]
    pub fn with_response_time(mut self, response_time: TimeDelta) -> Self {
        self.response_time = Some(response_time);
        self
    }

    /// Calendar date of the timestamp.
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Time-of-day of the timestamp.
    pub fn time(&self) -> NaiveTime {
        self.timestamp.time()
    }

    /// Body length in Unicode scalar values.
    pub fn body_len(&self) -> usize {
        self.body.chars().count()
    }
}
