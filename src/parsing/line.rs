//! Line grammar of the chat export.
//!
//! Every line is either a message start
//!
//! ```text
//! [15.01.24, 10:30:45] Alice: Hello
//! ```
//!
//! or a continuation of the previous message, in which case the whole line is
//! the body. The grammar always has a body-only fallback, so the only way a
//! line can fail is a prefix whose timestamp is not a real date/time.

use std::borrow::Cow;
use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use crate::error::{ChatstatError, Result};
use crate::message::{MessageHeader, ParsedLine};

/// chrono format of the bracketed timestamp: day.month.2-digit-year, 24h clock.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%y, %H:%M:%S";

// [DD.MM.YY, HH:MM:SS] Sender: Message
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\[(\d{2}\.\d{2}\.\d{2}, \d{2}:\d{2}:\d{2})\] ([^:]*): )?(.*)$")
        .expect("line pattern is a valid regex")
});

/// Parses the bracketed timestamp text, e.g. `15.01.24, 10:30:45`.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Classifies one raw line.
///
/// `line_number` is 1-based and only used for error reporting and carried on
/// the result. A trailing `\n` / `\r\n` is stripped before matching.
///
/// # Example
///
/// ```
/// use chatstat::parsing::classify_line;
///
/// let line = classify_line(1, "[01.01.23, 10:00:00] Alice: Hi")?;
/// assert_eq!(line.sender(), Some("Alice"));
/// assert_eq!(line.body, "Hi");
///
/// let cont = classify_line(2, "there")?;
/// assert!(cont.is_continuation());
/// assert_eq!(cont.body, "there");
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn classify_line(line_number: usize, raw: &str) -> Result<ParsedLine> {
    let line = raw
        .strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(raw);

    let Some(caps) = LINE_PATTERN.captures(line) else {
        return Err(ChatstatError::parse(
            line_number,
            line,
            "line does not match the export grammar",
        ));
    };

    let body = caps.get(3).map_or("", |m| m.as_str());

    match (caps.get(1), caps.get(2)) {
        (Some(stamp), Some(sender)) => {
            let timestamp = NaiveDateTime::parse_from_str(stamp.as_str(), TIMESTAMP_FORMAT)
                .map_err(|e| {
                    ChatstatError::parse(
                        line_number,
                        line,
                        format!("invalid timestamp '{}': {e}", stamp.as_str()),
                    )
                })?;
            Ok(ParsedLine::message(
                line_number,
                MessageHeader::new(timestamp, sender.as_str()),
                body,
            ))
        }
        _ => Ok(ParsedLine::continuation(line_number, body)),
    }
}

/// Classifies every line of an export, numbering lines from 1.
///
/// Lines end at `\n`, `\r\n` or a lone `\r`. A leading UTF-8 byte order
/// mark is ignored.
pub fn classify_lines(content: &str) -> Result<Vec<ParsedLine>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = if content.contains('\r') {
        Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(content)
    };
    content
        .lines()
        .enumerate()
        .map(|(i, line)| classify_line(i + 1, line))
        .collect()
}
