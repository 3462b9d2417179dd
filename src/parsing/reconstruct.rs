//! Record reconstruction with sender/timestamp carry-forward.

use crate::error::{ChatstatError, Result};
use crate::message::{MessageHeader, MessageRecord, ParsedLine};

/// Turns classified lines into fully attributed records.
///
/// Continuation lines inherit the header of the nearest preceding line that
/// had one and become records of their own; their text is not appended to the
/// previous body. Lines with an empty body are dropped and leave the carried
/// header untouched, even when they have a header themselves.
///
/// # Errors
///
/// [`ChatstatError::InputFormat`] if a non-empty continuation line comes
/// before any header.
///
/// # Example
///
/// ```
/// use chatstat::parsing::{classify_lines, reconstruct_records};
///
/// let lines = classify_lines("[01.01.23, 10:00:00] Alice: Hi\nthere")?;
/// let records = reconstruct_records(lines)?;
///
/// assert_eq!(records.len(), 2);
/// assert_eq!(records[1].sender, "Alice");
/// assert_eq!(records[1].body, "there");
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn reconstruct_records(lines: Vec<ParsedLine>) -> Result<Vec<MessageRecord>> {
    let mut records = Vec::with_capacity(lines.len());
    let mut last_header: Option<MessageHeader> = None;

    for line in lines {
        if line.body.is_empty() {
            continue;
        }

        if let Some(header) = line.header {
            last_header = Some(header);
        }

        let Some(header) = last_header.as_ref() else {
            return Err(ChatstatError::input_format(line.line_number, line.body));
        };

        records.push(MessageRecord::new(
            line.line_number,
            header.timestamp,
            header.sender.clone(),
            line.body,
        ));
    }

    Ok(records)
}
