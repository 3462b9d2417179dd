//! Response-time inference between sender-switch points.
//!
//! A sender-switch point is a record whose sender differs from the record
//! right before it; the first record is always one. The response time of a
//! switch point is the time since the previous switch point, kept only when
//! it does not exceed the staleness threshold.
//!
//! ```text
//! 10:00 Alice  Hi              switch (first)
//! 10:30 Alice  anyone?
//! 10:35 Bob    Hello           switch, response 35 min
//! 10:36 Bob    How are you     -
//! 18:00 Alice  sorry, busy     switch, 7h25m > 6h: no response time
//! ```

use chrono::{NaiveDateTime, TimeDelta};
use tracing::debug;

use crate::error::{ChatstatError, Result};
use crate::message::MessageRecord;

/// Indices of the sender-switch points in `records`.
pub fn sender_switch_points(records: &[MessageRecord]) -> Vec<usize> {
    (0..records.len())
        .filter(|&i| i == 0 || records[i].sender != records[i - 1].sender)
        .collect()
}

/// Sets `response_time` on every non-stale sender-switch point.
///
/// All other records come back with `response_time` cleared; no record is
/// dropped and order is preserved.
///
/// # Errors
///
/// [`ChatstatError::NegativeResponseTime`] if a switch point is earlier than
/// the previous one.
///
/// # Example
///
/// ```
/// use chatstat::core::estimate_response_times;
/// use chatstat::parsing::{classify_lines, reconstruct_records};
/// use chrono::TimeDelta;
///
/// let lines = classify_lines(
///     "[01.01.23, 10:00:00] Alice: Hi\n\
///      [01.01.23, 10:05:00] Bob: Hello\n\
///      [01.01.23, 10:06:00] Bob: How are you",
/// )?;
/// let records = estimate_response_times(reconstruct_records(lines)?, TimeDelta::hours(6))?;
///
/// assert_eq!(records[1].response_time, Some(TimeDelta::minutes(5)));
/// assert_eq!(records[2].response_time, None);
/// # Ok::<(), chatstat::ChatstatError>(())
/// ```
pub fn estimate_response_times(
    mut records: Vec<MessageRecord>,
    limit: TimeDelta,
) -> Result<Vec<MessageRecord>> {
    let mut previous_switch: Option<NaiveDateTime> = None;
    let mut switches = 0usize;
    let mut stale = 0usize;

    for i in 0..records.len() {
        records[i].response_time = None;

        if i > 0 && records[i].sender == records[i - 1].sender {
            continue;
        }
        switches += 1;

        let timestamp = records[i].timestamp;
        if let Some(previous) = previous_switch {
            let gap = timestamp - previous;
            if gap < TimeDelta::zero() {
                return Err(ChatstatError::NegativeResponseTime {
                    line: records[i].line_number,
                    gap_seconds: -gap.num_seconds(),
                });
            }
            if gap <= limit {
                records[i].response_time = Some(gap);
            } else {
                stale += 1;
            }
        }
        previous_switch = Some(timestamp);
    }

    debug!(
        records = records.len(),
        switches, stale, "estimated response times"
    );
    Ok(records)
}
