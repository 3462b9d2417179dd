//! Per-sender averages over the enriched records.
//!
//! | Statistic | Definition |
//! |-----------|------------|
//! | Average response time | Mean of the sender's response times (absent if none) |
//! | Average message length | Mean body length in chars, rounded half to even |
//! | Average messages per day | Sender's messages / distinct dates of the whole chat |
//! | Messages ratio | `per_day[a] / per_day[b]` for every sender pair |
//!
//! Senders are ordered by name so the summary table is stable across runs.

use std::collections::{BTreeMap, BTreeSet};

use chrono::TimeDelta;

use crate::message::MessageRecord;

/// Averages for one sender.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderStats {
    pub sender: String,
    pub message_count: usize,
    /// Number of records that carry a response time
    pub response_count: usize,
    pub average_response_time: Option<TimeDelta>,
    pub average_message_length: u64,
    pub average_messages_per_day: f64,
}

/// Messages-per-day ratio of two senders, labelled `"a vs b"`.
#[derive(Debug, Clone, PartialEq)]
pub struct SenderRatio {
    pub label: String,
    pub first: String,
    pub second: String,
    pub ratio: f64,
}

/// Summary of a whole conversation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub senders: Vec<SenderStats>,
    pub ratios: Vec<SenderRatio>,
    pub distinct_days: usize,
    pub total_messages: usize,
}

#[derive(Default)]
struct Accumulator {
    messages: usize,
    chars: usize,
    responses: usize,
    response_nanos: i128,
}

impl Summary {
    /// Computes all statistics in one pass over `records`.
    ///
    /// # Example
    ///
    /// ```
    /// use chatstat::core::Summary;
    /// use chatstat::MessageRecord;
    /// use chrono::{NaiveDate, TimeDelta};
    ///
    /// let ts = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
    /// let records = vec![
    ///     MessageRecord::new(1, ts, "Alice", "Hi"),
    ///     MessageRecord::new(2, ts + TimeDelta::minutes(5), "Bob", "Hello")
    ///         .with_response_time(TimeDelta::minutes(5)),
    /// ];
    ///
    /// let summary = Summary::compute(&records);
    /// let bob = summary.sender("Bob").unwrap();
    /// assert_eq!(bob.average_response_time, Some(TimeDelta::minutes(5)));
    /// assert_eq!(bob.average_message_length, 5);
    /// assert_eq!(summary.ratios[0].label, "Alice vs Bob");
    /// ```
    pub fn compute(records: &[MessageRecord]) -> Self {
        let mut per_sender: BTreeMap<&str, Accumulator> = BTreeMap::new();
        let mut days = BTreeSet::new();

        for record in records {
            days.insert(record.date());
            let acc = per_sender.entry(record.sender.as_str()).or_default();
            acc.messages += 1;
            acc.chars += record.body_len();
            if let Some(rt) = record.response_time {
                acc.responses += 1;
                acc.response_nanos += duration_nanos(rt);
            }
        }

        let distinct_days = days.len();
        let senders: Vec<SenderStats> = per_sender
            .into_iter()
            .map(|(sender, acc)| SenderStats {
                sender: sender.to_string(),
                message_count: acc.messages,
                response_count: acc.responses,
                average_response_time: (acc.responses > 0)
                    .then(|| nanos_duration(acc.response_nanos / acc.responses as i128)),
                average_message_length: (acc.chars as f64 / acc.messages as f64).round_ties_even()
                    as u64,
                average_messages_per_day: acc.messages as f64 / distinct_days as f64,
            })
            .collect();

        let mut ratios = Vec::new();
        for (i, a) in senders.iter().enumerate() {
            for b in &senders[i + 1..] {
                ratios.push(SenderRatio {
                    label: format!("{} vs {}", a.sender, b.sender),
                    first: a.sender.clone(),
                    second: b.sender.clone(),
                    ratio: a.average_messages_per_day / b.average_messages_per_day,
                });
            }
        }

        Self {
            senders,
            ratios,
            distinct_days,
            total_messages: records.len(),
        }
    }

    /// Stats of one sender, if present.
    pub fn sender(&self, name: &str) -> Option<&SenderStats> {
        self.senders.iter().find(|s| s.sender == name)
    }

    /// Sender names in column order.
    pub fn sender_names(&self) -> impl Iterator<Item = &str> {
        self.senders.iter().map(|s| s.sender.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

fn duration_nanos(d: TimeDelta) -> i128 {
    i128::from(d.num_seconds()) * 1_000_000_000 + i128::from(d.subsec_nanos())
}

fn nanos_duration(nanos: i128) -> TimeDelta {
    let secs = nanos.div_euclid(1_000_000_000) as i64;
    let rest = nanos.rem_euclid(1_000_000_000) as i64;
    TimeDelta::seconds(secs) + TimeDelta::nanoseconds(rest)
}

/// Formats a duration as `"<d> days HH:MM:SS[.ffffff]"`.
///
/// Sub-second parts print as microseconds, or as nanoseconds when they are
/// not a whole number of microseconds.
///
/// ```
/// use chatstat::core::stats::format_duration;
/// use chrono::TimeDelta;
///
/// assert_eq!(format_duration(TimeDelta::minutes(5)), "0 days 00:05:00");
/// assert_eq!(format_duration(TimeDelta::hours(30)), "1 days 06:00:00");
/// assert_eq!(format_duration(TimeDelta::milliseconds(1500)), "0 days 00:00:01.500000");
/// ```
pub fn format_duration(d: TimeDelta) -> String {
    let nanos = duration_nanos(d);
    let total_secs = nanos.div_euclid(1_000_000_000);
    let subsec = nanos.rem_euclid(1_000_000_000);

    let days = total_secs.div_euclid(86_400);
    let secs_of_day = total_secs.rem_euclid(86_400);
    let (h, m, s) = (secs_of_day / 3600, secs_of_day % 3600 / 60, secs_of_day % 60);

    let sign = if days < 0 { "+" } else { "" };
    let mut out = format!("{days} days {sign}{h:02}:{m:02}:{s:02}");
    if subsec != 0 {
        if subsec % 1000 == 0 {
            out.push_str(&format!(".{:06}", subsec / 1000));
        } else {
            out.push_str(&format!(".{subsec:09}"));
        }
    }
    out
}

/// Formats a float in shortest round-trip form with at least one decimal.
///
/// ```
/// use chatstat::core::stats::format_float;
///
/// assert_eq!(format_float(2.0), "2.0");
/// assert_eq!(format_float(1.5), "1.5");
/// assert_eq!(format_float(1.0 / 3.0), "0.3333333333333333");
/// ```
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
