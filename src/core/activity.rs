//! Activity series behind the charts: messages per hour of day and per day.
//!
//! Hours are rounded to the nearest full hour, exact halves to the even hour:
//! `10:30:00` counts as 10, `11:30:00` as 12, `23:45:00` as 0.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::message::MessageRecord;

pub const HOURS: usize = 24;

/// Hour of day of `timestamp` after rounding to the nearest hour.
///
/// ```
/// use chatstat::core::activity::rounded_hour;
/// use chrono::NaiveDate;
///
/// let at = |h, m, s| NaiveDate::from_ymd_opt(2023, 1, 1).unwrap().and_hms_opt(h, m, s).unwrap();
/// assert_eq!(rounded_hour(at(10, 29, 59)), 10);
/// assert_eq!(rounded_hour(at(10, 30, 0)), 10);
/// assert_eq!(rounded_hour(at(11, 30, 0)), 12);
/// assert_eq!(rounded_hour(at(23, 30, 1)), 0);
/// ```
pub fn rounded_hour(timestamp: NaiveDateTime) -> usize {
    let time = timestamp.time();
    let hour = time.hour() as usize;
    let rest = time.minute() * 60 + time.second();
    let subsec = time.nanosecond();

    let round_up = match rest.cmp(&1800) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => subsec > 0 || hour % 2 == 1,
    };
    (hour + usize::from(round_up)) % HOURS
}

/// Messages per rounded hour, per sender.
pub fn hourly_counts(records: &[MessageRecord]) -> BTreeMap<String, [u32; HOURS]> {
    let mut counts: BTreeMap<String, [u32; HOURS]> = BTreeMap::new();
    for record in records {
        let slots = counts.entry(record.sender.clone()).or_insert([0; HOURS]);
        slots[rounded_hour(record.timestamp)] += 1;
    }
    counts
}

/// Hourly counts divided by the number of distinct days in the chat.
pub fn hourly_averages(
    counts: &BTreeMap<String, [u32; HOURS]>,
    distinct_days: usize,
) -> BTreeMap<String, [f64; HOURS]> {
    counts
        .iter()
        .map(|(sender, slots)| {
            let mut avg = [0.0; HOURS];
            if distinct_days > 0 {
                for (a, &c) in avg.iter_mut().zip(slots) {
                    *a = f64::from(c) / distinct_days as f64;
                }
            }
            (sender.clone(), avg)
        })
        .collect()
}

/// Messages per calendar day, per sender. Days without messages are absent.
pub fn daily_counts(records: &[MessageRecord]) -> BTreeMap<String, BTreeMap<NaiveDate, u32>> {
    let mut counts: BTreeMap<String, BTreeMap<NaiveDate, u32>> = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.sender.clone())
            .or_default()
            .entry(record.date())
            .or_insert(0) += 1;
    }
    counts
}

/// All chart series of one conversation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivitySeries {
    pub hourly: BTreeMap<String, [u32; HOURS]>,
    pub hourly_average: BTreeMap<String, [f64; HOURS]>,
    pub daily: BTreeMap<String, BTreeMap<NaiveDate, u32>>,
    pub distinct_days: usize,
}

impl ActivitySeries {
    pub fn compute(records: &[MessageRecord]) -> Self {
        let distinct_days = records
            .iter()
            .map(MessageRecord::date)
            .collect::<BTreeSet<_>>()
            .len();
        let hourly = hourly_counts(records);
        let hourly_average = hourly_averages(&hourly, distinct_days);
        Self {
            hourly,
            hourly_average,
            daily: daily_counts(records),
            distinct_days,
        }
    }

    /// First and last date with any message.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.daily.values().filter_map(|d| d.keys().next()).min()?;
        let last = self.daily.values().filter_map(|d| d.keys().next_back()).max()?;
        Some((*first, *last))
    }

    pub fn senders(&self) -> impl Iterator<Item = &str> {
        self.hourly.keys().map(String::as_str)
    }
}
