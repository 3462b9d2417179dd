//! PNG charts of when messages are sent.
//!
//! | Chart | x axis | y axis |
//! |-------|--------|--------|
//! | [`hourly_counts_chart`] | Time rounded to the nearest hour | Amount of messages sent |
//! | [`hourly_averages_chart`] | Time rounded to the nearest hour | Average amount of messages sent |
//! | [`daily_counts_chart`] | Date | Amount of messages sent |
//!
//! Every chart has one series per sender, in sender name order, so series
//! colors and legend entries match across the three images.

pub mod chart;

use std::collections::BTreeSet;
use std::path::Path;

pub use chart::{ChartSeries, LineChart};

use crate::config::MAX_PLOT_SIZE;
use crate::core::activity::{ActivitySeries, HOURS};
use crate::error::{ChatstatError, OutputErrorKind, Result};

const HOUR_DESC: &str = "Time rounded to the nearest hour";
const COUNT_DESC: &str = "Amount of messages sent";
const AVERAGE_DESC: &str = "Average amount of messages sent";

/// Hour ticks at 0, 2, .., 24.
const HOUR_LABELS: usize = 13;
const MAX_DATE_LABELS: usize = 10;

fn hourly_chart<'a>(
    caption: &str,
    y_desc: &str,
    rows: impl Iterator<Item = (&'a String, [f64; HOURS])>,
) -> LineChart {
    LineChart {
        caption: caption.to_string(),
        x_desc: HOUR_DESC.to_string(),
        y_desc: y_desc.to_string(),
        x_min: 0.0,
        x_max: 24.0,
        x_labels: HOUR_LABELS,
        x_origin: None,
        series: rows
            .map(|(sender, slots)| {
                ChartSeries::continuous(
                    sender.as_str(),
                    slots
                        .iter()
                        .enumerate()
                        .map(|(hour, &v)| (hour as f64, v))
                        .collect(),
                )
            })
            .collect(),
    }
}

/// Absolute messages per rounded hour of day.
pub fn hourly_counts_chart(activity: &ActivitySeries) -> LineChart {
    hourly_chart(
        "Messages per hour",
        COUNT_DESC,
        activity
            .hourly
            .iter()
            .map(|(sender, slots)| (sender, slots.map(f64::from))),
    )
}

/// Messages per rounded hour of day, divided by the number of chat days.
pub fn hourly_averages_chart(activity: &ActivitySeries) -> LineChart {
    hourly_chart(
        "Average messages per hour",
        AVERAGE_DESC,
        activity
            .hourly_average
            .iter()
            .map(|(sender, slots)| (sender, *slots)),
    )
}

/// Messages per calendar day over the whole conversation.
///
/// The x positions are days since the first message, labelled as dates. A
/// sender's line breaks across dates on which only other senders wrote.
pub fn daily_counts_chart(activity: &ActivitySeries) -> LineChart {
    let mut chart = LineChart {
        caption: "Messages over the year".to_string(),
        x_desc: "Date".to_string(),
        y_desc: COUNT_DESC.to_string(),
        x_labels: MAX_DATE_LABELS,
        ..LineChart::default()
    };
    let Some((first, last)) = activity.date_range() else {
        return chart;
    };

    let dates: BTreeSet<_> = activity.daily.values().flat_map(|d| d.keys()).collect();

    chart.series = activity
        .daily
        .iter()
        .map(|(sender, per_day)| {
            let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
            let mut current = Vec::new();
            for &date in &dates {
                match per_day.get(date) {
                    Some(&count) => {
                        current.push(((*date - first).num_days() as f64, f64::from(count)));
                    }
                    None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                    None => {}
                }
            }
            if !current.is_empty() {
                runs.push(current);
            }
            ChartSeries {
                label: sender.clone(),
                runs,
            }
        })
        .collect();
    chart.x_max = (last - first).num_days() as f64;
    chart.x_origin = Some(first);
    chart
}

/// Renders `chart` as a `width` x `height` PNG at `path`.
///
/// Sides outside `1..=MAX_PLOT_SIZE` fail this output without allocating.
pub fn write_chart(chart: &LineChart, path: impl AsRef<Path>, size: (u32, u32)) -> Result<()> {
    let path = path.as_ref();
    let sides = 1..=MAX_PLOT_SIZE;
    if !sides.contains(&size.0) || !sides.contains(&size.1) {
        return Err(ChatstatError::output_write(
            path,
            OutputErrorKind::Plot(format!("chart size {}x{} is out of range", size.0, size.1)),
        ));
    }
    chart
        .draw(path, size)
        .map_err(|e| ChatstatError::output_write(path, OutputErrorKind::Plot(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageRecord;
    use chrono::NaiveDate;

    fn rec(d: u32, h: u32, sender: &str) -> MessageRecord {
        let ts = NaiveDate::from_ymd_opt(2023, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap();
        MessageRecord::new(0, ts, sender, "x")
    }

    fn activity() -> ActivitySeries {
        ActivitySeries::compute(&[
            rec(1, 10, "Alice"),
            rec(1, 11, "Bob"),
            rec(2, 10, "Bob"),
            rec(4, 9, "Alice"),
            rec(4, 10, "Alice"),
        ])
    }

    #[test]
    fn test_hourly_counts_chart() {
        let chart = hourly_counts_chart(&activity());
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.x_labels, 13);
        let alice = &chart.series[0].runs[0];
        assert_eq!(alice.len(), HOURS);
        assert_eq!(alice[10], (10.0, 2.0));
        assert_eq!(alice[9], (9.0, 1.0));
    }

    #[test]
    fn test_charts_label_axes_and_senders() {
        let activity = activity();
        let counts = hourly_counts_chart(&activity);
        assert_eq!(counts.x_desc, "Time rounded to the nearest hour");
        assert_eq!(counts.y_desc, "Amount of messages sent");

        let averages = hourly_averages_chart(&activity);
        assert_eq!(averages.y_desc, "Average amount of messages sent");

        for chart in [counts, averages, daily_counts_chart(&activity)] {
            let labels: Vec<_> = chart.series.iter().map(|s| s.label.as_str()).collect();
            assert_eq!(labels, ["Alice", "Bob"]);
        }
    }

    #[test]
    fn test_hourly_averages_chart() {
        let chart = hourly_averages_chart(&activity());
        let bob = &chart.series[1].runs[0];
        assert!((bob[11].1 - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_daily_chart_breaks_on_gaps() {
        let chart = daily_counts_chart(&activity());
        assert_eq!(chart.x_max, 3.0);
        assert_eq!(chart.x_origin, NaiveDate::from_ymd_opt(2023, 1, 1));

        // Alice wrote on days 0 and 3, Bob on days 0 and 1
        let alice = &chart.series[0];
        assert_eq!(alice.runs, vec![vec![(0.0, 1.0)], vec![(3.0, 2.0)]]);
        let bob = &chart.series[1];
        assert_eq!(bob.runs, vec![vec![(0.0, 1.0), (1.0, 1.0)]]);
    }

    #[test]
    fn test_daily_chart_empty() {
        let chart = daily_counts_chart(&ActivitySeries::default());
        assert!(chart.series.is_empty());
        assert_eq!(chart.x_origin, None);
    }

    #[test]
    fn test_write_chart_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        write_chart(&hourly_counts_chart(&activity()), &path, (320, 200)).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_write_empty_chart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        write_chart(&daily_counts_chart(&ActivitySeries::default()), &path, (320, 200)).unwrap();
        assert!(path.is_file());
    }

    #[test]
    fn test_write_chart_rejects_oversized_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let err =
            write_chart(&hourly_counts_chart(&activity()), &path, (u32::MAX, u32::MAX)).unwrap_err();
        assert!(err.is_output_write());
        assert!(err.to_string().contains("out of range"));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_chart_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("chart.png");
        let err = write_chart(&hourly_counts_chart(&activity()), &path, (100, 100)).unwrap_err();
        assert!(err.is_output_write());
    }
}
