//! JSON report writer.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::stats::{SenderStats, Summary, format_duration};
use crate::core::words::WordFrequency;
use crate::error::{ChatstatError, OutputErrorKind, Result};

#[derive(Serialize)]
struct JsonReport<'a> {
    total_messages: usize,
    distinct_days: usize,
    senders: Vec<JsonSender<'a>>,
    ratios: Vec<JsonRatio<'a>>,
}

#[derive(Serialize)]
struct JsonSender<'a> {
    sender: &'a str,
    message_count: usize,
    response_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_response_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    average_response_time_seconds: Option<f64>,
    average_message_length: u64,
    average_messages_per_day: f64,
    top_words: Vec<JsonWord<'a>>,
}

#[derive(Serialize)]
struct JsonWord<'a> {
    word: &'a str,
    count: usize,
}

#[derive(Serialize)]
struct JsonRatio<'a> {
    label: &'a str,
    ratio: f64,
}

impl<'a> JsonSender<'a> {
    fn new(stats: &'a SenderStats, words: Option<&'a WordFrequency>, top_words: usize) -> Self {
        let top_words = words
            .map(|w| {
                w.most_common(top_words)
                    .into_iter()
                    .map(|(word, count)| JsonWord { word, count })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            sender: &stats.sender,
            message_count: stats.message_count,
            response_count: stats.response_count,
            average_response_time: stats.average_response_time.map(format_duration),
            average_response_time_seconds: stats
                .average_response_time
                .map(|rt| rt.num_milliseconds() as f64 / 1000.0),
            average_message_length: stats.average_message_length,
            average_messages_per_day: stats.average_messages_per_day,
            top_words,
        }
    }
}

/// Writes the JSON report to a file.
///
/// # Format
/// ```json
/// {
///   "total_messages": 3,
///   "distinct_days": 1,
///   "senders": [
///     {"sender": "Bob", "average_response_time": "0 days 00:05:00", "top_words": [...], ...}
///   ],
///   "ratios": [{"label": "Alice vs Bob", "ratio": 0.5}]
/// }
/// ```
pub fn write_report_json(
    summary: &Summary,
    words: &BTreeMap<String, WordFrequency>,
    top_words: usize,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let path = output_path.as_ref();
    let json =
        to_report_json(summary, words, top_words).map_err(|e| ChatstatError::output_write(path, e))?;
    let mut file = File::create(path).map_err(|e| ChatstatError::output_write(path, e))?;
    file.write_all(json.as_bytes())
        .map_err(|e| ChatstatError::output_write(path, e))?;
    Ok(())
}

/// Converts the report to a pretty-printed JSON string.
pub fn to_report_json(
    summary: &Summary,
    words: &BTreeMap<String, WordFrequency>,
    top_words: usize,
) -> std::result::Result<String, OutputErrorKind> {
    let report = JsonReport {
        total_messages: summary.total_messages,
        distinct_days: summary.distinct_days,
        senders: summary
            .senders
            .iter()
            .map(|s| JsonSender::new(s, words.get(&s.sender), top_words))
            .collect(),
        ratios: summary
            .ratios
            .iter()
            .map(|r| JsonRatio {
                label: &r.label,
                ratio: r.ratio,
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}
