//! CSV output writers.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::core::stats::{Summary, format_duration, format_float};
use crate::error::{ChatstatError, OutputErrorKind, Result};
use crate::message::MessageRecord;

/// Row labels of the summary table, in output order.
pub const SUMMARY_ROWS: [&str; 3] = [
    "Average Response Time",
    "Average Message Length",
    "Average amount of messages per day",
];

/// Writes the summary table: one column per sender, one row per statistic.
///
/// # Format
/// - Header: empty corner cell, then sender names
/// - Response times: `"<d> days HH:MM:SS"`, empty when the sender never responded
/// - Message length: integer
/// - Messages per day: float with at least one decimal
pub fn write_summary_csv(
    summary: &Summary,
    output_path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|e| ChatstatError::output_write(path, e))?;
    write_summary(summary, file, delimiter).map_err(|e| ChatstatError::output_write(path, e))
}

/// Converts the summary table to a CSV string.
pub fn to_summary_csv(
    summary: &Summary,
    delimiter: u8,
) -> std::result::Result<String, OutputErrorKind> {
    let mut buffer = Vec::new();
    write_summary(summary, &mut buffer, delimiter)?;
    String::from_utf8(buffer)
        .map_err(|e| OutputErrorKind::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

fn write_summary<W: io::Write>(summary: &Summary, sink: W, delimiter: u8) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);

    let mut header = vec![String::new()];
    header.extend(summary.sender_names().map(str::to_string));
    writer.write_record(&header)?;

    let response_times = summary.senders.iter().map(|s| {
        s.average_response_time
            .map(format_duration)
            .unwrap_or_default()
    });
    write_row(&mut writer, SUMMARY_ROWS[0], response_times)?;

    let lengths = summary
        .senders
        .iter()
        .map(|s| s.average_message_length.to_string());
    write_row(&mut writer, SUMMARY_ROWS[1], lengths)?;

    let per_day = summary
        .senders
        .iter()
        .map(|s| format_float(s.average_messages_per_day));
    write_row(&mut writer, SUMMARY_ROWS[2], per_day)?;

    writer.flush()?;
    Ok(())
}

fn write_row<W: io::Write>(
    writer: &mut csv::Writer<W>,
    label: &str,
    cells: impl Iterator<Item = String>,
) -> csv::Result<()> {
    let mut record = vec![label.to_string()];
    record.extend(cells);
    writer.write_record(&record)
}

/// Writes the enriched message table.
///
/// # Format
/// - Columns: `Line`, `Date`, `Time`, `Sender`, `Body`, `ResponseTimeSeconds`
/// - `ResponseTimeSeconds` is empty when the record has no response time
pub fn write_records_csv(
    records: &[MessageRecord],
    output_path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<()> {
    let path = output_path.as_ref();
    let file = File::create(path).map_err(|e| ChatstatError::output_write(path, e))?;
    write_records(records, file, delimiter).map_err(|e| ChatstatError::output_write(path, e))
}

fn write_records<W: io::Write>(records: &[MessageRecord], sink: W, delimiter: u8) -> csv::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(sink);

    writer.write_record(["Line", "Date", "Time", "Sender", "Body", "ResponseTimeSeconds"])?;

    for record in records {
        writer.write_record([
            record.line_number.to_string(),
            record.date().format("%Y-%m-%d").to_string(),
            record.time().format("%H:%M:%S").to_string(),
            record.sender.clone(),
            record.body.clone(),
            record
                .response_time
                .map(|rt| rt.num_seconds().to_string())
                .unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
