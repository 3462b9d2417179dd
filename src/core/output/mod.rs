//! Output writers.
//!
//! - [`write_summary_csv`] / [`to_summary_csv`] - the per-sender summary table - requires `csv-output`
//! - [`write_records_csv`] - the enriched message table - requires `csv-output`
//! - [`write_report_json`] / [`to_report_json`] - summary, ratios and top words - requires `json-output`
//!
//! File writers report failures as [`ChatstatError::OutputWrite`](crate::ChatstatError::OutputWrite)
//! naming the destination; string converters return the bare
//! [`OutputErrorKind`](crate::error::OutputErrorKind).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "csv-output")]
//! # fn main() {
//! use chatstat::core::Summary;
//! use chatstat::core::output::to_summary_csv;
//!
//! let csv = to_summary_csv(&Summary::default(), b',').unwrap();
//! assert!(csv.contains("Average Response Time"));
//! # }
//! # #[cfg(not(feature = "csv-output"))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{SUMMARY_ROWS, to_summary_csv, write_records_csv, write_summary_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_report_json, write_report_json};
