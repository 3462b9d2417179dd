//! Line classification and record reconstruction.
//!
//! - [`line`] - the fixed `[DD.MM.YY, HH:MM:SS] Sender: body` grammar
//! - [`reconstruct`] - carry-forward of sender/timestamp onto continuation lines

pub mod line;
pub mod reconstruct;

pub use line::{TIMESTAMP_FORMAT, classify_line, classify_lines, parse_timestamp};
pub use reconstruct::reconstruct_records;
