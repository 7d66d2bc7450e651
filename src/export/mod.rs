//! Presentation helpers: display formatting and CSV export.

mod csv_export;
mod format;

pub use csv_export::{CSV_HEADERS, export_estimate_csv, export_file_name};
pub use format::{format_amount, format_currency, format_hours, round_half_up};
