//! Date and Time Reconstruction

use chrono::NaiveDateTime;

/// Accepted `date time` layouts, tried in order
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Concatenate a date and a time cell and parse the result
///
/// Times are GMT; no timezone conversion is applied. Returns `None` when
/// the combination matches none of [`TIMESTAMP_FORMATS`].
pub fn combine_date_time(date: &str, time: &str) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", date.trim(), time.trim());
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(&combined, fmt).ok())
}
