//! # Date Handling Utilities
//!
//! Formatting of filesystem timestamps for human-readable report lines.

use std::time::SystemTime;

use chrono::{DateTime, Local, TimeZone};

/// Formats a filesystem timestamp in the local time zone.
///
/// The layout follows the common `en-US` locale rendering,
/// `MM/DD/YYYY, hh:mm:ss AM`.
pub fn format_local_timestamp(time: SystemTime) -> String {
    format_timestamp(DateTime::<Local>::from(time))
}

/// Formats any zoned timestamp with the report layout.
///
/// # Example
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use codex_doctor_util::date_handling::format_timestamp;
///
/// let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
/// assert_eq!(format_timestamp(timestamp), "03/09/2024, 02:05:07 PM");
/// ```
pub fn format_timestamp<Tz>(timestamp: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    timestamp.format("%m/%d/%Y, %I:%M:%S %p").to_string()
}
