//! Duration and timestamp formatting for terminal output.
//!
//! Durations are shown as `HH:MM:SS`. Hours are not wrapped at 24, and a
//! negative duration (possible when the system clock went backwards during a
//! shift) keeps its sign instead of being hidden:
//!
//! ```rust
//! use chrono::TimeDelta;
//! use fichaje::libs::formatter::format_duration;
//!
//! assert_eq!(format_duration(&TimeDelta::minutes(465)), "07:45:00");
//! assert_eq!(format_duration(&TimeDelta::seconds(-90)), "-00:01:30");
//! ```
//!
//! Timestamps are stored in UTC and always rendered in the local time zone.

use chrono::{DateTime, Local, TimeDelta, Utc};

/// Signed `HH:MM:SS`; milliseconds are truncated.
pub fn format_duration(duration: &TimeDelta) -> String {
    let sign = if *duration < TimeDelta::zero() { "-" } else { "" };
    let total_secs = duration.num_seconds().unsigned_abs();
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;
    format!("{}{:02}:{:02}:{:02}", sign, hours, mins, secs)
}

/// Local wall-clock time, `HH:MM:SS`.
pub fn format_time(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// Local date, `YYYY-MM-DD`.
pub fn format_date(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Local date and time, `YYYY-MM-DD HH:MM`.
pub fn format_datetime(timestamp: &DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
