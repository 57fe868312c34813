//! Date and duration formatting.

use chrono::{DateTime, TimeZone};

use crate::types::Timestamp;

/// Format a start/end pair in `tz`.
///
/// Same-day ranges print the day once (`Sat, Jan 6 10:00 - 10:30`);
/// otherwise both ends carry their day.
pub fn format_date_time_range<Tz>(start: Timestamp, end: Timestamp, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let start: DateTime<Tz> = start.with_timezone(tz);
    let end: DateTime<Tz> = end.with_timezone(tz);

    if start.date_naive() == end.date_naive() {
        format!("{} - {}", start.format("%a, %b %-d %H:%M"), end.format("%H:%M"))
    } else {
        format!(
            "{} - {}",
            start.format("%a, %b %-d %H:%M"),
            end.format("%a, %b %-d %H:%M")
        )
    }
}

/// Format centiseconds as a result time: `S.CC`, `M:SS.CC` or `H:MM:SS.CC`.
pub fn format_centiseconds(centiseconds: i64) -> String {
    let centiseconds = centiseconds.max(0);
    let cs = centiseconds % 100;
    let total_seconds = centiseconds / 100;
    let seconds = total_seconds % 60;
    let minutes = (total_seconds / 60) % 60;
    let hours = total_seconds / 3600;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}.{cs:02}")
    } else if minutes > 0 {
        format!("{minutes}:{seconds:02}.{cs:02}")
    } else {
        format!("{seconds}.{cs:02}")
    }
}
