//! Calendar-day strings.
//!
//! Days cross every boundary as zero-padded `YYYY-MM-DD` strings and are
//! compared lexicographically by callers, so parsing is strict: exactly ten
//! characters, dashes in place, and a real calendar date.

use chrono::{Duration, NaiveDate};

use super::{CoreError, CoreResult};

pub const DAY_FORMAT: &str = "%Y-%m-%d";

pub fn parse_day(s: &str) -> CoreResult<NaiveDate> {
    let bytes = s.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !shape_ok {
        return Err(CoreError::InvalidArgument(format!(
            "date must be YYYY-MM-DD, got {s:?}"
        )));
    }

    NaiveDate::parse_from_str(s, DAY_FORMAT)
        .map_err(|_| CoreError::InvalidArgument(format!("not a calendar date: {s:?}")))
}

pub fn format_day(date: NaiveDate) -> String {
    date.format(DAY_FORMAT).to_string()
}

/// The day `n` days before `date`, as a day string.
pub fn days_before(date: NaiveDate, n: i64) -> String {
    format_day(date - Duration::days(n))
}
