//! The event instant parsed from the date and time inputs.

use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Calendar instant assembled from separate date (`YYYY-MM-DD`) and time (`HH:MM`) fields.
///
/// The literal numbers are taken as UTC wall-clock, never as the viewer's local zone.
/// Malformed or empty input yields [`EventMoment::Invalid`], which suppresses the date card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventMoment {
    /// A representable UTC instant.
    Valid(DateTime<Utc>),
    /// The input could not be turned into an instant.
    Invalid,
}

impl EventMoment {
    /// Parse date and time fields into an instant.
    ///
    /// Each component is read with leading-integer semantics (`"07x"` is `7`). Out-of-range
    /// components carry into the next unit (month `13` is January of the following year,
    /// `24:00` is midnight of the next day).
    pub fn parse(date: &str, time: &str) -> Self {
        let fields = split_fields(date, time);

        match fields.and_then(|(y, m, d, h, min)| utc_from_parts(y, m, d, h, min)) {
            Some(instant) => Self::Valid(instant),
            None => Self::Invalid,
        }
    }

    /// The instant, or `None` for an invalid moment.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Valid(dt) => Some(*dt),
            Self::Invalid => None,
        }
    }

    /// Return `true` when the moment can be rendered.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }
}

impl From<DateTime<Utc>> for EventMoment {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Valid(value)
    }
}

/// Split `YYYY-MM-DD` / `HH:MM` into `(year, month0, day, hour, minute)`.
fn split_fields(date: &str, time: &str) -> Option<(i64, i64, i64, i64, i64)> {
    let mut date_parts = date.split('-');
    let mut time_parts = time.split(':');

    let year = parse_leading_int(date_parts.next()?)?;
    let month0 = parse_leading_int(date_parts.next()?)? - 1;
    let day = parse_leading_int(date_parts.next()?)?;
    let hour = parse_leading_int(time_parts.next()?)?;
    let minute = parse_leading_int(time_parts.next()?)?;
    Some((year, month0, day, hour, minute))
}

/// Read an optionally signed run of leading decimal digits, ignoring leading whitespace.
fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let v: i64 = digits[..end].parse().ok()?;
    Some(if neg { -v } else { v })
}

/// Epoch construction from 0-based month with carry semantics.
fn utc_from_parts(
    year: i64,
    month0: i64,
    day: i64,
    hour: i64,
    minute: i64,
) -> Option<DateTime<Utc>> {
    // Two-digit years map into the 1900s.
    let year = if (0..=99).contains(&year) {
        1900 + year
    } else {
        year
    };

    let year = year.checked_add(month0.div_euclid(12))?;
    let month = u32::try_from(month0.rem_euclid(12) + 1).ok()?;
    let first = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, 1)?;

    let offset = Duration::try_days(day.checked_sub(1)?)?
        .checked_add(&Duration::try_hours(hour)?)?
        .checked_add(&Duration::try_minutes(minute)?)?;

    let naive = first.and_hms_opt(0, 0, 0)?.checked_add_signed(offset)?;
    Some(naive.and_utc())
}

#[cfg(test)]
#[path = "../../tests/unit/time/moment.rs"]
mod tests;
