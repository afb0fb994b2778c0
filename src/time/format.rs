//! Display strings for the date card: primary lines and the timezone roster.

use chrono::{DateTime, Datelike, Offset, Timelike, Utc};
use chrono_tz::Tz;

use crate::{
    foundation::error::{GameNightError, GameNightResult},
    time::locale::{LocaleConvention, normalize_meridiem},
    time::moment::EventMoment,
};

/// Timezones shown next to the GMT time, in configured order.
pub const DEFAULT_ROSTER: [&str; 3] = ["America/Los_Angeles", "America/New_York", "Australia/Sydney"];

/// Ordered list of timezones rendered on the date card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roster {
    zones: Vec<Tz>,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            zones: vec![
                chrono_tz::America::Los_Angeles,
                chrono_tz::America::New_York,
                chrono_tz::Australia::Sydney,
            ],
        }
    }
}

impl Roster {
    /// Build a roster from IANA identifiers, rejecting unknown zones.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> GameNightResult<Self> {
        let zones = names
            .iter()
            .map(|n| {
                let n = n.as_ref();
                n.parse::<Tz>().map_err(|e| {
                    GameNightError::validation(format!("unknown timezone '{n}': {e}"))
                })
            })
            .collect::<GameNightResult<Vec<_>>>()?;
        Ok(Self { zones })
    }

    /// Zones in configured order.
    pub fn zones(&self) -> &[Tz] {
        &self.zones
    }

    /// Zones in draw order (configured order reversed).
    pub fn draw_order(&self) -> impl Iterator<Item = Tz> + '_ {
        self.zones.iter().rev().copied()
    }
}

/// The three uppercased GMT lines of the date card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrimaryLines {
    /// Full weekday, e.g. `SATURDAY`.
    pub weekday: String,
    /// Long month and day, e.g. `JUNE 15`.
    pub month_day: String,
    /// 24-hour time labelled GMT, e.g. `18:30 GMT`.
    pub time: String,
}

/// Render the GMT weekday / month-day / time lines, or `None` for an invalid moment.
pub fn primary_lines(moment: &EventMoment) -> Option<PrimaryLines> {
    let at = moment.instant()?;
    let month = at.format("%B").to_string();
    Some(PrimaryLines {
        weekday: at.format("%A").to_string().to_uppercase(),
        month_day: LocaleConvention::EnUs
            .month_day(&month, at.day())
            .to_uppercase(),
        time: format!("{} GMT", at.format("%H:%M")),
    })
}

/// Render one roster line for `tz`.
///
/// When the zone's local day-of-month differs from the UTC day-of-month the short weekday is
/// prepended, so a line that crossed midnight says which day it refers to.
pub fn roster_line(at: DateTime<Utc>, tz: Tz) -> String {
    let locale = LocaleConvention::for_zone(tz.name());
    let local = at.with_timezone(&tz);

    let (pm, hour12) = local.hour12();
    let clock = format!(
        "{}:{:02} {} {}",
        hour12,
        local.minute(),
        locale.meridiem(pm),
        zone_abbrev(&local, locale)
    );

    let line = if local.day() == at.day() {
        clock
    } else {
        format!("{} {}", local.format("%a"), clock)
    };
    normalize_meridiem(&line)
}

/// Roster lines in draw order; empty for an invalid moment.
pub fn roster_lines(moment: &EventMoment, roster: &Roster) -> Vec<String> {
    let Some(at) = moment.instant() else {
        return Vec::new();
    };
    roster.draw_order().map(|tz| roster_line(at, tz)).collect()
}

/// Short zone name as the locale shows it.
///
/// Zones the locale has no short name for are shown as a GMT offset (`GMT+5:30`, `GMT-3`, or
/// plain `GMT` at zero).
fn zone_abbrev(local: &DateTime<Tz>, locale: LocaleConvention) -> String {
    let secs = local.offset().fix().local_minus_utc();
    let tzdb = local.format("%Z").to_string();
    if let Some(name) = locale.short_zone_name(local.timezone().name(), &tzdb, secs) {
        return name.to_string();
    }

    if secs == 0 {
        return "GMT".to_string();
    }
    let sign = if secs < 0 { '-' } else { '+' };
    let secs = secs.unsigned_abs();
    let (h, m) = (secs / 3600, (secs % 3600) / 60);
    if m == 0 {
        format!("GMT{sign}{h}")
    } else {
        format!("GMT{sign}{h}:{m:02}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/time/format.rs"]
mod tests;
