//! Locale conventions that decide meridiem casing and month/day order.

/// The two locale conventions used for time formatting.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LocaleConvention {
    /// `en-US`: uppercase meridiem, month-first dates.
    EnUs,
    /// `en-AU`: lowercase meridiem, day-first dates.
    EnAu,
}

impl LocaleConvention {
    /// Pick the convention for a timezone identifier.
    ///
    /// Identifiers containing `australia` (any case) use `en-AU`; everything else uses `en-US`.
    pub fn for_zone(tz_name: &str) -> Self {
        if tz_name.to_ascii_lowercase().contains("australia") {
            Self::EnAu
        } else {
            Self::EnUs
        }
    }

    /// BCP 47 tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::EnUs => "en-US",
            Self::EnAu => "en-AU",
        }
    }

    /// Meridiem marker for a 12-hour clock.
    pub fn meridiem(self, pm: bool) -> &'static str {
        match (self, pm) {
            (Self::EnUs, false) => "AM",
            (Self::EnUs, true) => "PM",
            (Self::EnAu, false) => "am",
            (Self::EnAu, true) => "pm",
        }
    }

    /// Long month name and numeric day in locale order.
    pub fn month_day(self, month_name: &str, day: u32) -> String {
        match self {
            Self::EnUs => format!("{month_name} {day}"),
            Self::EnAu => format!("{day} {month_name}"),
        }
    }
}

const HOUR: i32 = 3600;
const MIN: i32 = 60;

/// CLDR `en` short metazone names, keyed by tzdb letters and the UTC offset they apply at.
const EN_US_SHORT_NAMES: &[(&str, i32)] = &[
    ("EST", -5 * HOUR),
    ("EDT", -4 * HOUR),
    ("CST", -6 * HOUR),
    ("CDT", -5 * HOUR),
    ("MST", -7 * HOUR),
    ("MDT", -6 * HOUR),
    ("PST", -8 * HOUR),
    ("PDT", -7 * HOUR),
    ("AKST", -9 * HOUR),
    ("AKDT", -8 * HOUR),
    ("HST", -10 * HOUR),
    ("HDT", -9 * HOUR),
    ("AST", -4 * HOUR),
    ("ADT", -3 * HOUR),
    ("ChST", 10 * HOUR),
    ("GMT", 0),
    ("UTC", 0),
];

/// CLDR `en-AU` short metazone names.
const EN_AU_SHORT_NAMES: &[(&str, i32)] = &[
    ("AEST", 10 * HOUR),
    ("AEDT", 11 * HOUR),
    ("ACST", 9 * HOUR + 30 * MIN),
    ("ACDT", 10 * HOUR + 30 * MIN),
    ("AWST", 8 * HOUR),
    ("AWDT", 9 * HOUR),
    ("ACWST", 8 * HOUR + 45 * MIN),
    ("LHST", 10 * HOUR + 30 * MIN),
    ("LHDT", 11 * HOUR),
];

/// Australian zones whose tzdb abbreviation is numeric but which have an `en-AU` short name.
const EN_AU_NUMERIC_ZONES: &[(&str, i32, &str)] = &[
    ("Australia/Lord_Howe", 10 * HOUR + 30 * MIN, "LHST"),
    ("Australia/Lord_Howe", 11 * HOUR, "LHDT"),
    ("Australia/Eucla", 8 * HOUR + 45 * MIN, "ACWST"),
];

impl LocaleConvention {
    /// Short zone name the locale displays, or `None` when it falls back to a GMT offset.
    ///
    /// `tzdb_abbrev` must also sit at `utc_offset_secs`, so e.g. China's `CST` (+8) is not
    /// taken for US Central.
    pub fn short_zone_name(
        self,
        zone: &str,
        tzdb_abbrev: &str,
        utc_offset_secs: i32,
    ) -> Option<&'static str> {
        let table = match self {
            Self::EnUs => EN_US_SHORT_NAMES,
            Self::EnAu => EN_AU_SHORT_NAMES,
        };
        let by_letters = table
            .iter()
            .find(|(name, offset)| *name == tzdb_abbrev && *offset == utc_offset_secs)
            .map(|(name, _)| *name);
        if by_letters.is_some() || self != Self::EnAu {
            return by_letters;
        }
        EN_AU_NUMERIC_ZONES
            .iter()
            .find(|(z, offset, _)| *z == zone && *offset == utc_offset_secs)
            .map(|(_, _, name)| *name)
    }
}

/// Uppercase the first ` am ` / ` pm ` marker by literal substitution.
///
/// Markers not surrounded by spaces are left untouched.
pub fn normalize_meridiem(s: &str) -> String {
    s.replacen(" am ", " AM ", 1).replacen(" pm ", " PM ", 1)
}

#[cfg(test)]
#[path = "../../tests/unit/time/locale.rs"]
mod tests;
