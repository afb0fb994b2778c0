use chrono::{Datelike, TimeZone, Timelike, Utc};

use super::*;

#[test]
fn literal_numbers_are_utc() {
    let m = EventMoment::parse("2024-06-15", "18:30");
    assert_eq!(
        m.instant().unwrap(),
        Utc.with_ymd_and_hms(2024, 6, 15, 18, 30, 0).unwrap()
    );
    assert!(m.is_valid());
}

#[test]
fn empty_inputs_are_invalid() {
    assert_eq!(EventMoment::parse("", ""), EventMoment::Invalid);
    assert_eq!(EventMoment::parse("2024-06-15", ""), EventMoment::Invalid);
    assert_eq!(EventMoment::parse("", "18:30"), EventMoment::Invalid);
}

#[test]
fn missing_or_non_numeric_components_are_invalid() {
    assert_eq!(EventMoment::parse("2024-06", "18:30"), EventMoment::Invalid);
    assert_eq!(EventMoment::parse("2024-06-15", "18"), EventMoment::Invalid);
    assert_eq!(EventMoment::parse("abcd-06-15", "18:30"), EventMoment::Invalid);
    assert_eq!(EventMoment::parse("2024-06-15", "xx:30"), EventMoment::Invalid);
}

#[test]
fn leading_integer_prefix_is_accepted() {
    let m = EventMoment::parse("2024-06-15T", "18:30:59");
    let dt = m.instant().unwrap();
    assert_eq!((dt.day(), dt.hour(), dt.minute()), (15, 18, 30));
}

#[test]
fn out_of_range_components_carry_over() {
    let dt = EventMoment::parse("2024-13-01", "00:00").instant().unwrap();
    assert_eq!((dt.year(), dt.month(), dt.day()), (2025, 1, 1));

    let dt = EventMoment::parse("2024-02-30", "24:00").instant().unwrap();
    assert_eq!((dt.month(), dt.day(), dt.hour()), (3, 2, 0));

    let dt = EventMoment::parse("2024-06-15", "18:75").instant().unwrap();
    assert_eq!((dt.hour(), dt.minute()), (19, 15));
}

#[test]
fn two_digit_years_land_in_the_nineteen_hundreds() {
    let dt = EventMoment::parse("99-01-01", "00:00").instant().unwrap();
    assert_eq!(dt.year(), 1999);
}
