//! Birth-date parsing and age estimation.
//!
//! VK exposes birth dates as `D.M.YYYY`, or `D.M` when the user hides the
//! year. Only the full form carries enough information for an age.

use chrono::{Datelike, NaiveDate};

/// Parses a `D.M.YYYY` birth date.
///
/// Returns `None` unless the input is exactly three dot-separated integers
/// forming a real calendar date (`31.02.1990` and `99.99.9999` are rejected).
#[must_use]
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('.');
    let day = parts.next()?.parse::<u32>().ok()?;
    let month = parts.next()?.parse::<u32>().ok()?;
    let year = parts.next()?.parse::<i32>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Estimates the age in whole years on `today`.
///
/// Returns `None` for an absent, partial (`D.M`), or malformed birth date,
/// and for birth dates after `today`.
#[must_use]
pub fn estimate_age(bdate: Option<&str>, today: NaiveDate) -> Option<u32> {
    let birth = parse_birth_date(bdate?)?;
    if birth > today {
        return None;
    }
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}
