//! Calendar helpers shared by the metrics engine and the inspection scheduler
//!
//! Dates reach us in two shapes: ISO `YYYY-MM-DD` from settings forms and
//! `DD/MM/YYYY` from spreadsheet exports. Both parse into `NaiveDate`.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer};

/// Parse a `YYYY-MM-DD` or `DD/MM/YYYY` date (`/`, `-` and `.` separators).
///
/// A trailing time component separated by whitespace is ignored.
/// Returns `None` for anything that is not a real calendar date.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let head = s.split_whitespace().next()?;
    let parts: Vec<u32> = head
        .split(['/', '-', '.'])
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .ok()?;

    if parts.len() != 3 {
        return None;
    }

    let (year, month, day) = if parts[0] > 1000 {
        (parts[0], parts[1], parts[2])
    } else {
        (parts[2], parts[1], parts[0])
    };

    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
}

/// Whole days from `today` until `target` (negative once `target` has passed)
pub fn days_remaining(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Shift a date by a signed number of calendar months.
///
/// Day-of-month is clamped to the end of shorter months (Jan 31 + 1 = Feb 28/29).
pub fn add_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Number of whole calendar months elapsed from `from` to `to`.
///
/// `add_months(from, n) <= to` holds for the returned `n` and fails for `n + 1`.
/// Negative when `to` precedes `from`.
pub fn whole_months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let mut months = (i64::from(to.year()) - i64::from(from.year())) * 12
        + i64::from(to.month())
        - i64::from(from.month());

    if add_months(from, months).is_some_and(|d| d > to) {
        months -= 1;
    }
    months
}

/// Serde adapter for record dates in either accepted format
pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}

/// Serde adapter for optional dates; unparseable values become `None`
pub(crate) fn deserialize_lenient_date<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(|s| {
        let parsed = parse_date(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::warn!("Ignoring unparseable date: {}", s);
        }
        parsed
    }))
}
