//! Ordinal-weekday resolution ("second Tuesday", "last Friday").

use cadence_domain::{MonthlyPosition, Weekday};
use chrono::{Datelike, NaiveDate};

/// Number of days in `month` of `year`, or `None` for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Date of the `position`-th `weekday` in the given month.
///
/// `Last` scans backwards from the month's final day; the other positions
/// count matches forward from the 1st. Returns `None` when the month has
/// fewer matches than requested (or the month itself is invalid), meaning
/// "no occurrence this month".
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    position: MonthlyPosition,
) -> Option<NaiveDate> {
    let length = days_in_month(year, month)?;
    let target: chrono::Weekday = weekday.into();
    let matching = |day: &u32| {
        NaiveDate::from_ymd_opt(year, month, *day).filter(|date| date.weekday() == target)
    };

    match position.index() {
        None => (1..=length).rev().find_map(|day| matching(&day)),
        Some(index) => (1..=length).filter_map(|day| matching(&day)).nth(index),
    }
}
