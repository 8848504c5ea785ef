//! Half-open query windows and the calendar views built on them.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::tags::Weekday;
use crate::impl_domain_tag_conversions;

/// Half-open interval overlap, `[start, end)` against `[window_start,
/// window_end)`.
///
/// A zero-length interval is treated as an instant and overlaps when it lies
/// inside the window, so `window_start` itself counts and `window_end` does
/// not.
pub fn overlaps(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> bool {
    if start == end {
        return window_start <= start && start < window_end;
    }
    start < window_end && end > window_start
}

/// A half-open time range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// First instant inside the window.
    pub start: DateTime<Utc>,
    /// First instant past the window.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window `[start, end)`. Inverted bounds make an empty window.
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Whole days `[first 00:00, last + 1 00:00)`.
    ///
    /// On the last representable day the end saturates to the last instant.
    pub fn days(first: NaiveDate, last_inclusive: NaiveDate) -> Self {
        let end = last_inclusive.succ_opt().map_or(DateTime::<Utc>::MAX_UTC, midnight);
        Self { start: midnight(first), end }
    }

    /// A window that no interval can overlap.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `instant` lies inside the window.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Whether `[start, end)` overlaps the window, see [`overlaps`].
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        overlaps(start, end, self.start, self.end)
    }

    /// Window shown by `view` around `date`.
    ///
    /// Month views cover the full grid: from the first day of the week that
    /// contains the 1st through the last day of the week that contains the
    /// month's last day.
    pub fn for_view(view: CalendarView, date: NaiveDate, week_starts_on: Weekday) -> Self {
        match view {
            CalendarView::Day => Self::days(date, date),
            CalendarView::Week => {
                let first = start_of_week(date, week_starts_on);
                Self::days(first, end_of_week(first))
            }
            CalendarView::Month => {
                let month_start = date.with_day(1).unwrap_or(date);
                let month_end = last_day_of_month(month_start);
                let first = start_of_week(month_start, week_starts_on);
                let last = end_of_week(start_of_week(month_end, week_starts_on));
                Self::days(first, last)
            }
        }
    }
}

/// Calendar layouts a window can be derived for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarView {
    Day,
    Week,
    Month,
}

impl_domain_tag_conversions!(CalendarView {
    Day => "day",
    Week => "week",
    Month => "month",
});

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn start_of_week(date: NaiveDate, week_starts_on: Weekday) -> NaiveDate {
    let offset = (7 + Weekday::from(date.weekday()).days_from_monday()
        - week_starts_on.days_from_monday())
        % 7;
    date.checked_sub_days(Days::new(u64::from(offset))).unwrap_or(NaiveDate::MIN)
}

fn end_of_week(week_start: NaiveDate) -> NaiveDate {
    week_start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX)
}

fn last_day_of_month(month_start: NaiveDate) -> NaiveDate {
    let (year, month) = if month_start.month() == 12 {
        (month_start.year() + 1, 1)
    } else {
        (month_start.year(), month_start.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
