//! Candidate start dates of a recurrence rule.
//!
//! The walk is organised in periods: one period is `interval` days, weeks,
//! months or years depending on the rule kind. Each period contributes zero
//! or more dates (zero when the month lacks the anchor's day, for instance),
//! and periods are visited in order, so the produced sequence is strictly
//! increasing.

use std::collections::VecDeque;

use cadence_domain::{MonthlyMode, RecurrenceKind, RecurrenceRule};
use chrono::{Datelike, Days, Months, NaiveDate};

use super::nth_weekday::nth_weekday_of_month;

/// Iterator over the candidate dates of `rule` anchored at `anchor`.
///
/// Bounds (`series_end`, `series_count`, the query window) are applied by the
/// caller; on its own the iterator only ends when the calendar overflows or
/// the rule is non-recurring.
#[derive(Debug, Clone)]
pub struct CandidateDates<'a> {
    rule: &'a RecurrenceRule,
    anchor: NaiveDate,
    period: u32,
    pending: VecDeque<NaiveDate>,
    exhausted: bool,
}

/// Outcome of resolving one period.
enum Period {
    Dates(Vec<NaiveDate>),
    Overflow,
}

impl<'a> CandidateDates<'a> {
    /// Walk `rule` starting from the period that contains `anchor`.
    pub fn new(rule: &'a RecurrenceRule, anchor: NaiveDate) -> Self {
        Self { rule, anchor, period: 0, pending: VecDeque::new(), exhausted: false }
    }

    /// Offset of the current period in rule units, `None` on overflow.
    fn offset(&self) -> Option<u32> {
        self.period.checked_mul(self.rule.interval())
    }

    fn resolve_period(&self) -> Period {
        let Some(offset) = self.offset() else {
            return Period::Overflow;
        };

        let dates = match self.rule.kind() {
            RecurrenceKind::None => {
                if self.period > 0 {
                    return Period::Overflow;
                }
                vec![self.anchor]
            }
            RecurrenceKind::Daily | RecurrenceKind::Custom => {
                match self.anchor.checked_add_days(Days::new(u64::from(offset))) {
                    Some(date) => vec![date],
                    None => return Period::Overflow,
                }
            }
            RecurrenceKind::Weekly => match self.weekly_dates(offset) {
                Some(dates) => dates,
                None => return Period::Overflow,
            },
            RecurrenceKind::Monthly => match self.monthly_date(offset) {
                Some(date) => date.into_iter().collect(),
                None => return Period::Overflow,
            },
            RecurrenceKind::Yearly => match self.yearly_date(offset) {
                Some(date) => date.into_iter().collect(),
                None => return Period::Overflow,
            },
        };

        Period::Dates(dates)
    }

    /// Dates of the `offset`-th week block.
    ///
    /// Without a weekday selection this is the anchor's weekday, `offset`
    /// weeks on. With a selection, every selected weekday of the
    /// Monday-based week `offset` weeks after the anchor's week, skipping
    /// days before the anchor.
    fn weekly_dates(&self, offset: u32) -> Option<Vec<NaiveDate>> {
        let shift = Days::new(u64::from(offset) * 7);
        if self.rule.weekdays().is_empty() {
            return self.anchor.checked_add_days(shift).map(|date| vec![date]);
        }

        let anchor_monday = self
            .anchor
            .checked_sub_days(Days::new(u64::from(self.anchor.weekday().num_days_from_monday())))?;
        let block_start = anchor_monday.checked_add_days(shift)?;

        let mut dates = Vec::with_capacity(self.rule.weekdays().len());
        for weekday in self.rule.weekdays() {
            let date = block_start.checked_add_days(Days::new(u64::from(weekday.days_from_monday())))?;
            if date >= self.anchor {
                dates.push(date);
            }
        }
        Some(dates)
    }

    /// The date in the month `offset` months after the anchor's, if the month
    /// has one. The outer `None` signals overflow.
    fn monthly_date(&self, offset: u32) -> Option<Option<NaiveDate>> {
        let month_start = self.anchor.with_day(1)?.checked_add_months(Months::new(offset))?;

        let date = match (self.rule.monthly_mode(), self.rule.weekday_position()) {
            (MonthlyMode::ByWeekdayPosition, Some((position, weekday))) => {
                nth_weekday_of_month(month_start.year(), month_start.month(), weekday, position)
                    .filter(|date| *date >= self.anchor)
            }
            _ => month_start.with_day(self.anchor.day()),
        };
        Some(date)
    }

    /// The anchor's month and day, `offset` years on. Years without that day
    /// (Feb 29) yield no date.
    fn yearly_date(&self, offset: u32) -> Option<Option<NaiveDate>> {
        let year = self.anchor.year().checked_add(i32::try_from(offset).ok()?)?;
        NaiveDate::from_ymd_opt(year, 1, 1)?;
        Some(NaiveDate::from_ymd_opt(year, self.anchor.month(), self.anchor.day()))
    }
}

impl Iterator for CandidateDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(date) = self.pending.pop_front() {
                return Some(date);
            }
            if self.exhausted {
                return None;
            }

            match self.resolve_period() {
                Period::Dates(dates) => self.pending.extend(dates),
                Period::Overflow => self.exhausted = true,
            }
            match self.period.checked_add(1) {
                Some(next) => self.period = next,
                None => self.exhausted = true,
            }
        }
    }
}
