//! Occurrence expansion.
//!
//! Turns a base event into the concrete occurrences that overlap a half-open
//! window. Expansion is a pure function of its inputs: no I/O, no shared
//! state, and it never fails for a rule that passed construction.

use cadence_domain::{CalendarEvent, InstanceException, Occurrence, TimeWindow};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::{debug, trace};

use super::candidates::CandidateDates;

/// Occurrences of `event` overlapping `[window_start, window_end)`, ordered
/// by effective start.
///
/// The candidate walk stops at the first of: a date past the rule's
/// `series_end`, `series_count` candidates generated (deleted days included),
/// a candidate starting at or after `window_end`, or a candidate whose end
/// is not representable. Deleted days are then dropped and modified days get
/// their overrides applied before the window test.
pub fn expand(
    event: &CalendarEvent,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<Occurrence> {
    if window_end <= window_start {
        return Vec::new();
    }

    let rule = &event.recurrence;
    let anchor_date = event.anchor_start.date_naive();
    let time_of_day = event.anchor_start.time();
    let series_end = rule.series_end();
    let series_count = rule.series_count();

    let mut generated: u32 = 0;
    let mut occurrences = Vec::new();

    for date in CandidateDates::new(rule, anchor_date) {
        if series_end.is_some_and(|end| date > end) {
            trace!(event_id = %event.id, %date, "series end reached");
            break;
        }
        if series_count.is_some_and(|count| generated >= count) {
            trace!(event_id = %event.id, generated, "series count reached");
            break;
        }
        let start = start_on(date, time_of_day);
        if start >= window_end {
            break;
        }
        let Some(generated_occurrence) = Occurrence::from_event(event, start) else {
            trace!(event_id = %event.id, %date, "occurrence end past calendar range");
            break;
        };
        generated += 1;

        if let Some(occurrence) = materialise(event, generated_occurrence) {
            if occurrence.overlaps(window_start, window_end) {
                occurrences.push(occurrence);
            }
        }
    }

    // Timing overrides can move an occurrence past its neighbours.
    occurrences.sort_by_key(|occurrence| occurrence.effective_start);

    debug!(
        event_id = %event.id,
        kind = %rule.kind(),
        generated,
        occurrences = occurrences.len(),
        "expanded event"
    );
    occurrences
}

/// [`expand`] over a [`TimeWindow`].
pub fn expand_window(event: &CalendarEvent, window: &TimeWindow) -> Vec<Occurrence> {
    expand(event, window.start, window.end)
}

/// Occurrences of every event in `window`, ordered by effective start and
/// then by source event id.
pub fn expand_all<'a, I>(events: I, window: &TimeWindow) -> Vec<Occurrence>
where
    I: IntoIterator<Item = &'a CalendarEvent>,
{
    let mut occurrences: Vec<Occurrence> =
        events.into_iter().flat_map(|event| expand_window(event, window)).collect();
    occurrences.sort_by(|a, b| {
        a.effective_start
            .cmp(&b.effective_start)
            .then_with(|| a.source_event_id.cmp(&b.source_event_id))
    });
    occurrences
}

fn start_on(date: NaiveDate, time_of_day: NaiveTime) -> DateTime<Utc> {
    date.and_time(time_of_day).and_utc()
}

/// `occurrence` after its day's exception, `None` when the day is deleted.
fn materialise(event: &CalendarEvent, occurrence: Occurrence) -> Option<Occurrence> {
    match event.exception(occurrence.instance_day) {
        Some(InstanceException::Deleted) => {
            trace!(event_id = %event.id, day = %occurrence.instance_day, "skipping deleted instance");
            None
        }
        Some(InstanceException::Modified(fields)) => Some(occurrence.apply_override(fields)),
        None => Some(occurrence),
    }
}

#[cfg(test)]
mod tests {
    use cadence_domain::{
        DayKey, EventColor, FieldOverride, MonthlyPosition, RecurrenceKind, RecurrenceRule,
        Weekday,
    };
    use chrono::{Datelike, Days, Duration, TimeZone};

    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn day(s: &str) -> DayKey {
        s.parse().unwrap()
    }

    fn starts(occurrences: &[Occurrence]) -> Vec<DateTime<Utc>> {
        occurrences.iter().map(|o| o.effective_start).collect()
    }

    fn daily(start: DateTime<Utc>) -> CalendarEvent {
        CalendarEvent::new("Daily", start, start + Duration::hours(1))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Daily).build().unwrap())
    }

    #[test]
    fn one_off_inside_and_outside_window() {
        let event = CalendarEvent::new("Dentist", at(2024, 3, 5, 9), at(2024, 3, 5, 10));

        assert_eq!(expand(&event, at(2024, 3, 1, 0), at(2024, 4, 1, 0)).len(), 1);
        assert!(expand(&event, at(2024, 4, 1, 0), at(2024, 5, 1, 0)).is_empty());
    }

    #[test]
    fn weekly_mon_wed_week_window() {
        // 2024-01-08 is a Monday
        let rule = RecurrenceRule::builder(RecurrenceKind::Weekly)
            .weekdays([Weekday::Monday, Weekday::Wednesday])
            .build()
            .unwrap();
        let event = CalendarEvent::new("Standup", at(2024, 1, 8, 9), at(2024, 1, 8, 10))
            .with_recurrence(rule);

        let occurrences = expand(&event, at(2024, 1, 8, 0), at(2024, 1, 15, 0));
        assert_eq!(starts(&occurrences), vec![at(2024, 1, 8, 9), at(2024, 1, 10, 9)]);
    }

    #[test]
    fn monthly_on_31st_skips_short_months() {
        let event = CalendarEvent::new("Close books", at(2024, 1, 31, 9), at(2024, 1, 31, 10))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Monthly).build().unwrap());

        let occurrences = expand(&event, at(2024, 1, 1, 0), at(2024, 5, 1, 0));
        assert_eq!(starts(&occurrences), vec![at(2024, 1, 31, 9), at(2024, 3, 31, 9)]);
    }

    #[test]
    fn fourth_tuesday_in_four_tuesday_month() {
        // February 2023 has four Tuesdays, the fourth is the 28th
        let rule = RecurrenceRule::builder(RecurrenceKind::Monthly)
            .monthly_by_position(MonthlyPosition::Fourth, Weekday::Tuesday)
            .build()
            .unwrap();
        let event = CalendarEvent::new("Retro", at(2023, 1, 24, 15), at(2023, 1, 24, 16))
            .with_recurrence(rule);

        let occurrences = expand(&event, at(2023, 2, 1, 0), at(2023, 3, 1, 0));
        assert_eq!(starts(&occurrences), vec![at(2023, 2, 28, 15)]);
    }

    #[test]
    fn deleted_instance_still_counts_towards_series() {
        let rule = RecurrenceRule::builder(RecurrenceKind::Daily).count(3).build().unwrap();
        let mut event = CalendarEvent::new("Workshop", at(2024, 5, 1, 9), at(2024, 5, 1, 12))
            .with_recurrence(rule);
        event.delete_instance(day("2024-05-02"));

        let occurrences = expand(&event, at(2024, 4, 1, 0), at(2024, 7, 1, 0));
        assert_eq!(starts(&occurrences), vec![at(2024, 5, 1, 9), at(2024, 5, 3, 9)]);
    }

    #[test]
    fn title_override_keeps_timing() {
        let mut event = daily(at(2024, 6, 3, 9));
        event.modify_instance(day("2024-06-04"), FieldOverride::title("Offsite")).unwrap();

        let occurrences = expand(&event, at(2024, 6, 4, 0), at(2024, 6, 5, 0));
        assert_eq!(occurrences.len(), 1);
        assert_eq!(occurrences[0].title, "Offsite");
        assert_eq!(occurrences[0].effective_start, at(2024, 6, 4, 9));
        assert_eq!(occurrences[0].effective_end, at(2024, 6, 4, 10));
        assert!(occurrences[0].is_modified);
    }

    #[test]
    fn timing_override_reorders_output() {
        let mut event = daily(at(2024, 6, 3, 9));
        let moved = FieldOverride::timing(at(2024, 6, 5, 18), at(2024, 6, 5, 19));
        event.modify_instance(day("2024-06-04"), moved).unwrap();

        let occurrences = expand(&event, at(2024, 6, 3, 0), at(2024, 6, 6, 0));
        assert_eq!(
            starts(&occurrences),
            vec![at(2024, 6, 3, 9), at(2024, 6, 5, 9), at(2024, 6, 5, 18)]
        );
        assert_eq!(occurrences[2].instance_day, day("2024-06-04"));
    }

    #[test]
    fn timing_override_out_of_window_is_dropped() {
        let mut event = daily(at(2024, 6, 3, 9));
        let moved = FieldOverride::timing(at(2024, 6, 20, 9), at(2024, 6, 20, 10));
        event.modify_instance(day("2024-06-04"), moved).unwrap();

        let occurrences = expand(&event, at(2024, 6, 4, 0), at(2024, 6, 5, 0));
        assert!(occurrences.is_empty());
    }

    #[test]
    fn exceptions_apply_to_one_off_events() {
        let mut event = CalendarEvent::new("Lunch", at(2024, 2, 1, 12), at(2024, 2, 1, 13))
            .with_color(EventColor::Secondary);
        event
            .modify_instance(
                day("2024-02-01"),
                FieldOverride { color: Some(EventColor::Accent), ..FieldOverride::default() },
            )
            .unwrap();

        let occurrences = expand(&event, at(2024, 2, 1, 0), at(2024, 2, 2, 0));
        assert_eq!(occurrences[0].color, Some(EventColor::Accent));

        event.delete_instance(day("2024-02-01"));
        assert!(expand(&event, at(2024, 2, 1, 0), at(2024, 2, 2, 0)).is_empty());
    }

    #[test]
    fn window_boundaries_are_half_open() {
        let event = daily(at(2024, 6, 3, 9));

        // the 3rd ends exactly at the window start, the 4th starts exactly at its end
        assert!(expand(&event, at(2024, 6, 3, 10), at(2024, 6, 4, 9)).is_empty());
        // starts exactly at window start
        let hit = expand(&event, at(2024, 6, 4, 9), at(2024, 6, 4, 10));
        assert_eq!(starts(&hit), vec![at(2024, 6, 4, 9)]);
    }

    #[test]
    fn zero_duration_occurrence_is_an_instant() {
        let event = CalendarEvent::new("Reminder", at(2024, 6, 3, 9), at(2024, 6, 3, 9))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Daily).build().unwrap());

        let hits = expand(&event, at(2024, 6, 4, 9), at(2024, 6, 5, 9));
        assert_eq!(starts(&hits), vec![at(2024, 6, 4, 9)]);
    }

    #[test]
    fn series_end_is_inclusive_of_its_day() {
        let rule = RecurrenceRule::builder(RecurrenceKind::Daily)
            .until(NaiveDate::from_ymd_opt(2024, 6, 5).unwrap())
            .build()
            .unwrap();
        let event = CalendarEvent::new("Sprint", at(2024, 6, 3, 9), at(2024, 6, 3, 10))
            .with_recurrence(rule);

        let occurrences = expand(&event, at(2024, 6, 1, 0), at(2024, 7, 1, 0));
        assert_eq!(occurrences.len(), 3);
        assert_eq!(occurrences[2].effective_start, at(2024, 6, 5, 9));
    }

    #[test]
    fn open_series_stops_at_window_end() {
        let event = daily(at(2000, 1, 1, 9));
        let occurrences = expand(&event, at(2024, 6, 1, 0), at(2024, 6, 8, 0));
        assert_eq!(occurrences.len(), 7);
    }

    #[test]
    fn count_reached_before_series_end() {
        let rule = RecurrenceRule::builder(RecurrenceKind::Daily)
            .until(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
            .count(3)
            .build()
            .unwrap();
        let event = CalendarEvent::new("Onboarding", at(2024, 6, 3, 9), at(2024, 6, 3, 10))
            .with_recurrence(rule);

        let occurrences = expand(&event, at(2024, 6, 1, 0), at(2024, 8, 1, 0));
        assert_eq!(
            starts(&occurrences),
            vec![at(2024, 6, 3, 9), at(2024, 6, 4, 9), at(2024, 6, 5, 9)]
        );
    }

    #[test]
    fn series_end_reached_before_count() {
        let rule = RecurrenceRule::builder(RecurrenceKind::Weekly)
            .until(NaiveDate::from_ymd_opt(2024, 6, 17).unwrap())
            .count(10)
            .build()
            .unwrap();
        let event = CalendarEvent::new("Planning", at(2024, 6, 3, 9), at(2024, 6, 3, 10))
            .with_recurrence(rule);

        let occurrences = expand(&event, at(2024, 6, 1, 0), at(2025, 1, 1, 0));
        assert_eq!(
            starts(&occurrences),
            vec![at(2024, 6, 3, 9), at(2024, 6, 10, 9), at(2024, 6, 17, 9)]
        );
    }

    #[test]
    fn open_series_with_unbounded_window_terminates() {
        let event = CalendarEvent::new("Year end", at(2024, 12, 31, 23), at(2025, 1, 1, 1))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Yearly).build().unwrap());

        let occurrences = expand(&event, at(2024, 1, 1, 0), DateTime::<Utc>::MAX_UTC);
        assert_eq!(occurrences[0].effective_start, at(2024, 12, 31, 23));
        // the last year's instance would end past the calendar range
        let last = occurrences.last().unwrap();
        assert_eq!(last.effective_start.year(), DateTime::<Utc>::MAX_UTC.year() - 1);
        assert!(occurrences.iter().all(|o| o.effective_end > o.effective_start));
    }

    #[test]
    fn daily_series_near_calendar_maximum() {
        let anchor = NaiveDate::MAX
            .checked_sub_days(Days::new(10))
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
            .and_utc();
        let event = CalendarEvent::new("Late shift", anchor, anchor + Duration::hours(3))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Daily).build().unwrap());

        let occurrences = expand(&event, anchor, DateTime::<Utc>::MAX_UTC);
        assert_eq!(occurrences.len(), 10);
        assert_eq!(occurrences[9].effective_end.date_naive(), NaiveDate::MAX);
    }

    #[test]
    fn empty_or_inverted_window_yields_nothing() {
        let event = daily(at(2024, 6, 3, 9));
        assert!(expand(&event, at(2024, 6, 4, 0), at(2024, 6, 4, 0)).is_empty());
        assert!(expand(&event, at(2024, 6, 5, 0), at(2024, 6, 4, 0)).is_empty());
    }

    #[test]
    fn expansion_is_idempotent() {
        let mut event = daily(at(2024, 6, 3, 9));
        event.delete_instance(day("2024-06-05"));
        let window = TimeWindow::new(at(2024, 6, 1, 0), at(2024, 7, 1, 0));

        assert_eq!(expand_window(&event, &window), expand_window(&event, &window));
    }

    #[test]
    fn multi_day_occurrence_overlapping_window_start() {
        let event = CalendarEvent::new("Conference", at(2024, 6, 3, 9), at(2024, 6, 5, 17))
            .with_recurrence(RecurrenceRule::builder(RecurrenceKind::Weekly).build().unwrap());

        let occurrences = expand(&event, at(2024, 6, 4, 0), at(2024, 6, 5, 0));
        assert_eq!(starts(&occurrences), vec![at(2024, 6, 3, 9)]);
    }

    #[test]
    fn expand_all_merges_by_start_then_id() {
        let first = daily(at(2024, 6, 3, 9));
        let second = CalendarEvent::new("Gym", at(2024, 6, 3, 7), at(2024, 6, 3, 8));
        let window = TimeWindow::new(at(2024, 6, 3, 0), at(2024, 6, 5, 0));

        let merged = expand_all([&first, &second], &window);
        assert_eq!(
            starts(&merged),
            vec![at(2024, 6, 3, 7), at(2024, 6, 3, 9), at(2024, 6, 4, 9)]
        );
    }
}
