//! Domain types and models

pub mod day_key;
pub mod event;
pub mod occurrence;
pub mod recurrence;
pub mod tags;
pub mod window;

pub use day_key::DayKey;
pub use event::{CalendarEvent, CalendarRef, FieldOverride, InstanceException};
pub use occurrence::Occurrence;
pub use recurrence::{RecurrenceRule, RecurrenceRuleBuilder, RawRecurrenceRule};
pub use tags::{EventColor, MonthlyMode, MonthlyPosition, RecurrenceKind, Weekday};
pub use window::{overlaps, CalendarView, TimeWindow};
