//! Recurrence expansion engine

pub mod candidates;
pub mod expander;
pub mod nth_weekday;

pub use candidates::CandidateDates;
pub use expander::{expand, expand_all, expand_window};
pub use nth_weekday::{days_in_month, nth_weekday_of_month};
