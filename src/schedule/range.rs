use chrono::{Duration, NaiveDate, Weekday};

use crate::core::types::{TimeRange, ViewMode};
use crate::extensions::chrono::NaiveDateExt;

/// Fixed week-start convention for the week view.
pub const WEEK_START: Weekday = Weekday::Sun;

/// The agenda view is a sliding window, not a calendar bucket. The asymmetry
/// (one week back, thirty days forward) is inherited behavior.
const AGENDA_DAYS_BACK: i64 = 7;
const AGENDA_DAYS_FORWARD: i64 = 30;

/// Map a reference date and view mode to the half-open `[from, to)` interval
/// the agenda fetch should cover. Every bound is midnight-aligned in the
/// display zone, and `to > from` holds for any input.
pub fn compute_range(reference: NaiveDate, view: ViewMode) -> TimeRange {
    match view {
        ViewMode::Day => {
            let from = reference.at_midnight();
            TimeRange {
                from,
                to: from + Duration::days(1),
            }
        }
        ViewMode::Week => {
            let from = reference.start_of_week(WEEK_START).at_midnight();
            TimeRange {
                from,
                to: from + Duration::days(7),
            }
        }
        ViewMode::Month => TimeRange {
            from: reference.first_of_month().at_midnight(),
            to: reference.first_of_next_month().at_midnight(),
        },
        ViewMode::Agenda => TimeRange {
            from: (reference - Duration::days(AGENDA_DAYS_BACK)).at_midnight(),
            to: (reference + Duration::days(AGENDA_DAYS_FORWARD)).at_midnight(),
        },
    }
}

/// Ordered list of the calendar days a range touches, for per-day rendering.
pub fn days_in(range: &TimeRange) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut day = range.from.date();
    let last = (range.to - Duration::seconds(1)).date();
    while day <= last {
        days.push(day);
        day += Duration::days(1);
    }
    days
}
