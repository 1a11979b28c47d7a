//! Day-counting conventions over a [`HolidayCalendar`].
//!
//! Every convention counts units strictly after (or, going backward,
//! strictly before) the start date. A zero count is therefore not an
//! identity for every method:
//!
//! | method          | `count = 0` forward | `count = 0` backward |
//! |-----------------|---------------------|----------------------|
//! | `BusinessDays`  | `start`             | `start`              |
//! | `CalendarDays`  | `start`             | `start`              |
//! | `ClearDays`     | `start + 1`         | `start - 1`          |

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, HolidayCalendar};

/// How the days of a period are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum DayCountMethod {
    /// Working days only; weekends and holidays are skipped.
    #[display(fmt = "business days")]
    BusinessDays,
    /// Every day counts.
    #[display(fmt = "calendar days")]
    CalendarDays,
    /// Full days strictly between the start date and the result.
    #[display(fmt = "clear days")]
    ClearDays,
}

/// Counts `count` units forward from `start`.
///
/// Returns `None` if the result would fall after 9999-12-31. Never returns a
/// date earlier than `start`.
pub fn add_days(
    start: CalendarDate,
    count: u32,
    method: DayCountMethod,
    calendar: &HolidayCalendar,
) -> Option<CalendarDate> {
    match method {
        DayCountMethod::CalendarDays => start.checked_add_days(u64::from(count)),
        DayCountMethod::ClearDays => start.checked_add_days(u64::from(count) + 1),
        DayCountMethod::BusinessDays => {
            // Each working day needs at least one calendar day
            start.checked_add_days(u64::from(count))?;
            walk_working_days(start, count, calendar, CalendarDate::succ)
        },
    }
}

/// Counts `count` units backward from `start`.
///
/// The mirror of [`add_days`]: `ClearDays` leaves exactly `count` full days
/// between the result and `start`, which is how "at least N clear days'
/// notice" is computed. Never returns a date later than `start`.
pub fn sub_days(
    start: CalendarDate,
    count: u32,
    method: DayCountMethod,
    calendar: &HolidayCalendar,
) -> Option<CalendarDate> {
    match method {
        DayCountMethod::CalendarDays => start.checked_sub_days(u64::from(count)),
        DayCountMethod::ClearDays => start.checked_sub_days(u64::from(count) + 1),
        DayCountMethod::BusinessDays => {
            start.checked_sub_days(u64::from(count))?;
            walk_working_days(start, count, calendar, CalendarDate::pred)
        },
    }
}

/// Number of units `method` counts between `start` and `end`.
///
/// `BusinessDays` counts working days in `(start, end]`, `CalendarDays` the
/// plain difference, `ClearDays` the days strictly between. Zero when
/// `end <= start`; saturates at `u32::MAX`.
pub fn count_between(
    start: CalendarDate,
    end: CalendarDate,
    method: DayCountMethod,
    calendar: &HolidayCalendar,
) -> u32 {
    if end <= start {
        return 0;
    }
    let span = start.days_until(end);
    let units = match method {
        DayCountMethod::CalendarDays => span,
        DayCountMethod::ClearDays => span - 1,
        DayCountMethod::BusinessDays => {
            let mut working = 0_i64;
            let mut current = start;
            while let Some(next) = current.succ().filter(|next| *next <= end) {
                if calendar.is_working_day(next) {
                    working += 1;
                }
                current = next;
            }
            working
        },
    };
    u32::try_from(units).unwrap_or(u32::MAX)
}

fn walk_working_days(
    start: CalendarDate,
    count: u32,
    calendar: &HolidayCalendar,
    step: fn(CalendarDate) -> Option<CalendarDate>,
) -> Option<CalendarDate> {
    let mut current = start;
    let mut remaining = count;
    while remaining > 0 {
        current = step(current)?;
        if calendar.is_working_day(current) {
            remaining -= 1;
        }
    }
    Some(current)
}
