//! Statutory deadline calculation.
//!
//! Given a triggering date, a period, and an explicit counting convention,
//! compute the deadline, stack capped extensions on top of it, check an
//! action date against it, and explain the result in plain text.
//!
//! ```rust
//! use legal_deadline::prelude::*;
//!
//! let calendar = load_calendar(
//!     ["2025-03-10".parse().unwrap()],
//!     WeekendRule::SaturdaySunday,
//! ).unwrap();
//!
//! let result = calculate_deadline(
//!     "2025-03-07".parse().unwrap(),
//!     5,
//!     DayCountMethod::BusinessDays,
//!     &[ExtensionSpec::new(60, 45, 150)],
//!     &calendar,
//! ).unwrap();
//!
//! assert_eq!(result.base_date().to_string(), "2025-03-17");
//! assert_eq!(result.computed_date().to_string(), "2025-05-01");
//!
//! let verdict = validate_compliance(&result, "2025-05-02".parse().unwrap());
//! assert!(!verdict.is_compliant);
//! ```
//!
//! All calculations are pure. A [`HolidayCalendar`] is immutable after
//! construction and can be shared across threads without locking.

mod calendar;
mod compliance;
mod consts;
mod counter;
mod date;
mod deadline;
mod explain;
mod extension;
pub mod prelude;

pub use calendar::{CalendarConfig, CalendarError, HolidayCalendar, WeekendRule};
pub use compliance::{ValidationResult, validate};
pub use consts::*;
pub use counter::{DayCountMethod, add_days, count_between, sub_days};
pub use date::{CalendarDate, DateError, Weekday, days_in_month, is_leap_year};
pub use deadline::{DeadlineError, DeadlineRequest, DeadlineResult, Direction, calculate};
pub use explain::{explain, explain_validation, explain_with_event};
pub use extension::{AppliedExtension, CapReason, ExtensionSpec, apply_chain};

/// Builds a holiday calendar from explicit dates.
///
/// # Errors
/// Returns `CalendarError::InvalidSource` for duplicate dates or a weekend
/// rule that covers the whole week.
pub fn load_calendar(
    holiday_dates: impl IntoIterator<Item = CalendarDate>,
    weekend_rule: WeekendRule,
) -> Result<HolidayCalendar, CalendarError> {
    HolidayCalendar::new(holiday_dates, weekend_rule)
}

/// Computes a forward deadline from its parts.
///
/// # Errors
/// See [`calculate`].
pub fn calculate_deadline(
    triggering_date: CalendarDate,
    count: u32,
    method: DayCountMethod,
    extensions: &[ExtensionSpec],
    calendar: &HolidayCalendar,
) -> Result<DeadlineResult, DeadlineError> {
    let request = DeadlineRequest::new(triggering_date, count, method)
        .with_extensions(extensions.iter().copied());
    calculate(&request, calendar)
}

/// Checks an action date against a computed deadline.
pub fn validate_compliance(
    result: &DeadlineResult,
    proposed_date: CalendarDate,
) -> ValidationResult {
    validate(result, proposed_date)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn court_calendar() -> HolidayCalendar {
        HolidayCalendar::from_toml_str(
            r#"
            name = "District court"
            holidays = ["2025-05-26", "2025-07-04", "2025-09-01"]
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_end_to_end_response_deadline() {
        let calendar = court_calendar();
        let request = DeadlineRequest::new(date("2025-05-19"), 10, DayCountMethod::BusinessDays)
            .with_triggering_event("Motion served")
            .with_extension(ExtensionSpec::new(45, 45, 150));

        let result = calculate(&request, &calendar).unwrap();
        // Mon 19 + 10 working days, skipping Memorial Day on the 26th
        assert_eq!(result.base_date(), date("2025-06-03"));
        assert_eq!(result.computed_date(), date("2025-07-18"));

        let on_time = validate_compliance(&result, date("2025-07-18"));
        assert!(on_time.is_compliant);
        assert_eq!(on_time.days_over_or_under, 0);

        let late = validate_compliance(&result, date("2025-07-19"));
        assert!(!late.is_compliant);
        assert_eq!(late.days_over_or_under, 1);

        let text = explain_with_event(
            request.triggering_event.as_deref().unwrap_or_default(),
            &result,
        );
        assert!(text.starts_with("Triggering event: Motion served\n"), "{text}");
        assert!(text.ends_with("Computed deadline: 2025-07-18"), "{text}");
    }

    #[test]
    fn test_calculate_deadline_matches_request_form() {
        let calendar = court_calendar();
        let extensions = [ExtensionSpec::new(30, 45, 60), ExtensionSpec::new(45, 45, 60)];
        let direct = calculate_deadline(
            date("2025-08-25"),
            7,
            DayCountMethod::BusinessDays,
            &extensions,
            &calendar,
        )
        .unwrap();
        let request = DeadlineRequest::new(date("2025-08-25"), 7, DayCountMethod::BusinessDays)
            .with_extensions(extensions);
        assert_eq!(direct, calculate(&request, &calendar).unwrap());
        assert_eq!(direct.total_extension_days(), 60);
    }

    #[test]
    fn test_load_calendar_rejects_duplicates() {
        let result = load_calendar(
            [date("2025-07-04"), date("2025-07-04")],
            WeekendRule::SaturdaySunday,
        );
        assert!(matches!(result, Err(CalendarError::InvalidSource(_))));
    }

    #[test]
    fn test_shared_calendar_across_threads() {
        let calendar = Arc::new(court_calendar());
        let expected: Vec<_> = (0..8)
            .map(|n| {
                let request =
                    DeadlineRequest::new(date("2025-05-01"), n * 5, DayCountMethod::BusinessDays);
                calculate(&request, &calendar).unwrap()
            })
            .collect();

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|n| {
                    let calendar = Arc::clone(&calendar);
                    scope.spawn(move || {
                        let request = DeadlineRequest::new(
                            date("2025-05-01"),
                            n * 5,
                            DayCountMethod::BusinessDays,
                        );
                        calculate(&request, &calendar).unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results, expected);
    }

    #[test]
    fn test_result_round_trip_through_json() {
        let calendar = court_calendar();
        let request = DeadlineRequest::new(date("2025-06-27"), 21, DayCountMethod::CalendarDays)
            .with_extensions([ExtensionSpec::new(60, 45, 60), ExtensionSpec::new(30, 45, 60)]);
        let result = calculate(&request, &calendar).unwrap();

        let json = serde_json::to_string_pretty(&result).unwrap();
        let parsed: DeadlineResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
        assert_eq!(explain(&parsed), explain(&result));
    }
}
