//! Plain-text justifications for computed deadlines.
//!
//! Output depends only on its input: no locale, clock, or environment.

use crate::{AppliedExtension, DeadlineResult, Direction, ValidationResult};

/// Describes how `result` was reached, one fact per line.
pub fn explain(result: &DeadlineResult) -> String {
    let mut lines = Vec::with_capacity(result.extensions_applied().len() + 4);

    let direction = match result.direction() {
        Direction::Forward => "",
        Direction::Backward => ", counted backward",
    };
    lines.push(format!("Method: {}{direction}", result.method()));
    lines.push(format!("Base deadline: {}", result.base_date()));

    for (position, extension) in result.extensions_applied().iter().enumerate() {
        lines.push(describe_extension(position + 1, extension));
    }
    if !result.extensions_applied().is_empty() {
        lines.push(format!(
            "Total extension: {}",
            days(result.total_extension_days())
        ));
    }

    lines.push(format!("Computed deadline: {}", result.computed_date()));
    lines.join("\n")
}

/// Same as [`explain`], preceded by the event that started the clock.
pub fn explain_with_event(triggering_event: &str, result: &DeadlineResult) -> String {
    format!("Triggering event: {triggering_event}\n{}", explain(result))
}

/// One-line verdict for a compliance check.
pub fn explain_validation(validation: &ValidationResult) -> String {
    let ValidationResult {
        is_compliant,
        proposed_date,
        deadline,
        days_over_or_under,
    } = *validation;

    if !is_compliant {
        format!(
            "Not compliant: {proposed_date} is {} after the deadline of {deadline}",
            days(days_over_or_under.unsigned_abs())
        )
    } else if days_over_or_under == 0 {
        format!("Compliant: {proposed_date} falls on the deadline of {deadline}")
    } else {
        format!(
            "Compliant: {proposed_date} is {} before the deadline of {deadline}",
            days(days_over_or_under.unsigned_abs())
        )
    }
}

fn describe_extension(position: usize, extension: &AppliedExtension) -> String {
    let base = format!(
        "Extension {position}: granted {} of {} requested {}",
        extension.granted_days,
        extension.requested_days,
        unit(extension.requested_days)
    );
    match extension.reason_if_capped {
        Some(reason) => format!("{base} (capped by {reason})"),
        None => base,
    }
}

const fn unit(count: u32) -> &'static str {
    if count == 1 { "day" } else { "days" }
}

fn days(count: u32) -> String {
    format!("{count} {}", unit(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CalendarDate, DayCountMethod, DeadlineRequest, ExtensionSpec, HolidayCalendar, calculate,
        validate,
    };

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_explain_without_extensions() {
        let request = DeadlineRequest::new(date("2025-03-07"), 5, DayCountMethod::BusinessDays);
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();

        assert_eq!(
            explain(&result),
            "Method: business days\n\
             Base deadline: 2025-03-14\n\
             Computed deadline: 2025-03-14"
        );
    }

    #[test]
    fn test_explain_with_extensions() {
        let request = DeadlineRequest::new(date("2025-01-01"), 30, DayCountMethod::CalendarDays)
            .with_extensions([
                ExtensionSpec::new(60, 45, 100),
                ExtensionSpec::new(1, 45, 100),
                ExtensionSpec::new(45, 45, 100),
            ]);
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();

        assert_eq!(
            explain(&result),
            "Method: calendar days\n\
             Base deadline: 2025-01-31\n\
             Extension 1: granted 45 of 60 requested days (capped by per-extension limit)\n\
             Extension 2: granted 1 of 1 requested day\n\
             Extension 3: granted 45 of 45 requested days\n\
             Total extension: 91 days\n\
             Computed deadline: 2025-05-02"
        );
    }

    #[test]
    fn test_explain_aggregate_cap_and_backward() {
        let request = DeadlineRequest::new(date("2025-03-14"), 10, DayCountMethod::ClearDays)
            .backward()
            .with_extension(ExtensionSpec::new(5, 5, 2));
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();

        assert_eq!(
            explain(&result),
            "Method: clear days, counted backward\n\
             Base deadline: 2025-03-03\n\
             Extension 1: granted 2 of 5 requested days (capped by aggregate limit)\n\
             Total extension: 2 days\n\
             Computed deadline: 2025-03-05"
        );
    }

    #[test]
    fn test_explain_with_event() {
        let request = DeadlineRequest::new(date("2025-03-07"), 1, DayCountMethod::CalendarDays);
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();

        assert_eq!(
            explain_with_event("Complaint served", &result),
            "Triggering event: Complaint served\n\
             Method: calendar days\n\
             Base deadline: 2025-03-08\n\
             Computed deadline: 2025-03-08"
        );
    }

    #[test]
    fn test_explain_validation() {
        let request = DeadlineRequest::new(date("2025-03-07"), 5, DayCountMethod::BusinessDays);
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();

        assert_eq!(
            explain_validation(&validate(&result, date("2025-03-14"))),
            "Compliant: 2025-03-14 falls on the deadline of 2025-03-14"
        );
        assert_eq!(
            explain_validation(&validate(&result, date("2025-03-15"))),
            "Not compliant: 2025-03-15 is 1 day after the deadline of 2025-03-14"
        );
        assert_eq!(
            explain_validation(&validate(&result, date("2025-03-11"))),
            "Compliant: 2025-03-11 is 3 days before the deadline of 2025-03-14"
        );
    }

    #[test]
    fn test_explain_is_deterministic() {
        let request = DeadlineRequest::new(date("2025-06-30"), 20, DayCountMethod::BusinessDays)
            .with_extension(ExtensionSpec::new(14, 10, 30));
        let result = calculate(&request, &HolidayCalendar::default()).unwrap();
        assert_eq!(explain(&result), explain(&result.clone()));
    }
}
