use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DeadlineResult};

/// Whether an action date meets a deadline.
///
/// Missing a deadline is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_compliant:       bool,
    pub proposed_date:      CalendarDate,
    pub deadline:           CalendarDate,
    /// `proposed_date - deadline` in calendar days; positive means late.
    pub days_over_or_under: i32,
}

/// Checks `proposed_date` against the computed deadline (on or before complies).
pub fn validate(result: &DeadlineResult, proposed_date: CalendarDate) -> ValidationResult {
    let deadline = result.computed_date();
    let difference = deadline.days_until(proposed_date);
    let days_over_or_under = i32::try_from(difference).unwrap_or(if difference > 0 {
        i32::MAX
    } else {
        i32::MIN
    });

    ValidationResult {
        is_compliant: proposed_date <= deadline,
        proposed_date,
        deadline,
        days_over_or_under,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DayCountMethod, DeadlineRequest, HolidayCalendar, calculate};
    use test_case::test_case;

    fn date(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn deadline_on_2025_03_14() -> DeadlineResult {
        let request = DeadlineRequest::new(date("2025-03-07"), 5, DayCountMethod::BusinessDays);
        calculate(&request, &HolidayCalendar::default()).unwrap()
    }

    #[test_case("2025-03-14", true, 0; "on the deadline")]
    #[test_case("2025-03-15", false, 1; "one day late")]
    #[test_case("2025-03-04", true, -10; "ten days early")]
    #[test_case("2026-03-14", false, 365; "a year late")]
    fn test_validate(proposed: &str, compliant: bool, difference: i32) {
        let result = deadline_on_2025_03_14();
        let validation = validate(&result, date(proposed));

        assert_eq!(validation.is_compliant, compliant);
        assert_eq!(validation.days_over_or_under, difference);
        assert_eq!(validation.proposed_date, date(proposed));
        assert_eq!(validation.deadline, date("2025-03-14"));
    }

    #[test]
    fn test_validate_does_not_touch_result() {
        let result = deadline_on_2025_03_14();
        let before = result.clone();
        let _ = validate(&result, date("2025-04-01"));
        assert_eq!(result, before);
    }

    #[test]
    fn test_validation_serde() {
        let validation = validate(&deadline_on_2025_03_14(), date("2025-03-15"));
        let json = serde_json::to_string(&validation).unwrap();
        assert_eq!(
            json,
            concat!(
                r#"{"is_compliant":false,"proposed_date":"2025-03-15","#,
                r#""deadline":"2025-03-14","days_over_or_under":1}"#,
            )
        );
        let parsed: ValidationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, validation);
    }
}
