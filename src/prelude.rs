//! Prelude module for legal_deadline crate.
//!
//! Re-exports the types and entry points most callers need.

pub use crate::{
    CalendarDate, CalendarError, CapReason, DayCountMethod, DeadlineError, DeadlineRequest,
    DeadlineResult, Direction, ExtensionSpec, HolidayCalendar, ValidationResult, WeekendRule,
    calculate, calculate_deadline, explain, explain_validation, load_calendar,
    validate_compliance,
};
