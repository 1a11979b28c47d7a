/// Earliest representable year (inclusive)
pub const MIN_YEAR: u16 = 1;
/// Latest representable year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed).
/// February holds the non-leap value; leap years are handled by `days_in_month`.
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Days in one 400-year Gregorian era
pub(crate) const DAYS_PER_ERA: i64 = 146_097;
/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar
pub(crate) const EPOCH_SHIFT: i64 = 719_468;

/// Length of the week
pub const DAYS_PER_WEEK: usize = 7;
/// Position of 1970-01-01 (a Thursday) counting Monday as 0
pub(crate) const EPOCH_WEEKDAY_OFFSET: i64 = 3;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
