use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::consts::{
    CENTURY_CYCLE, DATE_SEPARATOR, DAYS_IN_MONTH, DAYS_PER_ERA, EPOCH_SHIFT, EPOCH_WEEKDAY_OFFSET,
    FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_MONTH, MAX_YEAR, MIN_DAY,
    MIN_YEAR,
};

/// A plain calendar date with no time-of-day or timezone.
///
/// Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", year, month, day)]
pub struct CalendarDate {
    year:  u16,
    month: u8,
    day:   u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0} (expected YYYY-MM-DD)")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in order, Monday first
    pub const ALL: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Zero-based index with Monday as 0
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl CalendarDate {
    /// Earliest representable date, 0001-01-01
    pub const MIN: Self = Self {
        year:  MIN_YEAR,
        month: 1,
        day:   MIN_DAY,
    };

    /// Latest representable date, 9999-12-31
    pub const MAX: Self = Self {
        year:  MAX_YEAR,
        month: MAX_MONTH,
        day:   DAYS_IN_MONTH[MAX_MONTH as usize],
    };

    /// Creates a validated date.
    ///
    /// # Errors
    /// Returns the `DateError` variant naming the first out-of-range component.
    pub const fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        if year < MIN_YEAR || year > MAX_YEAR {
            return Err(DateError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(DateError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(DateError::InvalidDay { year, month, day });
        }
        Ok(Self { year, month, day })
    }

    #[inline]
    pub const fn year(self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (negative before the epoch).
    pub const fn to_ordinal(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Inverse of [`CalendarDate::to_ordinal`].
    /// Returns `None` outside 0001-01-01..=9999-12-31.
    pub fn from_ordinal(ordinal: i64) -> Option<Self> {
        if !(MIN_ORDINAL..=MAX_ORDINAL).contains(&ordinal) {
            return None;
        }
        let (year, month, day) = civil_from_days(ordinal);
        Some(Self {
            year:  u16::try_from(year).ok()?,
            month: u8::try_from(month).ok()?,
            day:   u8::try_from(day).ok()?,
        })
    }

    pub const fn weekday(self) -> Weekday {
        let index = (self.to_ordinal() + EPOCH_WEEKDAY_OFFSET).rem_euclid(7);
        Weekday::ALL[index as usize]
    }

    /// Adds whole calendar days in closed form.
    pub fn checked_add_days(self, days: u64) -> Option<Self> {
        let days = i64::try_from(days).ok()?;
        Self::from_ordinal(self.to_ordinal().checked_add(days)?)
    }

    /// Subtracts whole calendar days in closed form.
    pub fn checked_sub_days(self, days: u64) -> Option<Self> {
        let days = i64::try_from(days).ok()?;
        Self::from_ordinal(self.to_ordinal().checked_sub(days)?)
    }

    /// The following day, or `None` after 9999-12-31
    pub const fn succ(self) -> Option<Self> {
        if self.day < days_in_month(self.year, self.month) {
            Some(Self {
                day: self.day + 1,
                ..self
            })
        } else if self.month < MAX_MONTH {
            Some(Self {
                month: self.month + 1,
                day: MIN_DAY,
                ..self
            })
        } else if self.year < MAX_YEAR {
            Some(Self {
                year:  self.year + 1,
                month: 1,
                day:   MIN_DAY,
            })
        } else {
            None
        }
    }

    /// The preceding day, or `None` before 0001-01-01
    pub const fn pred(self) -> Option<Self> {
        if self.day > MIN_DAY {
            Some(Self {
                day: self.day - 1,
                ..self
            })
        } else if self.month > 1 {
            let month = self.month - 1;
            Some(Self {
                month,
                day: days_in_month(self.year, month),
                ..self
            })
        } else if self.year > MIN_YEAR {
            Some(Self {
                year:  self.year - 1,
                month: MAX_MONTH,
                day:   DAYS_IN_MONTH[MAX_MONTH as usize],
            })
        } else {
            None
        }
    }

    /// Signed number of calendar days from `self` to `other`.
    pub const fn days_until(self, other: Self) -> i64 {
        other.to_ordinal() - self.to_ordinal()
    }

    fn parse_component<T: FromStr>(s: &str, width: usize) -> Result<T, DateError> {
        if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(trimmed.to_owned()));
        };

        let year = Self::parse_component::<u16>(year, 4)?;
        let month = Self::parse_component::<u8>(month, 2)?;
        let day = Self::parse_component::<u8>(day, 2)?;
        Self::new(year, month, day)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

const MIN_ORDINAL: i64 = days_from_civil(MIN_YEAR, 1, MIN_DAY);
const MAX_ORDINAL: i64 = days_from_civil(MAX_YEAR, MAX_MONTH, 31);

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

// Eras start on 1 March so the leap day falls at the end of the counted year.
const fn days_from_civil(year: u16, month: u8, day: u8) -> i64 {
    let month = month as i64;
    let year = year as i64 - if month <= 2 { 1 } else { 0 };
    let era = year.div_euclid(GREGORIAN_CYCLE as i64);
    let year_of_era = year - era * GREGORIAN_CYCLE as i64;
    let shifted_month = if month > 2 { month - 3 } else { month + 9 };
    let day_of_year = (153 * shifted_month + 2) / 5 + day as i64 - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT
}

const fn civil_from_days(ordinal: i64) -> (i64, i64, i64) {
    let shifted = ordinal + EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_PER_ERA);
    let day_of_era = shifted - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * GREGORIAN_CYCLE as i64 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
