use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DAYS_PER_WEEK;
use crate::{CalendarDate, Weekday};

/// Which days of the week are structurally non-working.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeekendRule {
    #[default]
    SaturdaySunday,
    FridaySaturday,
    SundayOnly,
    /// Every day is a working day unless listed as a holiday
    NoWeekend,
    Custom(Vec<Weekday>),
}

impl WeekendRule {
    pub fn is_weekend(&self, weekday: Weekday) -> bool {
        match self {
            Self::SaturdaySunday => matches!(weekday, Weekday::Saturday | Weekday::Sunday),
            Self::FridaySaturday => matches!(weekday, Weekday::Friday | Weekday::Saturday),
            Self::SundayOnly => weekday == Weekday::Sunday,
            Self::NoWeekend => false,
            Self::Custom(days) => days.contains(&weekday),
        }
    }

    fn weekend_mask(&self) -> [bool; DAYS_PER_WEEK] {
        Weekday::ALL.map(|weekday| self.is_weekend(weekday))
    }
}

/// Error type for calendar construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Holiday data is malformed, duplicated, or leaves no working weekday.
    #[error("Invalid calendar source: {0}")]
    InvalidSource(String),

    /// Calendar file could not be read.
    #[error("Failed to read calendar file {path}: {reason}")]
    Unreadable { path: String, reason: String },
}

/// On-disk shape of a calendar configuration file.
///
/// ```toml
/// name = "Federal courts"
/// weekend = "saturday-sunday"
/// holidays = ["2025-01-01", "2025-07-04", "2025-12-25"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weekend: WeekendRule,
    #[serde(default)]
    pub holidays: Vec<CalendarDate>,
}

/// Non-working days for one jurisdiction.
///
/// Immutable once built. Share it by reference (or behind an `Arc`) across
/// threads; to refresh holiday data, build a new calendar and swap the handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    name:     Option<String>,
    holidays: BTreeSet<CalendarDate>,
    weekend:  WeekendRule,
    mask:     [bool; DAYS_PER_WEEK],
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        let weekend = WeekendRule::default();
        Self {
            name: None,
            holidays: BTreeSet::new(),
            mask: weekend.weekend_mask(),
            weekend,
        }
    }
}

impl HolidayCalendar {
    /// Builds a calendar from explicit holiday dates.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidSource` if a date appears twice or if
    /// the weekend rule covers the whole week.
    pub fn new(
        holidays: impl IntoIterator<Item = CalendarDate>,
        weekend: WeekendRule,
    ) -> Result<Self, CalendarError> {
        let mask = weekend.weekend_mask();
        if mask.iter().all(|&is_weekend| is_weekend) {
            return Err(CalendarError::InvalidSource(
                "weekend rule leaves no working weekday".to_owned(),
            ));
        }

        let mut set = BTreeSet::new();
        for holiday in holidays {
            if !set.insert(holiday) {
                return Err(CalendarError::InvalidSource(format!(
                    "duplicate holiday {holiday}"
                )));
            }
        }

        tracing::debug!(holidays = set.len(), ?weekend, "Built holiday calendar");
        Ok(Self {
            name: None,
            holidays: set,
            weekend,
            mask,
        })
    }

    /// Builds a calendar from `YYYY-MM-DD` strings.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidSource` for a malformed or duplicate entry.
    pub fn from_iso_strings<S: AsRef<str>>(
        holidays: &[S],
        weekend: WeekendRule,
    ) -> Result<Self, CalendarError> {
        let dates = holidays
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                raw.parse::<CalendarDate>().map_err(|e| {
                    CalendarError::InvalidSource(format!("malformed holiday '{raw}': {e}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(dates, weekend)
    }

    /// Builds a calendar from a parsed configuration.
    ///
    /// # Errors
    /// See [`HolidayCalendar::new`].
    pub fn from_config(config: CalendarConfig) -> Result<Self, CalendarError> {
        let calendar = Self::new(config.holidays, config.weekend)?;
        Ok(match config.name {
            Some(name) => calendar.with_name(name),
            None => calendar,
        })
    }

    /// Parses a TOML calendar configuration.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidSource` if the document does not parse
    /// or contains invalid holiday data.
    pub fn from_toml_str(content: &str) -> Result<Self, CalendarError> {
        let config: CalendarConfig =
            toml::from_str(content).map_err(|e| CalendarError::InvalidSource(e.to_string()))?;
        Self::from_config(config)
    }

    /// Loads a TOML calendar configuration from disk.
    ///
    /// # Errors
    /// Returns `CalendarError::Unreadable` if the file cannot be read, or
    /// `CalendarError::InvalidSource` if its content is invalid.
    pub fn load(path: &Path) -> Result<Self, CalendarError> {
        let content = std::fs::read_to_string(path).map_err(|e| CalendarError::Unreadable {
            path:   path.display().to_string(),
            reason: e.to_string(),
        })?;
        let calendar = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            holidays = calendar.len(),
            "Loaded holiday calendar"
        );
        Ok(calendar)
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub const fn weekend_rule(&self) -> &WeekendRule {
        &self.weekend
    }

    /// Holidays in chronological order
    pub fn holidays(&self) -> impl Iterator<Item = CalendarDate> + '_ {
        self.holidays.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    pub fn is_holiday(&self, date: CalendarDate) -> bool {
        self.holidays.contains(&date)
    }

    pub const fn is_weekend(&self, date: CalendarDate) -> bool {
        self.mask[date.weekday().index()]
    }

    pub fn is_working_day(&self, date: CalendarDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// First working day strictly after `date`, or `None` at the end of the
    /// representable range.
    pub fn next_working_day(&self, date: CalendarDate) -> Option<CalendarDate> {
        let mut current = date.succ()?;
        while !self.is_working_day(current) {
            current = current.succ()?;
        }
        Some(current)
    }
}
