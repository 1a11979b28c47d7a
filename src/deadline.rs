use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    AppliedExtension, CalendarDate, DayCountMethod, ExtensionSpec, HolidayCalendar, add_days,
    apply_chain, sub_days,
};

/// Which way the period runs from the triggering date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Deadline falls after the triggering date (response periods).
    #[default]
    Forward,
    /// Deadline falls before the triggering date (notice periods).
    Backward,
}

impl Direction {
    pub const fn is_forward(&self) -> bool {
        matches!(self, Self::Forward)
    }
}

/// Error type for deadline calculation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeadlineError {
    /// The period or its extensions run outside 0001-01-01..=9999-12-31.
    ///
    /// `base_date` is `None` when the base period itself overflowed and holds
    /// the in-range base deadline when the extension chain pushed past the end.
    #[error(
        "Deadline out of range: {count} {method} from {triggering_date}{}",
        overflow_stage(.base_date.as_ref())
    )]
    Overflow {
        triggering_date: CalendarDate,
        count:           u32,
        method:          DayCountMethod,
        base_date:       Option<CalendarDate>,
    },

    /// An extension chain mixes different aggregate caps.
    #[error(
        "Inconsistent aggregate cap: extension {index} has cap {found}, \
         chain started with {expected}"
    )]
    InconsistentAggregateCap {
        index:    usize,
        expected: u32,
        found:    u32,
    },

    /// A stored result whose fields contradict each other.
    #[error("Inconsistent deadline result: {0}")]
    InconsistentResult(String),
}

fn overflow_stage(base_date: Option<&CalendarDate>) -> String {
    match base_date {
        Some(base) => format!(" after extending base deadline {base}"),
        None => String::new(),
    }
}

/// Everything needed to compute one deadline.
///
/// `method` is always explicit; nothing here guesses a counting convention.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeadlineRequest {
    pub triggering_date:  CalendarDate,
    pub count:            u32,
    pub method:           DayCountMethod,
    #[serde(default)]
    pub extensions:       Vec<ExtensionSpec>,
    #[serde(default)]
    pub direction:        Direction,
    /// Description of the event that starts the clock, for display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggering_event: Option<String>,
}

impl DeadlineRequest {
    pub const fn new(triggering_date: CalendarDate, count: u32, method: DayCountMethod) -> Self {
        Self {
            triggering_date,
            count,
            method,
            extensions: Vec::new(),
            direction: Direction::Forward,
            triggering_event: None,
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: ExtensionSpec) -> Self {
        self.extensions.push(extension);
        self
    }

    #[must_use]
    pub fn with_extensions(mut self, extensions: impl IntoIterator<Item = ExtensionSpec>) -> Self {
        self.extensions.extend(extensions);
        self
    }

    /// Counts the period backward from the triggering date.
    #[must_use]
    pub fn backward(mut self) -> Self {
        self.direction = Direction::Backward;
        self
    }

    #[must_use]
    pub fn with_triggering_event(mut self, event: impl Into<String>) -> Self {
        self.triggering_event = Some(event.into());
        self
    }

    /// Checks that every extension shares the first entry's aggregate cap.
    ///
    /// # Errors
    /// Returns `DeadlineError::InconsistentAggregateCap` naming the first
    /// mismatching entry.
    pub fn validate(&self) -> Result<(), DeadlineError> {
        let Some(first) = self.extensions.first() else {
            return Ok(());
        };
        match self
            .extensions
            .iter()
            .enumerate()
            .find(|(_, ext)| ext.aggregate_cap != first.aggregate_cap)
        {
            Some((index, ext)) => Err(DeadlineError::InconsistentAggregateCap {
                index,
                expected: first.aggregate_cap,
                found: ext.aggregate_cap,
            }),
            None => Ok(()),
        }
    }
}

/// A computed deadline. Immutable; a new request yields a new result.
///
/// Deserialization rejects results `calculate` could not have produced.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StoredDeadlineResult")]
pub struct DeadlineResult {
    computed_date:        CalendarDate,
    method:               DayCountMethod,
    base_date:            CalendarDate,
    extensions_applied:   Vec<AppliedExtension>,
    total_extension_days: u32,
    #[serde(default, skip_serializing_if = "Direction::is_forward")]
    direction:            Direction,
}

impl DeadlineResult {
    /// Final deadline after extensions
    pub const fn computed_date(&self) -> CalendarDate {
        self.computed_date
    }

    pub const fn method(&self) -> DayCountMethod {
        self.method
    }

    /// Deadline before any extension was applied
    pub const fn base_date(&self) -> CalendarDate {
        self.base_date
    }

    pub fn extensions_applied(&self) -> &[AppliedExtension] {
        &self.extensions_applied
    }

    pub const fn total_extension_days(&self) -> u32 {
        self.total_extension_days
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }
}

#[derive(Deserialize)]
struct StoredDeadlineResult {
    computed_date:        CalendarDate,
    method:               DayCountMethod,
    base_date:            CalendarDate,
    extensions_applied:   Vec<AppliedExtension>,
    total_extension_days: u32,
    #[serde(default)]
    direction:            Direction,
}

impl TryFrom<StoredDeadlineResult> for DeadlineResult {
    type Error = DeadlineError;

    fn try_from(stored: StoredDeadlineResult) -> Result<Self, Self::Error> {
        if let Some(extension) = stored
            .extensions_applied
            .iter()
            .find(|e| e.granted_days > e.requested_days)
        {
            return Err(DeadlineError::InconsistentResult(format!(
                "granted {} of {} requested days",
                extension.granted_days, extension.requested_days
            )));
        }

        let granted: u64 = stored
            .extensions_applied
            .iter()
            .map(|e| u64::from(e.granted_days))
            .sum();
        if granted != u64::from(stored.total_extension_days) {
            return Err(DeadlineError::InconsistentResult(format!(
                "total_extension_days is {} but extensions grant {granted}",
                stored.total_extension_days
            )));
        }

        // Extensions are calendar-day grace periods in either direction
        let extended = stored.base_date.days_until(stored.computed_date);
        if extended != i64::from(stored.total_extension_days) {
            return Err(DeadlineError::InconsistentResult(format!(
                "computed_date {} is {extended} days from base_date {}, expected {}",
                stored.computed_date, stored.base_date, stored.total_extension_days
            )));
        }

        Ok(Self {
            computed_date:        stored.computed_date,
            method:               stored.method,
            base_date:            stored.base_date,
            extensions_applied:   stored.extensions_applied,
            total_extension_days: stored.total_extension_days,
            direction:            stored.direction,
        })
    }
}

/// Turns a request into a deadline.
///
/// Pure: no I/O, no state kept between calls.
///
/// # Errors
/// Returns `DeadlineError::InconsistentAggregateCap` for a malformed extension
/// chain and `DeadlineError::Overflow` if the deadline leaves the
/// representable date range.
#[instrument(level = "debug", skip(calendar), fields(event = request.triggering_event.as_deref()))]
pub fn calculate(
    request: &DeadlineRequest,
    calendar: &HolidayCalendar,
) -> Result<DeadlineResult, DeadlineError> {
    request.validate()?;

    let overflow = |base_date| DeadlineError::Overflow {
        triggering_date: request.triggering_date,
        count: request.count,
        method: request.method,
        base_date,
    };

    let counter = match request.direction {
        Direction::Forward => add_days,
        Direction::Backward => sub_days,
    };
    let base_date = counter(request.triggering_date, request.count, request.method, calendar)
        .ok_or_else(|| overflow(None))?;

    let (computed_date, extensions_applied) = if request.extensions.is_empty() {
        (base_date, Vec::new())
    } else {
        apply_chain(base_date, request.method, &request.extensions, calendar)
            .ok_or_else(|| overflow(Some(base_date)))?
    };
    let total_extension_days: u32 = extensions_applied.iter().map(|e| e.granted_days).sum();

    tracing::debug!(%base_date, %computed_date, total_extension_days, "Calculated deadline");
    Ok(DeadlineResult {
        computed_date,
        method: request.method,
        base_date,
        extensions_applied,
        total_extension_days,
        direction: request.direction,
    })
}
