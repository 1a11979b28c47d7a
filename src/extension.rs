use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DayCountMethod, HolidayCalendar, add_days};

/// One discrete extension request against a deadline.
///
/// `aggregate_cap` bounds the whole chain and must be the same on every
/// entry of a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExtensionSpec {
    pub requested_days:    u32,
    pub max_per_extension: u32,
    pub aggregate_cap:     u32,
}

impl ExtensionSpec {
    pub const fn new(requested_days: u32, max_per_extension: u32, aggregate_cap: u32) -> Self {
        Self {
            requested_days,
            max_per_extension,
            aggregate_cap,
        }
    }
}

/// Which ceiling cut an extension short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CapReason {
    #[display(fmt = "per-extension limit")]
    PerExtensionCap,
    #[display(fmt = "aggregate limit")]
    AggregateCap,
}

/// Outcome of one extension in a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppliedExtension {
    pub requested_days:   u32,
    pub granted_days:     u32,
    pub reason_if_capped: Option<CapReason>,
}

impl AppliedExtension {
    pub const fn is_capped(&self) -> bool {
        self.reason_if_capped.is_some()
    }
}

/// Applies `extensions` in order to `base_deadline`.
///
/// Each extension grants
/// `min(requested, max_per_extension, aggregate_cap - granted so far)`
/// calendar days, whatever `base_method` produced the base deadline. Once the
/// aggregate cap is reached every later request is granted zero days and
/// flagged [`CapReason::AggregateCap`], including zero-day requests.
///
/// Returns `None` if the extended deadline would fall after 9999-12-31.
pub fn apply_chain(
    base_deadline: CalendarDate,
    base_method: DayCountMethod,
    extensions: &[ExtensionSpec],
    calendar: &HolidayCalendar,
) -> Option<(CalendarDate, Vec<AppliedExtension>)> {
    let mut deadline = base_deadline;
    let mut running_total = 0_u32;
    let mut applied = Vec::with_capacity(extensions.len());

    for spec in extensions {
        let remaining = spec.aggregate_cap.saturating_sub(running_total);
        let granted = spec
            .requested_days
            .min(spec.max_per_extension)
            .min(remaining);

        let reason_if_capped = if remaining == 0 {
            Some(CapReason::AggregateCap)
        } else if granted >= spec.requested_days {
            None
        } else if spec.max_per_extension < spec.requested_days
            && spec.max_per_extension <= remaining
        {
            Some(CapReason::PerExtensionCap)
        } else {
            Some(CapReason::AggregateCap)
        };

        if let Some(reason) = reason_if_capped {
            tracing::debug!(
                requested = spec.requested_days,
                granted,
                %reason,
                "Extension capped"
            );
        }

        deadline = add_days(deadline, granted, DayCountMethod::CalendarDays, calendar)?;
        running_total += granted;
        applied.push(AppliedExtension {
            requested_days: spec.requested_days,
            granted_days: granted,
            reason_if_capped,
        });
    }

    tracing::trace!(
        %base_deadline,
        %base_method,
        %deadline,
        running_total,
        "Applied extension chain"
    );
    Some((deadline, applied))
}
