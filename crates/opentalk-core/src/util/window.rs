//! Expansion window for recurring events.

use chrono::{DateTime, Months, Utc};
use serde::Serialize;

use crate::types::TimePerspectiveFilter;

/// Closed interval `[start, end]` that bounds recurrence expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Returns `true` if `instant` lies inside the window, bounds included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// A window that starts and ends at `instant`.
    #[must_use]
    pub const fn degenerate(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: instant,
        }
    }
}

/// ## Summary
/// Computes the window used to bound recurrence expansion relative to `now`.
///
/// - `Future`: `[now, now + max_months]`
/// - `Past`: `[now - max_months, now]`
/// - `TimeIndependent`: `[now, now]`; time-independent events are never expanded.
///
/// Months are calendar months. The day of month is kept where it exists and
/// clamped to the last day of the target month otherwise. Results outside the
/// representable range saturate.
#[must_use]
pub fn compute_window(
    now: DateTime<Utc>,
    filter: TimePerspectiveFilter,
    max_months: u32,
) -> TimeWindow {
    let months = Months::new(max_months);
    let window = match filter {
        TimePerspectiveFilter::Future => TimeWindow {
            start: now,
            end: now
                .checked_add_months(months)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        },
        TimePerspectiveFilter::Past => TimeWindow {
            start: now
                .checked_sub_months(months)
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            end: now,
        },
        TimePerspectiveFilter::TimeIndependent => TimeWindow::degenerate(now),
    };

    tracing::trace!(
        %filter,
        max_months,
        start = %window.start,
        end = %window.end,
        "Computed expansion window"
    );
    window
}
