//! Order classification engine
//!
//! Pure functions over an order snapshot: SLA severity classification,
//! countdown formatting, and the per-status filter/sort/cap pipeline.
//! Everything is parameterized on `now` so a caller can recompute on every
//! tick without the engine owning any timers.

use chrono::{DateTime, Utc};

use crate::core::window::within_window;
use shared::{Countdown, Order, OrderFilter, Severity};

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time above this is green; at or below (but positive) is yellow.
const WARNING_THRESHOLD_MS: i64 = 12 * MS_PER_HOUR;

/// Sentinel for orders with no creation date: sorts to the most-overdue end.
pub const NO_DATE_REMAINING_MS: i64 = i64::MIN;

/// Milliseconds until the order's SLA deadline, negative once passed.
///
/// Orders without a creation date get [`NO_DATE_REMAINING_MS`] so they land
/// deterministically ahead of every dated overdue order.
pub fn remaining_ms(order: &Order, now: DateTime<Utc>) -> i64 {
    match order.deadline() {
        Some(deadline) => (deadline - now).num_milliseconds(),
        None => NO_DATE_REMAINING_MS,
    }
}

/// Classify an order against its SLA deadline.
///
/// More than 12 hours remaining is green, 0 < remaining <= 12h is yellow,
/// anything at or past the deadline (including "no date") is red.
pub fn classify(order: &Order, now: DateTime<Utc>) -> Severity {
    let remaining = remaining_ms(order, now);
    if remaining > WARNING_THRESHOLD_MS {
        Severity::Green
    } else if remaining > 0 {
        Severity::Yellow
    } else {
        Severity::Red
    }
}

/// Human-readable countdown to (or past) the SLA deadline.
///
/// The absolute distance is split into whole days/hours/minutes/seconds;
/// whether the deadline has passed is reported separately so presentation
/// decides how to mark overdue entries.
pub fn countdown(order: &Order, now: DateTime<Utc>) -> Countdown {
    let Some(deadline) = order.deadline() else {
        return Countdown::NoDate;
    };

    let diff_ms = (deadline - now).num_milliseconds();
    let abs_ms = diff_ms.abs();

    Countdown::Remaining {
        days: abs_ms / MS_PER_DAY,
        hours: (abs_ms % MS_PER_DAY) / MS_PER_HOUR,
        minutes: (abs_ms % MS_PER_HOUR) / MS_PER_MINUTE,
        seconds: (abs_ms % MS_PER_MINUTE) / MS_PER_SECOND,
        overdue: diff_ms <= 0,
    }
}

/// Case-insensitive substring match over the four searchable fields.
///
/// `query` must already be trimmed and lowercased.
fn matches_search(order: &Order, query: &str) -> bool {
    order.order_number.to_string().contains(query)
        || order.customer_id.to_lowercase().contains(query)
        || order.customer_name.to_lowercase().contains(query)
        || order
            .po_number
            .as_deref()
            .is_some_and(|po| po.to_lowercase().contains(query))
}

/// Produce the display sequence for one status bucket.
///
/// Pipeline: exact status match, time-window predicate, free-text search,
/// then a stable sort by (severity priority, ascending remaining time) and a
/// truncation to `capacity`. Red sorts first with the most-overdue entries at
/// the front; within yellow and green the soonest-expiring come first. The
/// input is never mutated and identical arguments always yield identical
/// output.
pub fn orders_for_status<'a>(
    orders: &'a [Order],
    status: &str,
    filter: &OrderFilter,
    now: DateTime<Utc>,
    capacity: usize,
) -> Vec<&'a Order> {
    let query = filter.search.trim().to_lowercase();

    let mut matched: Vec<(&Order, Severity, i64)> = orders
        .iter()
        .filter(|order| order.status == status)
        .filter(|order| within_window(order, filter.window, now))
        .filter(|order| query.is_empty() || matches_search(order, &query))
        .map(|order| (order, classify(order, now), remaining_ms(order, now)))
        .collect();

    // Vec::sort_by_key is stable, so ties keep their snapshot order.
    matched.sort_by_key(|&(_, severity, remaining)| (severity, remaining));
    matched.truncate(capacity);

    matched.into_iter().map(|(order, _, _)| order).collect()
}
