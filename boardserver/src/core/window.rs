//! Time-window predicate for creation-date filtering

use chrono::{DateTime, Duration, Months, Utc};

use shared::{Order, TimeWindow};

/// Does the order's creation date fall inside the selected window?
///
/// `Today` uses calendar-day semantics, not a rolling 24 hours. Month and
/// year windows subtract whole months via chrono, which clamps to the last
/// valid day where JS-style date arithmetic would roll over. Orders without
/// a creation date fail every window except `All`.
pub fn within_window(order: &Order, window: TimeWindow, now: DateTime<Utc>) -> bool {
    if window == TimeWindow::All {
        return true;
    }

    let Some(created) = order.created_at else {
        return false;
    };

    match window {
        TimeWindow::All => true,
        TimeWindow::Today => created.date_naive() == now.date_naive(),
        TimeWindow::Week => created >= now - Duration::days(7),
        TimeWindow::Month => after_months_back(created, now, 1),
        TimeWindow::ThreeMonths => after_months_back(created, now, 3),
        TimeWindow::SixMonths => after_months_back(created, now, 6),
        TimeWindow::Year => after_months_back(created, now, 12),
    }
}

fn after_months_back(created: DateTime<Utc>, now: DateTime<Utc>, months: u32) -> bool {
    match now.checked_sub_months(Months::new(months)) {
        Some(cutoff) => created >= cutoff,
        // Cutoff before representable time, nothing can predate it.
        None => true,
    }
}
