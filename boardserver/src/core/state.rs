//! Board snapshot state
//!
//! Pure in-memory state with no I/O or locking; concurrency wrapping happens
//! at the service layer.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

use crate::core::engine::classify;
use shared::{Order, Severity};

/// The current order snapshot plus derived display data.
///
/// Snapshots are replaced wholesale on each fetch. A failed fetch never
/// touches the previous snapshot; the next fetch interval is the retry.
pub struct BoardState {
    orders: Vec<Order>,
    last_fetch: Option<DateTime<Utc>>,
    last_error: Option<String>,
    summary: BoardSummary,
    start_time: Instant,
}

/// Per-section severity counts, recomputed on every tick as "now" advances.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoardSummary {
    pub generated_at: Option<DateTime<Utc>>,
    pub sections: HashMap<String, SectionSummary>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub total: usize,
    pub red: usize,
    pub yellow: usize,
    pub green: usize,
}

impl BoardState {
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            last_fetch: None,
            last_error: None,
            summary: BoardSummary::default(),
            start_time: Instant::now(),
        }
    }

    /// Replace the snapshot wholesale. Clears any recorded fetch error.
    pub fn replace_orders(&mut self, orders: Vec<Order>, now: DateTime<Utc>) {
        self.orders = orders;
        self.last_fetch = Some(now);
        self.last_error = None;
    }

    /// Record a failed fetch, keeping the previous snapshot in place.
    pub fn record_fetch_error(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn last_fetch(&self) -> Option<DateTime<Utc>> {
        self.last_fetch
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn has_data(&self) -> bool {
        !self.orders.is_empty()
    }

    /// Whether the snapshot was fetched within `max_age` of `now`.
    pub fn is_fresh(&self, max_age: Duration, now: DateTime<Utc>) -> bool {
        match self.last_fetch {
            Some(fetched) => now - fetched < max_age,
            None => false,
        }
    }

    /// Drop the snapshot and everything derived from it.
    pub fn clear(&mut self) {
        self.orders.clear();
        self.last_fetch = None;
        self.last_error = None;
        self.summary = BoardSummary::default();
    }

    /// Recompute per-section severity counts for the given sections.
    pub fn recompute_summary(&mut self, sections: &[String], now: DateTime<Utc>) {
        let mut summary = BoardSummary {
            generated_at: Some(now),
            sections: HashMap::with_capacity(sections.len()),
        };

        for section in sections {
            let mut counts = SectionSummary::default();
            for order in self.orders.iter().filter(|o| o.status == *section) {
                counts.total += 1;
                match classify(order, now) {
                    Severity::Red => counts.red += 1,
                    Severity::Yellow => counts.yellow += 1,
                    Severity::Green => counts.green += 1,
                }
            }
            summary.sections.insert(section.clone(), counts);
        }

        self.summary = summary;
    }

    pub fn summary(&self) -> &BoardSummary {
        &self.summary
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn order(number: i64, status: &str, created_hours_ago: Option<i64>) -> Order {
        Order {
            order_number: number,
            customer_id: format!("CUST{number}"),
            customer_name: String::new(),
            po_number: None,
            created_at: created_hours_ago.map(|h| test_now() - Duration::hours(h)),
            order_date: None,
            need_by_date: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn replace_is_wholesale_and_clears_error() {
        let mut state = BoardState::new();
        let now = test_now();

        state.replace_orders(vec![order(1, "A", Some(1)), order(2, "A", Some(2))], now);
        assert!(state.has_data());
        assert_eq!(state.orders().len(), 2);

        state.record_fetch_error("boom".to_string());
        assert_eq!(state.last_error(), Some("boom"));

        state.replace_orders(vec![order(3, "A", Some(1))], now);
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.orders()[0].order_number, 3);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn fetch_error_keeps_previous_snapshot() {
        let mut state = BoardState::new();
        let now = test_now();

        state.replace_orders(vec![order(1, "A", Some(1))], now);
        state.record_fetch_error("network down".to_string());

        assert!(state.has_data());
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.last_fetch(), Some(now));
    }

    #[test]
    fn freshness_tracks_fetch_age() {
        let mut state = BoardState::new();
        let now = test_now();

        assert!(!state.is_fresh(Duration::minutes(5), now));

        state.replace_orders(vec![], now);
        assert!(state.is_fresh(Duration::minutes(5), now + Duration::minutes(4)));
        assert!(!state.is_fresh(Duration::minutes(5), now + Duration::minutes(5)));
    }

    #[test]
    fn clear_resets_everything() {
        let mut state = BoardState::new();
        let now = test_now();

        state.replace_orders(vec![order(1, "A", Some(1))], now);
        state.recompute_summary(&["A".to_string()], now);
        state.clear();

        assert!(!state.has_data());
        assert!(state.last_fetch().is_none());
        assert!(state.summary().generated_at.is_none());
    }

    #[test]
    fn summary_counts_by_severity_per_section() {
        let mut state = BoardState::new();
        let now = test_now();

        state.replace_orders(
            vec![
                order(1, "A", Some(1)),  // green
                order(2, "A", Some(40)), // yellow
                order(3, "A", Some(60)), // red
                order(4, "A", None),     // red (no date)
                order(5, "B", Some(1)),  // green, other section
            ],
            now,
        );
        state.recompute_summary(&["A".to_string(), "B".to_string()], now);

        let a = state.summary().sections.get("A").copied().unwrap();
        assert_eq!(
            a,
            SectionSummary {
                total: 4,
                red: 2,
                yellow: 1,
                green: 1,
            }
        );

        let b = state.summary().sections.get("B").copied().unwrap();
        assert_eq!(b.total, 1);
        assert_eq!(b.green, 1);
    }
}
