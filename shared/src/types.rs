//! Core order domain types

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SLA window applied to every order, measured from its creation time.
pub const SLA_HOURS: i64 = 48;

/// A single order record from the external order-management system.
///
/// Snapshots are replaced wholesale on each fetch; `order_number` is unique
/// within a snapshot and nothing here deduplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: i64,
    pub customer_id: String,
    /// Display name, may be empty.
    pub customer_name: String,
    pub po_number: Option<String>,
    /// Absence means no SLA deadline is computable.
    pub created_at: Option<DateTime<Utc>>,
    /// Informational only, not used by deadline logic.
    pub order_date: Option<DateTime<Utc>>,
    /// Informational only, not used by deadline logic.
    pub need_by_date: Option<DateTime<Utc>>,
    /// Workflow stage label, compared by exact string equality.
    pub status: String,
}

impl Order {
    /// SLA deadline: `created_at + 48h`, or `None` when no creation time exists.
    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.created_at.map(|created| created + Duration::hours(SLA_HOURS))
    }
}

/// Parse a timestamp as the order-management API emits them.
///
/// The API is inconsistent about timezone suffixes and sometimes sends bare
/// dates, so this tries the observed shapes in order and returns `None` for
/// anything unrecognizable. Callers treat `None` as "no date".
pub fn parse_order_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }

    None
}

/// Severity bucket derived from time remaining until the SLA deadline.
///
/// Declaration order doubles as display priority: reds sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Deadline passed, or no creation date at all.
    Red,
    /// Twelve hours or less remaining.
    Yellow,
    /// More than twelve hours remaining.
    Green,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Red => "red",
            Severity::Yellow => "yellow",
            Severity::Green => "green",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative date range used to include/exclude orders by creation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    #[default]
    All,
    Today,
    Week,
    Month,
    #[serde(rename = "3months")]
    ThreeMonths,
    #[serde(rename = "6months")]
    SixMonths,
    Year,
}

impl TimeWindow {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(TimeWindow::All),
            "today" => Some(TimeWindow::Today),
            "week" => Some(TimeWindow::Week),
            "month" => Some(TimeWindow::Month),
            "3months" => Some(TimeWindow::ThreeMonths),
            "6months" => Some(TimeWindow::SixMonths),
            "year" => Some(TimeWindow::Year),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::All => "all",
            TimeWindow::Today => "today",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::ThreeMonths => "3months",
            TimeWindow::SixMonths => "6months",
            TimeWindow::Year => "year",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User-selected filters, owned by the caller and passed into the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderFilter {
    pub window: TimeWindow,
    /// Free-text search; empty means no search filtering.
    pub search: String,
}

impl OrderFilter {
    pub fn new(window: TimeWindow, search: impl Into<String>) -> Self {
        Self {
            window,
            search: search.into(),
        }
    }
}

/// Per-bucket display cap, indexed by how many status sections are visible.
///
/// Layout policy, not engine policy: the engine takes the resolved capacity
/// as a plain argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityPlan {
    caps: Vec<usize>,
}

impl CapacityPlan {
    pub fn new(caps: Vec<usize>) -> Result<Self, crate::errors::SharedError> {
        if caps.is_empty() {
            return Err(crate::errors::SharedError::InvalidConfig {
                field: "capacity_plan".to_string(),
                value: "empty".to_string(),
            });
        }
        Ok(Self { caps })
    }

    /// Capacity for a layout showing `visible_sections` buckets at once.
    ///
    /// Zero is treated as one; counts beyond the plan use the last entry.
    pub fn capacity_for(&self, visible_sections: usize) -> usize {
        let index = visible_sections.max(1) - 1;
        self.caps
            .get(index)
            .or_else(|| self.caps.last())
            .copied()
            .unwrap_or(0)
    }
}

impl Default for CapacityPlan {
    fn default() -> Self {
        Self {
            caps: vec![90, 40, 30, 20],
        }
    }
}

/// Human-readable countdown to (or past) an order's SLA deadline.
///
/// Overdue-ness is exposed as a flag rather than baked into the text so the
/// presentation layer decides how to mark it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// No creation date, so no deadline to count against.
    NoDate,
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        overdue: bool,
    },
}

impl Countdown {
    pub fn is_overdue(&self) -> bool {
        match self {
            Countdown::NoDate => true,
            Countdown::Remaining { overdue, .. } => *overdue,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Countdown::NoDate => write!(f, "No Date"),
            Countdown::Remaining {
                days,
                hours,
                minutes,
                seconds,
                ..
            } => write!(f, "{days:02}:{hours:02}:{minutes:02}:{seconds:02}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_observed_timestamp_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 8, 30, 0).unwrap();

        assert_eq!(parse_order_timestamp("2024-05-01T08:30:00Z"), Some(expected));
        assert_eq!(parse_order_timestamp("2024-05-01T08:30:00"), Some(expected));
        assert_eq!(parse_order_timestamp("2024-05-01 08:30:00"), Some(expected));
        assert_eq!(
            parse_order_timestamp("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn unparseable_timestamps_become_none() {
        assert_eq!(parse_order_timestamp(""), None);
        assert_eq!(parse_order_timestamp("   "), None);
        assert_eq!(parse_order_timestamp("not-a-date"), None);
        assert_eq!(parse_order_timestamp("05/01/2024"), None);
    }

    #[test]
    fn severity_orders_red_first() {
        assert!(Severity::Red < Severity::Yellow);
        assert!(Severity::Yellow < Severity::Green);
    }

    #[test]
    fn time_window_round_trips_through_strings() {
        for window in [
            TimeWindow::All,
            TimeWindow::Today,
            TimeWindow::Week,
            TimeWindow::Month,
            TimeWindow::ThreeMonths,
            TimeWindow::SixMonths,
            TimeWindow::Year,
        ] {
            assert_eq!(TimeWindow::from_str(window.as_str()), Some(window));
        }
        assert_eq!(TimeWindow::from_str("fortnight"), None);
    }

    #[test]
    fn default_capacity_plan_matches_layout_tiers() {
        let plan = CapacityPlan::default();
        assert_eq!(plan.capacity_for(1), 90);
        assert_eq!(plan.capacity_for(2), 40);
        assert_eq!(plan.capacity_for(3), 30);
        assert_eq!(plan.capacity_for(4), 20);
        // Beyond the plan, reuse the densest tier.
        assert_eq!(plan.capacity_for(7), 20);
        // Zero visible sections degrades to the single-section cap.
        assert_eq!(plan.capacity_for(0), 90);
    }

    #[test]
    fn empty_capacity_plan_is_rejected() {
        assert!(CapacityPlan::new(vec![]).is_err());
        assert!(CapacityPlan::new(vec![50]).is_ok());
    }

    #[test]
    fn countdown_display_zero_pads() {
        let countdown = Countdown::Remaining {
            days: 1,
            hours: 2,
            minutes: 3,
            seconds: 4,
            overdue: false,
        };
        assert_eq!(countdown.to_string(), "01:02:03:04");
        assert_eq!(Countdown::NoDate.to_string(), "No Date");
        assert!(Countdown::NoDate.is_overdue());
    }
}
