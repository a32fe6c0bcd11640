//! View types served to the render layer

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::engine::{classify, countdown, remaining_ms};
use shared::{Order, Severity, TimeWindow};

/// One order as the render layer consumes it: the record plus everything
/// derived from "now" (severity, countdown text, overdue flag).
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub order_number: i64,
    pub customer_id: String,
    pub customer_name: String,
    pub po_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub severity: Severity,
    pub countdown: String,
    pub overdue: bool,
    /// Milliseconds until the deadline, negative once passed; absent when
    /// the order has no creation date.
    pub remaining_ms: Option<i64>,
}

impl OrderView {
    pub fn from_order(order: &Order, now: DateTime<Utc>) -> Self {
        let c = countdown(order, now);
        Self {
            order_number: order.order_number,
            customer_id: order.customer_id.clone(),
            customer_name: order.customer_name.clone(),
            po_number: order.po_number.clone(),
            created_at: order.created_at,
            status: order.status.clone(),
            severity: classify(order, now),
            countdown: c.to_string(),
            overdue: c.is_overdue(),
            remaining_ms: order.created_at.map(|_| remaining_ms(order, now)),
        }
    }
}

/// One status bucket: capped display entries plus the uncapped match count.
#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub status: String,
    pub capacity: usize,
    /// How many orders matched the filters before the display cap.
    pub total_matching: usize,
    pub orders: Vec<OrderView>,
}

/// The whole board for one render pass.
#[derive(Debug, Clone, Serialize)]
pub struct BoardView {
    pub generated_at: DateTime<Utc>,
    pub window: TimeWindow,
    pub search: String,
    pub sections: Vec<SectionView>,
}
